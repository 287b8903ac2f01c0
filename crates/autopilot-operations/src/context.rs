use std::path::PathBuf;

use crate::naming::{Generation, generation_app_name};

/// State threaded through the steps of a push rollout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolloutContext {
    pub app_name: String,
    pub manifest_path: PathBuf,
    pub app_path: Option<PathBuf>,
    /// Slot the live app is moved to while the new version is pushed:
    /// `<app>-venerable` for zero-downtime pushes, `<app>-g1` for blue/green.
    pub venerable_name: String,
    /// Set by the lead-in step. Tells the push compensation whether there is a
    /// previous version to restore and the trailing step whether there is one
    /// to clean up.
    pub have_venerable_to_clean_up: bool,
}

impl RolloutContext {
    #[must_use]
    pub fn new(
        app_name: impl Into<String>,
        manifest_path: impl Into<PathBuf>,
        venerable_name: impl Into<String>,
    ) -> Self {
        Self {
            app_name: app_name.into(),
            manifest_path: manifest_path.into(),
            app_path: None,
            venerable_name: venerable_name.into(),
            have_venerable_to_clean_up: false,
        }
    }

    #[must_use]
    pub fn with_app_path(mut self, app_path: Option<PathBuf>) -> Self {
        self.app_path = app_path;
        self
    }
}

/// State threaded through the steps of a blue/green rollback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollbackContext {
    pub app_name: String,
    pub generation: Generation,
    pub generation_name: String,
    /// Host of the live route, once it has been read.
    pub host_name: Option<String>,
}

impl RollbackContext {
    #[must_use]
    pub fn new(app_name: impl Into<String>, generation: Generation) -> Self {
        let app_name = app_name.into();
        let generation_name = generation_app_name(&app_name, generation);
        Self {
            app_name,
            generation,
            generation_name,
            host_name: None,
        }
    }
}

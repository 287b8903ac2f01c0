use std::path::Path;

use crate::Result;
use crate::naming::swap_placeholder_name;

/// What the platform reports about an existing app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppMetadata {
    pub state: String,
}

impl AppMetadata {
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.state == "STARTED"
    }
}

/// A route bound to an app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppRoute {
    pub host: String,
    pub domain: String,
}

/// The remote commands and queries a rollout is built from.
pub trait RemoteOperations: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the app cannot be renamed.
    fn rename_application(&self, old_name: &str, new_name: &str) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if the push fails.
    fn push_application(
        &self,
        name: &str,
        manifest_path: &Path,
        app_path: Option<&Path>,
        no_start: bool,
    ) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if the app cannot be started.
    fn start_application(&self, name: &str) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if the app cannot be stopped.
    fn stop_application(&self, name: &str) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if the app cannot be deleted.
    fn delete_application(&self, name: &str) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if the query fails or its answer cannot be interpreted.
    fn does_app_exist(&self, name: &str) -> Result<bool>;

    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn get_app_metadata(&self, name: &str) -> Result<Option<AppMetadata>>;

    /// First route of an app, with the domain it lives on.
    ///
    /// # Errors
    ///
    /// Returns an error if the app has no readable route.
    fn get_app_route(&self, name: &str) -> Result<AppRoute>;

    /// # Errors
    ///
    /// Returns an error if the app has no readable route.
    fn get_host_name(&self, name: &str) -> Result<String> {
        Ok(self.get_app_route(name)?.host)
    }

    /// # Errors
    ///
    /// Returns an error if the route cannot be mapped.
    fn map_route(&self, name: &str, route: &AppRoute) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if the route cannot be unmapped.
    fn unmap_route(&self, name: &str, route: &AppRoute) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if the listing cannot be produced.
    fn list_applications(&self) -> Result<()>;

    /// Exchange the names of two apps through a placeholder name.
    ///
    /// Stops at the first failed rename.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the three renames fails.
    fn swap_applications(&self, first: &str, second: &str) -> Result<()> {
        let placeholder = swap_placeholder_name(first);
        self.rename_application(first, &placeholder)?;
        self.rename_application(second, first)?;
        self.rename_application(&placeholder, second)
    }
}

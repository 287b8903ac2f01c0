use std::path::Path;

use tracing::info;

use super::CloudFoundry;
use crate::{CommandRunner, Result};

impl<R: CommandRunner> CloudFoundry<R> {
    /// # Errors
    ///
    /// Returns an error if `cf rename` fails.
    pub fn rename_app(&self, old_name: &str, new_name: &str) -> Result<()> {
        info!(from = old_name, to = new_name, "renaming app");
        self.runner.run(&["rename", old_name, new_name])
    }

    /// Push an app from a manifest, optionally leaving it stopped.
    ///
    /// # Errors
    ///
    /// Returns an error if `cf push` fails.
    pub fn push_app(
        &self,
        name: &str,
        manifest: &Path,
        app_path: Option<&Path>,
        no_start: bool,
    ) -> Result<()> {
        info!(app = name, "pushing app");
        let manifest = manifest.to_string_lossy();
        let app_path = app_path.map(Path::to_string_lossy);

        let mut args = vec!["push", name, "-f", &*manifest];
        if let Some(app_path) = app_path.as_deref() {
            args.extend(["-p", app_path]);
        }
        if no_start {
            args.push("--no-start");
        }
        self.runner.run(&args)
    }

    /// # Errors
    ///
    /// Returns an error if `cf start` fails.
    pub fn start_app(&self, name: &str) -> Result<()> {
        info!(app = name, "starting app");
        self.runner.run(&["start", name])
    }

    /// # Errors
    ///
    /// Returns an error if `cf stop` fails.
    pub fn stop_app(&self, name: &str) -> Result<()> {
        info!(app = name, "stopping app");
        self.runner.run(&["stop", name])
    }

    /// # Errors
    ///
    /// Returns an error if `cf delete` fails.
    pub fn delete_app(&self, name: &str) -> Result<()> {
        info!(app = name, "deleting app");
        self.runner.run(&["delete", name, "-f"])
    }

    /// # Errors
    ///
    /// Returns an error if `cf apps` fails.
    pub fn list_apps(&self) -> Result<()> {
        self.runner.run(&["apps"])
    }
}

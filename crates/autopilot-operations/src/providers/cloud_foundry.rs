use std::path::Path;

use autopilot_cf::{CfCli, CloudFoundry, CommandRunner, Route};

use crate::Result;
use crate::traits::{AppMetadata, AppRoute, RemoteOperations};

/// Remote operations backed by the cf CLI.
pub struct CloudFoundryRemote<R = CfCli> {
    cf: CloudFoundry<R>,
}

impl CloudFoundryRemote<CfCli> {
    /// Connect to the space the cf CLI is targeting.
    ///
    /// # Errors
    ///
    /// Returns an error if the cf config cannot be read or no space is targeted.
    pub fn connect() -> Result<Self> {
        Ok(Self::new(autopilot_cf::connect()?))
    }
}

impl<R: CommandRunner> CloudFoundryRemote<R> {
    #[must_use]
    pub fn new(cf: CloudFoundry<R>) -> Self {
        Self { cf }
    }

    #[must_use]
    pub fn cloud_foundry(&self) -> &CloudFoundry<R> {
        &self.cf
    }
}

impl<R: CommandRunner> RemoteOperations for CloudFoundryRemote<R> {
    fn rename_application(&self, old_name: &str, new_name: &str) -> Result<()> {
        Ok(self.cf.rename_app(old_name, new_name)?)
    }

    fn push_application(
        &self,
        name: &str,
        manifest_path: &Path,
        app_path: Option<&Path>,
        no_start: bool,
    ) -> Result<()> {
        Ok(self.cf.push_app(name, manifest_path, app_path, no_start)?)
    }

    fn start_application(&self, name: &str) -> Result<()> {
        Ok(self.cf.start_app(name)?)
    }

    fn stop_application(&self, name: &str) -> Result<()> {
        Ok(self.cf.stop_app(name)?)
    }

    fn delete_application(&self, name: &str) -> Result<()> {
        Ok(self.cf.delete_app(name)?)
    }

    fn does_app_exist(&self, name: &str) -> Result<bool> {
        Ok(self.cf.app_exists(name)?)
    }

    fn get_app_metadata(&self, name: &str) -> Result<Option<AppMetadata>> {
        let summary = self.cf.app_summary(name)?;
        Ok(summary.map(|summary| AppMetadata {
            state: summary.state,
        }))
    }

    fn get_app_route(&self, name: &str) -> Result<AppRoute> {
        let Route { host, domain } = self.cf.app_route(name)?;
        Ok(AppRoute { host, domain })
    }

    fn map_route(&self, name: &str, route: &AppRoute) -> Result<()> {
        Ok(self.cf.map_route(name, &cf_route(route))?)
    }

    fn unmap_route(&self, name: &str, route: &AppRoute) -> Result<()> {
        Ok(self.cf.unmap_route(name, &cf_route(route))?)
    }

    fn list_applications(&self) -> Result<()> {
        Ok(self.cf.list_apps()?)
    }
}

fn cf_route(route: &AppRoute) -> Route {
    Route {
        host: route.host.clone(),
        domain: route.domain.clone(),
    }
}

use std::path::PathBuf;

use tracing::info;

use super::{list_applications, run_plan};
use crate::Result;
use crate::context::RolloutContext;
use crate::naming::venerable_app_name;
use crate::plan::{ZeroDowntimeScenario, zero_downtime_plan};
use crate::traits::RemoteOperations;

#[derive(Debug, Clone)]
pub struct ZeroDowntimePushInput {
    pub app_name: String,
    pub manifest_path: PathBuf,
    pub app_path: Option<PathBuf>,
    /// Leave the previous version in place as `<app>-venerable`.
    pub keep_old_app: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZeroDowntimePushOutput {
    pub scenario: ZeroDowntimeScenario,
    pub steps: Vec<String>,
    pub listed: bool,
}

/// Replace a running app without downtime.
///
/// The live app is parked as `<app>-venerable` while the new version is
/// pushed under its name. If the push fails, the parked version is renamed
/// back.
pub struct ZeroDowntimePushOperation<R> {
    remote: R,
}

impl<R> ZeroDowntimePushOperation<R>
where
    R: RemoteOperations + 'static,
{
    #[must_use]
    pub fn new(remote: R) -> Self {
        Self { remote }
    }

    #[must_use]
    pub fn remote(&self) -> &R {
        &self.remote
    }

    /// # Errors
    ///
    /// Returns an error if the remote state cannot be read or the rollout
    /// fails. Failing to list the apps afterwards is not an error.
    pub fn execute(&self, input: &ZeroDowntimePushInput) -> Result<ZeroDowntimePushOutput> {
        let scenario = self.observe(&input.app_name)?;
        info!(app = %input.app_name, scenario = %scenario, "starting zero-downtime push");

        let plan = zero_downtime_plan::<R>(scenario, input.keep_old_app);
        let mut state = RolloutContext::new(
            input.app_name.clone(),
            input.manifest_path.clone(),
            venerable_app_name(&input.app_name),
        )
        .with_app_path(input.app_path.clone());

        let steps = run_plan(&plan, &self.remote, &mut state)?;
        let listed = list_applications(&self.remote);

        Ok(ZeroDowntimePushOutput {
            scenario,
            steps,
            listed,
        })
    }

    fn observe(&self, app_name: &str) -> Result<ZeroDowntimeScenario> {
        let live_app = if self.remote.does_app_exist(app_name)? {
            self.remote.get_app_metadata(app_name)?
        } else {
            None
        };
        let venerable_exists = self.remote.does_app_exist(&venerable_app_name(app_name))?;

        Ok(ZeroDowntimeScenario::decide(live_app.as_ref(), venerable_exists))
    }
}

use std::path::PathBuf;

use tracing::info;

use super::{list_applications, run_plan};
use crate::Result;
use crate::context::RolloutContext;
use crate::naming::{Generation, generation_app_name};
use crate::plan::{BlueGreenScenario, blue_green_plan};
use crate::traits::RemoteOperations;

#[derive(Debug, Clone)]
pub struct BlueGreenPushInput {
    pub app_name: String,
    pub manifest_path: PathBuf,
    pub app_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlueGreenPushOutput {
    pub scenario: BlueGreenScenario,
    pub steps: Vec<String>,
    pub listed: bool,
}

/// Push a new version while keeping the two previous ones.
///
/// The live app becomes `<app>-g1` and the former `<app>-g1` becomes
/// `<app>-g2`, so either can be rolled back to. The oldest `<app>-g2` is
/// deleted.
pub struct BlueGreenPushOperation<R> {
    remote: R,
}

impl<R> BlueGreenPushOperation<R>
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
    pub fn execute(&self, input: &BlueGreenPushInput) -> Result<BlueGreenPushOutput> {
        let app_name = &input.app_name;
        let generation_one = generation_app_name(app_name, Generation::G1);
        let generation_two = generation_app_name(app_name, Generation::G2);

        let scenario = BlueGreenScenario::decide(
            self.remote.does_app_exist(app_name)?,
            self.remote.does_app_exist(&generation_one)?,
            self.remote.does_app_exist(&generation_two)?,
        );
        info!(app = %app_name, scenario = %scenario, "starting blue/green push");

        let plan = blue_green_plan::<R>(scenario);
        let mut state = RolloutContext::new(
            app_name.clone(),
            input.manifest_path.clone(),
            generation_one,
        )
        .with_app_path(input.app_path.clone());

        let steps = run_plan(&plan, &self.remote, &mut state)?;
        let listed = list_applications(&self.remote);

        Ok(BlueGreenPushOutput {
            scenario,
            steps,
            listed,
        })
    }
}

use tracing::info;

use super::run_plan;
use crate::context::RollbackContext;
use crate::naming::Generation;
use crate::plan::rollback_plan;
use crate::traits::RemoteOperations;
use crate::{OperationError, Result};

#[derive(Debug, Clone)]
pub struct BlueGreenRollbackInput {
    pub app_name: String,
    pub generation: Generation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlueGreenRollbackOutput {
    pub app_name: String,
    /// Name the former live app now carries.
    pub generation_name: String,
    pub host_name: Option<String>,
    pub steps: Vec<String>,
}

/// Make a retained generation live again.
///
/// Nothing is rewound if a step fails part way.
pub struct BlueGreenRollbackOperation<R> {
    remote: R,
}

impl<R> BlueGreenRollbackOperation<R>
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
    /// Returns [`OperationError::AppNotFound`] if the live app does not exist,
    /// or the error of the first step that fails.
    pub fn execute(&self, input: &BlueGreenRollbackInput) -> Result<BlueGreenRollbackOutput> {
        if !self.remote.does_app_exist(&input.app_name)? {
            return Err(OperationError::AppNotFound {
                name: input.app_name.clone(),
            });
        }

        let mut state = RollbackContext::new(input.app_name.clone(), input.generation);
        info!(
            app = %state.app_name,
            generation = %state.generation_name,
            "starting blue/green rollback"
        );

        let steps = run_plan(&rollback_plan::<R>(), &self.remote, &mut state)?;

        Ok(BlueGreenRollbackOutput {
            app_name: state.app_name,
            generation_name: state.generation_name,
            host_name: state.host_name,
            steps,
        })
    }
}

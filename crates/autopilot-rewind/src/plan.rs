use std::fmt::{Debug, Display};

use tracing::{debug, warn};

use crate::audit::RewindAuditLog;
use crate::error::RewindError;
use crate::step::RewindStep;

pub(crate) type BoxedStep<Ctx, State, Err> =
    Box<dyn RewindStep<Context = Ctx, State = State, Error = Err>>;

/// An ordered list of steps ready for execution.
///
/// Steps run one at a time in insertion order. Execution stops at the first
/// failing step; if that step defines a compensation it is invoked exactly
/// once, and no later step ever runs.
pub struct Plan<Ctx, State, Err> {
    steps: Vec<BoxedStep<Ctx, State, Err>>,
    rewind_failure_message: Option<String>,
}

impl<Ctx, State, Err> Plan<Ctx, State, Err>
where
    Err: Debug + Display,
{
    pub(crate) fn from_steps(
        steps: Vec<BoxedStep<Ctx, State, Err>>,
        rewind_failure_message: Option<String>,
    ) -> Self {
        Self {
            steps,
            rewind_failure_message,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Names of the steps in execution order.
    #[must_use]
    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|step| step.name()).collect()
    }

    #[must_use]
    pub fn rewind_failure_message(&self) -> Option<&str> {
        self.rewind_failure_message.as_deref()
    }

    /// Execute the plan.
    ///
    /// # Errors
    ///
    /// Returns `RewindError::StepFailed` carrying the step's own error if a step
    /// fails and it either has no compensation or its compensation succeeds.
    /// Returns `RewindError::CompensationFailed` if the compensation fails too.
    pub fn execute(&self, ctx: &Ctx, state: &mut State) -> Result<(), RewindError<Err>> {
        let (result, _audit_log) = self.execute_internal(ctx, state);
        result
    }

    /// Execute the plan and return both the result and an audit log.
    pub fn execute_with_audit(
        &self,
        ctx: &Ctx,
        state: &mut State,
    ) -> (Result<(), RewindError<Err>>, RewindAuditLog) {
        self.execute_internal(ctx, state)
    }

    fn execute_internal(
        &self,
        ctx: &Ctx,
        state: &mut State,
    ) -> (Result<(), RewindError<Err>>, RewindAuditLog) {
        let mut audit_log = RewindAuditLog::new();

        for step in &self.steps {
            audit_log.record_start(step.name());
            debug!(step = step.name(), "running step");

            if let Err(error) = step.forward(ctx, state) {
                let rewind_error = self.rewind(ctx, state, &mut audit_log, step.as_ref(), error);
                return (Err(rewind_error), audit_log);
            }

            audit_log.record_success();
        }

        (Ok(()), audit_log)
    }

    fn rewind(
        &self,
        ctx: &Ctx,
        state: &mut State,
        audit_log: &mut RewindAuditLog,
        step: &dyn RewindStep<Context = Ctx, State = State, Error = Err>,
        step_error: Err,
    ) -> RewindError<Err> {
        let name = step.name();

        if !step.has_compensation() {
            audit_log.record_failure();
            debug!(step = name, error = %step_error, "step failed, nothing to rewind");
            return RewindError::StepFailed {
                step: name.to_string(),
                error: step_error,
                compensated: false,
            };
        }

        let description = step.compensation_description();
        warn!(step = name, error = %step_error, compensation = %description, "step failed, rewinding");

        match step.compensate(ctx, state) {
            Ok(()) => {
                audit_log.record_compensated(description);
                RewindError::StepFailed {
                    step: name.to_string(),
                    error: step_error,
                    compensated: true,
                }
            }
            Err(compensation_error) => {
                audit_log.record_compensation_failed(description);
                warn!(step = name, error = %compensation_error, "rewind failed");
                RewindError::CompensationFailed {
                    step: name.to_string(),
                    message: self.rewind_failure_message.clone(),
                    step_error,
                    compensation_error,
                }
            }
        }
    }
}

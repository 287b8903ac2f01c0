use std::fmt::{Debug, Display};

use crate::plan::{BoxedStep, Plan};
use crate::step::RewindStep;

/// Builder for constructing plans.
///
/// All steps of a plan share the same context, state and error types, which
/// the compiler checks as each step is added.
pub struct PlanBuilder<Ctx, State, Err> {
    steps: Vec<BoxedStep<Ctx, State, Err>>,
    rewind_failure_message: Option<String>,
}

impl<Ctx, State, Err> PlanBuilder<Ctx, State, Err> {
    /// Create a new empty plan builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            rewind_failure_message: None,
        }
    }

    /// Append a step to the plan.
    #[must_use]
    pub fn step<S>(mut self, step: S) -> Self
    where
        S: RewindStep<Context = Ctx, State = State, Error = Err> + 'static,
    {
        self.steps.push(Box::new(step));
        self
    }

    /// Append a step only when `condition` holds.
    #[must_use]
    pub fn step_if<S>(self, condition: bool, step: S) -> Self
    where
        S: RewindStep<Context = Ctx, State = State, Error = Err> + 'static,
    {
        if condition { self.step(step) } else { self }
    }

    /// Message prefixed to the compensation error when a compensation fails.
    #[must_use]
    pub fn rewind_failure_message(mut self, message: impl Into<String>) -> Self {
        self.rewind_failure_message = Some(message.into());
        self
    }

    /// Build the plan from the accumulated steps.
    #[must_use]
    pub fn build(self) -> Plan<Ctx, State, Err>
    where
        Err: Debug + Display,
    {
        Plan::from_steps(self.steps, self.rewind_failure_message)
    }
}

impl<Ctx, State, Err> Default for PlanBuilder<Ctx, State, Err> {
    fn default() -> Self {
        Self::new()
    }
}

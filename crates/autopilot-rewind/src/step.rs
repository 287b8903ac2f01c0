/// A step in a plan that can run forward and, optionally, compensate.
///
/// Unlike a classic saga step, the compensation of a step does not undo the
/// step itself. It runs only when this step's own `forward` fails and
/// reverses the effect of the step executed immediately before it. A plan
/// that needs a deeper rollback encodes it inside a single compensation.
///
/// # Type Parameters
///
/// - `Context`: Shared dependencies (injected, never mutated by steps)
/// - `State`: Per-run data threaded through every step of the plan
/// - `Error`: The error type for step failures
pub trait RewindStep: Send + Sync {
    /// Shared context providing dependencies.
    type Context;

    /// Mutable state shared by all steps of one plan execution.
    type State;

    /// Error type for step failures.
    type Error;

    /// Human-readable name for logging and error messages.
    fn name(&self) -> &'static str;

    /// Run the step.
    ///
    /// # Errors
    ///
    /// Returns an error if the step fails to complete.
    fn forward(&self, ctx: &Self::Context, state: &mut Self::State) -> Result<(), Self::Error>;

    /// Whether this step defines a compensation.
    ///
    /// Steps without one stop the plan and surface their failure verbatim.
    fn has_compensation(&self) -> bool {
        false
    }

    /// Reverse the effect of the previous step after this step's `forward` failed.
    ///
    /// Only called when [`has_compensation`](Self::has_compensation) returns `true`.
    ///
    /// # Errors
    ///
    /// Returns an error if compensation fails.
    fn compensate(&self, ctx: &Self::Context, state: &mut Self::State) -> Result<(), Self::Error> {
        let _ = (ctx, state);
        Ok(())
    }

    /// Human-readable description of what compensation will do.
    fn compensation_description(&self) -> String {
        format!("undo the step before {}", self.name())
    }
}

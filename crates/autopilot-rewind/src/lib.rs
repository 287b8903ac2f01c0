//! Ordered step execution with single-step compensation.
//!
//! A [`Plan`] runs its steps strictly in sequence and stops at the first
//! failure. The failing step may define a compensation that reverses the
//! effect of the step before it; only that one compensation runs. Steps share
//! a caller-owned mutable state, so a value discovered by an early step can
//! steer what a later step (or its compensation) does.

mod audit;
mod builder;
mod error;
mod plan;
mod step;

pub use audit::{RewindAuditLog, StepRecord, StepStatus};
pub use builder::PlanBuilder;
pub use error::{Outcome, RewindError};
pub use plan::Plan;
pub use step::RewindStep;

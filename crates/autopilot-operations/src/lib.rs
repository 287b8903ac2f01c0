//! Rollout plans and operations for cf-autopilot.
//!
//! Each operation observes the remote state once, picks the matching plan and
//! runs it on the single-step rewind executor from `autopilot-rewind`.

pub mod context;
mod error;
pub mod naming;
pub mod operations;
pub mod plan;
pub mod providers;
pub mod steps;
pub mod traits;

#[cfg(test)]
pub mod mocks;

pub use error::{OperationError, Result};

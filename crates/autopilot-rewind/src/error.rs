use std::fmt::{Debug, Display};

use thiserror::Error;

/// Terminal state of a plan execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every step ran forward successfully.
    AllSucceeded,
    /// A step failed and its compensation succeeded.
    FailedCompensated,
    /// A step failed and either had no compensation or its compensation failed.
    FailedUncompensated,
}

impl Outcome {
    /// Classify the result of [`Plan::execute`](crate::Plan::execute).
    #[must_use]
    pub fn of<E: Debug + Display>(result: &Result<(), RewindError<E>>) -> Self {
        match result {
            Ok(()) => Self::AllSucceeded,
            Err(err) => err.outcome(),
        }
    }
}

/// Error from plan execution.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RewindError<E: Debug + Display> {
    /// A step failed. Displays as the step's own error.
    #[error("{error}")]
    StepFailed {
        /// Name of the step that failed.
        step: String,
        /// The error returned by the step's forward action.
        error: E,
        /// Whether the step's compensation ran and succeeded.
        compensated: bool,
    },

    /// A step failed and its compensation failed as well.
    ///
    /// Displays as `"<message>: <compensation error>"` when the plan has a
    /// rewind failure message, otherwise as the compensation error alone.
    #[error("{}", rewind_failure_text(.message.as_deref(), .compensation_error))]
    CompensationFailed {
        /// Name of the step that originally failed.
        step: String,
        /// The plan's rewind failure message, if one was configured.
        message: Option<String>,
        /// The error from the failed step.
        step_error: E,
        /// The error from the failed compensation.
        compensation_error: E,
    },
}

impl<E: Debug + Display> RewindError<E> {
    /// Name of the step whose forward action failed.
    #[must_use]
    pub fn step(&self) -> &str {
        match self {
            Self::StepFailed { step, .. } | Self::CompensationFailed { step, .. } => step,
        }
    }

    #[must_use]
    pub fn outcome(&self) -> Outcome {
        match self {
            Self::StepFailed {
                compensated: true, ..
            } => Outcome::FailedCompensated,
            Self::StepFailed { .. } | Self::CompensationFailed { .. } => {
                Outcome::FailedUncompensated
            }
        }
    }
}

fn rewind_failure_text(message: Option<&str>, compensation_error: &impl Display) -> String {
    match message {
        Some(message) => format!("{message}: {compensation_error}"),
        None => compensation_error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("{0}")]
    struct TestError(String);

    fn compensation_failed(message: Option<&str>) -> RewindError<TestError> {
        RewindError::CompensationFailed {
            step: "push".to_string(),
            message: message.map(str::to_string),
            step_error: TestError("push failed".to_string()),
            compensation_error: TestError("rename failed".to_string()),
        }
    }

    #[test]
    fn step_failed_displays_original_error_verbatim() {
        let err = RewindError::StepFailed {
            step: "push".to_string(),
            error: TestError("disaster".to_string()),
            compensated: true,
        };

        assert_eq!(err.to_string(), "disaster");
    }

    #[test]
    fn compensation_failed_joins_message_and_compensation_error() {
        let err = compensation_failed(Some("rewind failed"));

        assert_eq!(err.to_string(), "rewind failed: rename failed");
    }

    #[test]
    fn compensation_failed_without_message_is_bare_compensation_error() {
        let err = compensation_failed(None);

        assert_eq!(err.to_string(), "rename failed");
    }

    #[test]
    fn outcome_reflects_compensation_result() {
        let compensated = RewindError::StepFailed {
            step: "a".to_string(),
            error: TestError("x".to_string()),
            compensated: true,
        };
        let uncompensated = RewindError::StepFailed {
            step: "a".to_string(),
            error: TestError("x".to_string()),
            compensated: false,
        };

        assert_eq!(compensated.outcome(), Outcome::FailedCompensated);
        assert_eq!(uncompensated.outcome(), Outcome::FailedUncompensated);
        assert_eq!(
            compensation_failed(None).outcome(),
            Outcome::FailedUncompensated
        );
    }

    #[test]
    fn outcome_of_result_covers_success() {
        let succeeded: Result<(), RewindError<TestError>> = Ok(());
        let failed: Result<(), RewindError<TestError>> = Err(compensation_failed(None));

        assert_eq!(Outcome::of(&succeeded), Outcome::AllSucceeded);
        assert_eq!(Outcome::of(&failed), Outcome::FailedUncompensated);
    }

    #[test]
    fn step_name_is_available_for_every_variant() {
        assert_eq!(compensation_failed(None).step(), "push");
    }
}

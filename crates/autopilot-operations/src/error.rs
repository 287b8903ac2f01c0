use autopilot_rewind::RewindError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error(transparent)]
    Remote(#[from] autopilot_cf::CfError),

    #[error("Application: {name} not found")]
    AppNotFound { name: String },

    #[error("can not get hostname of {name}")]
    HostNameUnavailable {
        name: String,
        #[source]
        source: Box<OperationError>,
    },

    #[error("invalid generation '{0}' (expected g1 or g2)")]
    InvalidGeneration(String),

    #[error("step '{step}' failed{}", rewound_suffix(.rewound))]
    StepFailed {
        step: String,
        /// Whether the step's compensation ran and restored the previous state.
        rewound: bool,
        #[source]
        source: Box<OperationError>,
    },

    #[error("step '{step}' failed: {reason}")]
    Interrupted { step: String, reason: String },

    /// The failing step's compensation failed as well.
    ///
    /// Displays the rewind failure message followed by the compensation error;
    /// the original step error is kept as the source.
    #[error("{}", rewind_failure_text(.message.as_deref(), .compensation_error))]
    RewindFailed {
        step: String,
        message: Option<String>,
        #[source]
        step_error: Box<OperationError>,
        compensation_error: Box<OperationError>,
    },
}

pub type Result<T> = std::result::Result<T, OperationError>;

fn rewound_suffix(rewound: &bool) -> &'static str {
    if *rewound {
        "; the previous state was restored"
    } else {
        ""
    }
}

fn rewind_failure_text(message: Option<&str>, compensation_error: &OperationError) -> String {
    match message {
        Some(message) => format!("{message}: {compensation_error}"),
        None => compensation_error.to_string(),
    }
}

impl From<RewindError<OperationError>> for OperationError {
    fn from(err: RewindError<OperationError>) -> Self {
        match err {
            RewindError::StepFailed {
                step,
                error,
                compensated,
            } => Self::StepFailed {
                step,
                rewound: compensated,
                source: Box::new(error),
            },
            RewindError::CompensationFailed {
                step,
                message,
                step_error,
                compensation_error,
            } => Self::RewindFailed {
                step,
                message,
                step_error: Box::new(step_error),
                compensation_error: Box::new(compensation_error),
            },
            other => Self::Interrupted {
                step: other.step().to_string(),
                reason: other.to_string(),
            },
        }
    }
}

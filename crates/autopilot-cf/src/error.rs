use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CfError {
    #[error("failed to run `{program} {command}`")]
    CommandSpawn {
        program: String,
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`cf {command}` failed: {reason}")]
    CommandFailed { command: String, reason: String },

    #[error("invalid JSON in api response")]
    InvalidJson(#[source] serde_json::Error),

    #[error("missing total_results from api response")]
    MissingTotalResults,

    #[error("total_results didn't have a number {value}")]
    InvalidTotalResults { value: String },

    #[error("application '{name}' not found")]
    AppNotFound { name: String },

    #[error("application '{name}' has no routes")]
    NoRoutes { name: String },

    #[error("failed to read cf config '{path}'")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse cf config '{path}'")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot locate cf config: neither CF_HOME nor HOME is set")]
    ConfigNotFound,

    #[error("no space targeted; run `cf target -s <space>` first")]
    NoTargetedSpace,
}

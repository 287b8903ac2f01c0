use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Operation(#[from] autopilot_operations::OperationError),

    #[error("manifest '{0}' does not exist")]
    ManifestNotFound(PathBuf),

    #[error("application path '{0}' does not exist")]
    AppPathNotFound(PathBuf),
}

pub type Result<T> = std::result::Result<T, CliError>;

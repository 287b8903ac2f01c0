mod blue_green_push;
mod blue_green_rollback;
mod zero_downtime_push;

use std::path::Path;

use clap::Subcommand;

use crate::error::{CliError, Result};

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Replace a running app without downtime
    ZeroDowntimePush(zero_downtime_push::ZeroDowntimePushArgs),
    /// Push a new version, keeping the previous two as <APP>-g1 and <APP>-g2
    BlueGreenPush(blue_green_push::BlueGreenPushArgs),
    /// Make a retained generation the live app again
    BlueGreenRollback(blue_green_rollback::BlueGreenRollbackArgs),
}

impl Commands {
    pub(crate) fn execute(self) -> Result<()> {
        match self {
            Self::ZeroDowntimePush(args) => zero_downtime_push::run(args),
            Self::BlueGreenPush(args) => blue_green_push::run(args),
            Self::BlueGreenRollback(args) => blue_green_rollback::run(args),
        }
    }
}

const PUSH_SUCCEEDED: &str = "A new version of your application has successfully been pushed!";

/// Fail before touching the platform if the files to push are missing.
fn ensure_push_inputs_exist(manifest: &Path, app_path: Option<&Path>) -> Result<()> {
    if !manifest.exists() {
        return Err(CliError::ManifestNotFound(manifest.to_path_buf()));
    }
    match app_path {
        Some(app_path) if !app_path.exists() => {
            Err(CliError::AppPathNotFound(app_path.to_path_buf()))
        }
        _ => Ok(()),
    }
}

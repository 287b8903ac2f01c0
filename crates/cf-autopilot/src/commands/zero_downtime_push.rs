use std::path::PathBuf;

use autopilot_operations::operations::{ZeroDowntimePushInput, ZeroDowntimePushOperation};
use autopilot_operations::providers::CloudFoundryRemote;
use clap::Args;
use tracing::debug;

use super::{PUSH_SUCCEEDED, ensure_push_inputs_exist};
use crate::error::Result;

#[derive(Args)]
pub(crate) struct ZeroDowntimePushArgs {
    /// Name of the app to push
    app_name: String,

    /// Path to the app manifest
    #[arg(long = "manifest", short = 'f')]
    manifest: PathBuf,

    /// Path to the app directory or archive
    #[arg(long = "path", short = 'p')]
    app_path: Option<PathBuf>,

    /// Keep the previous version as <APP>-venerable instead of deleting it
    #[arg(long)]
    keep_old_app: bool,
}

pub(crate) fn run(args: ZeroDowntimePushArgs) -> Result<()> {
    ensure_push_inputs_exist(&args.manifest, args.app_path.as_deref())?;

    let operation = ZeroDowntimePushOperation::new(CloudFoundryRemote::connect()?);
    let output = operation.execute(&ZeroDowntimePushInput {
        app_name: args.app_name,
        manifest_path: args.manifest,
        app_path: args.app_path,
        keep_old_app: args.keep_old_app,
    })?;
    debug!(scenario = %output.scenario, steps = ?output.steps, "zero-downtime push finished");

    println!();
    println!("{PUSH_SUCCEEDED}");
    println!();
    Ok(())
}

use std::path::PathBuf;

use autopilot_operations::operations::{BlueGreenPushInput, BlueGreenPushOperation};
use autopilot_operations::providers::CloudFoundryRemote;
use clap::Args;
use tracing::debug;

use super::{PUSH_SUCCEEDED, ensure_push_inputs_exist};
use crate::error::Result;

#[derive(Args)]
pub(crate) struct BlueGreenPushArgs {
    /// Name of the app to push
    app_name: String,

    /// Path to the app manifest
    #[arg(long = "manifest", short = 'f')]
    manifest: PathBuf,

    /// Path to the app directory or archive
    #[arg(long = "path", short = 'p')]
    app_path: Option<PathBuf>,
}

pub(crate) fn run(args: BlueGreenPushArgs) -> Result<()> {
    ensure_push_inputs_exist(&args.manifest, args.app_path.as_deref())?;

    let operation = BlueGreenPushOperation::new(CloudFoundryRemote::connect()?);
    let output = operation.execute(&BlueGreenPushInput {
        app_name: args.app_name,
        manifest_path: args.manifest,
        app_path: args.app_path,
    })?;
    debug!(scenario = %output.scenario, steps = ?output.steps, "blue/green push finished");

    println!();
    println!("{PUSH_SUCCEEDED}");
    println!();
    Ok(())
}

use autopilot_operations::naming::Generation;
use autopilot_operations::operations::{BlueGreenRollbackInput, BlueGreenRollbackOperation};
use autopilot_operations::providers::CloudFoundryRemote;
use clap::Args;

use crate::error::Result;

#[derive(Args)]
pub(crate) struct BlueGreenRollbackArgs {
    /// Name of the live app
    app_name: String,

    /// Generation to make live again (g1 or g2)
    generation: Generation,
}

pub(crate) fn run(args: BlueGreenRollbackArgs) -> Result<()> {
    let operation = BlueGreenRollbackOperation::new(CloudFoundryRemote::connect()?);
    let output = operation.execute(&BlueGreenRollbackInput {
        app_name: args.app_name,
        generation: args.generation,
    })?;

    println!("{} is swapped with {}", output.app_name, output.generation_name);
    Ok(())
}

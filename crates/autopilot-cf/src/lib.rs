pub mod api;
mod client;
mod config;
mod error;
mod runner;
mod types;

pub use client::CloudFoundry;
pub use config::CfConfig;
pub use error::CfError;
pub use runner::{CfCli, CommandRunner};
pub use types::{AppSummary, Route, Space};

pub type Result<T> = std::result::Result<T, CfError>;

/// Client for the space the cf CLI is currently targeting.
///
/// # Errors
///
/// Returns an error if the cf config cannot be loaded or no space is targeted.
pub fn connect() -> Result<CloudFoundry<CfCli>> {
    let space = CfConfig::load()?.target_space()?;
    Ok(CloudFoundry::new(CfCli::new(), space))
}

use std::ffi::OsString;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::{CfError, Result};

const CF_BINARY_ENV: &str = "CF_AUTOPILOT_CF_BINARY";

/// Runs cf CLI commands.
pub trait CommandRunner: Send + Sync {
    /// Run a command with its output shown on the terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be started or exits unsuccessfully.
    fn run(&self, args: &[&str]) -> Result<()>;

    /// Run a command and capture its standard output, one entry per line.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be started or exits unsuccessfully.
    fn run_captured(&self, args: &[&str]) -> Result<Vec<String>>;
}

/// Runs commands through the `cf` executable.
pub struct CfCli {
    program: OsString,
}

impl CfCli {
    /// Use `cf` from `PATH`, or the executable named by `CF_AUTOPILOT_CF_BINARY`.
    #[must_use]
    pub fn new() -> Self {
        let program = std::env::var_os(CF_BINARY_ENV).unwrap_or_else(|| OsString::from("cf"));
        Self { program }
    }

    #[must_use]
    pub fn with_program(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut command = Command::new(&self.program);
        command.args(args);
        command
    }

    fn spawn_error(&self, args: &[&str], source: std::io::Error) -> CfError {
        CfError::CommandSpawn {
            program: self.program.to_string_lossy().into_owned(),
            command: args.join(" "),
            source,
        }
    }
}

impl Default for CfCli {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for CfCli {
    fn run(&self, args: &[&str]) -> Result<()> {
        debug!(command = %args.join(" "), "running cf");
        let status = self
            .command(args)
            .status()
            .map_err(|source| self.spawn_error(args, source))?;

        if !status.success() {
            return Err(CfError::CommandFailed {
                command: subcommand(args),
                reason: status.to_string(),
            });
        }
        Ok(())
    }

    fn run_captured(&self, args: &[&str]) -> Result<Vec<String>> {
        debug!(command = %args.join(" "), "running cf (captured)");
        let output = self
            .command(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| self.spawn_error(args, source))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = match stderr.trim() {
                "" => output.status.to_string(),
                message => message.to_string(),
            };
            return Err(CfError::CommandFailed {
                command: subcommand(args),
                reason,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::to_string)
            .collect())
    }
}

fn subcommand(args: &[&str]) -> String {
    args.first().copied().unwrap_or_default().to_string()
}

//! Command runner adapter for setup lines and the test command.
//!
//! The [`CommandRunner`] trait decouples bisection from process spawning.
//! Tests use scripted runners that return predetermined outcomes without
//! spawning processes.

use std::process::{Command, Stdio};

use anyhow::{Context, Result, bail};
use colored::Colorize;
use tracing::{debug, instrument, warn};

use crate::io::config::ShellConfig;

/// Abstraction over command execution.
pub trait CommandRunner {
    /// Run `command`, returning whether it exited successfully.
    ///
    /// `description` labels the command in output (`line 4`, `test`). An `Err`
    /// means the command could not be run at all, not that it failed.
    fn run(&self, command: &str, description: &str) -> Result<bool>;
}

/// Runner that hands each command to the configured shell (`sh -c` by default).
///
/// Child stdio is inherited; only the exit status is inspected.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    program: String,
    args: Vec<String>,
}

impl ShellRunner {
    pub fn new(shell: &ShellConfig) -> Result<Self> {
        let Some((program, args)) = shell.command.split_first() else {
            bail!("shell.command must be a non-empty array");
        };
        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    fn command(&self, command: &str) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .arg(command)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        cmd
    }
}

impl CommandRunner for ShellRunner {
    #[instrument(skip_all, fields(description = %description))]
    fn run(&self, command: &str, description: &str) -> Result<bool> {
        println!("{}", format!("Running {description}: {command}").cyan());
        debug!(shell = %self.program, command, "spawning shell");
        let status = self
            .command(command)
            .status()
            .with_context(|| format!("run {description} with shell `{}`", self.program))?;
        if !status.success() {
            warn!(exit_code = ?status.code(), description, "command failed");
        }
        Ok(status.success())
    }
}

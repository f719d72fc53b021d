//! Command execution utilities
//!
//! This module provides a unified interface for executing different types of commands
//! (shell commands, scripts, executable with args) with consistent error handling and logging.
//! Process spawning goes through the [`ProcessRunner`] trait so task logic can be
//! exercised without touching the operating system.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::types::{CovtaskError, CovtaskResult};

/// A program and its arguments, kept as OS strings so paths pass through
/// byte for byte
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: OsString,
    pub args: Vec<OsString>,
}

impl CommandLine {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        for arg in args {
            self = self.arg(arg);
        }
        self
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.to_string_lossy())?;
        for arg in &self.args {
            let arg = arg.to_string_lossy();
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " '{}'", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Runs a command to completion
pub trait ProcessRunner {
    /// Block until `command` exits. A non-zero exit is an error.
    fn run(&self, command: &CommandLine, current_dir: &Path) -> CovtaskResult<()>;
}

/// Spawns real processes with inherited stdio
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProcessRunner;

impl ProcessRunner for SystemProcessRunner {
    fn run(&self, command: &CommandLine, current_dir: &Path) -> CovtaskResult<()> {
        debug!(command = %command, dir = %current_dir.display(), "spawning process");

        let status = Command::new(&command.program)
            .args(&command.args)
            .current_dir(current_dir)
            .status()
            .map_err(|source| CovtaskError::Spawn {
                program: command.program.to_string_lossy().into_owned(),
                source,
            })?;

        if !status.success() {
            return Err(CovtaskError::CommandFailed {
                program: command.program.to_string_lossy().into_owned(),
                code: status.code(),
            });
        }

        Ok(())
    }
}

/// Executes task commands from the project root
pub struct CommandExecutor<'a> {
    root: &'a Path,
    runner: &'a dyn ProcessRunner,
}

impl<'a> CommandExecutor<'a> {
    pub fn new(root: &'a Path, runner: &'a dyn ProcessRunner) -> Self {
        Self { root, runner }
    }

    pub fn root(&self) -> &Path {
        self.root
    }

    /// Execute a prepared command line
    pub fn execute(&self, command: &CommandLine) -> CovtaskResult<()> {
        self.runner.run(command, self.root)
    }

    /// Execute a script file
    pub fn execute_script(&self, script_path: &Path) -> CovtaskResult<()> {
        let full_script_path: PathBuf = if script_path.is_relative() {
            self.root.join(script_path)
        } else {
            script_path.to_path_buf()
        };

        if !full_script_path.exists() {
            return Err(CovtaskError::Task(format!(
                "Script file '{}' not found",
                full_script_path.display()
            )));
        }

        self.execute(&CommandLine::new(full_script_path))
    }

    /// Execute a command with arguments
    pub fn execute_command_with_args(&self, program: &str, args: &[String]) -> CovtaskResult<()> {
        self.execute(&CommandLine::new(program).args(args))
    }

    /// Execute a single shell command
    pub fn execute_shell_command(&self, cmd: &str) -> CovtaskResult<()> {
        self.execute(&CommandLine::new("sh").arg("-c").arg(cmd))
    }
}

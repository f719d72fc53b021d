//! Task execution module
//!
//! This module handles the actual execution of tasks including process spawning,
//! dependency ordering, and progress reporting.

pub mod command;
pub mod dependencies;
pub mod runner;

pub use command::{CommandExecutor, CommandLine, ProcessRunner, SystemProcessRunner};
pub use dependencies::{build_task_graph, find_cycles, resolve_execution_order};
pub use runner::TaskRunner;

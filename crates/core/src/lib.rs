//! covtask Core Library
//!
//! This is the core library for `covtask`, a small task runner that drives a C
//! unit-test framework (Ceedling by default) and turns the resulting gcov data
//! into an lcov/genhtml HTML report.
//!
//! ## Architecture
//!
//! - [`project`] - Project loading and the high-level operations
//! - [`execution`] - Dependency ordering and sequential command execution
//! - [`coverage`] - Coverage paths and the lcov/genhtml report steps
//! - [`tasks`] - Task definitions and the built-in task set
//! - [`configs`] - `covtask.yml` parsing and schema
//! - [`results`] - Result types for listings and plans
//! - [`types`] - Common error types and type aliases
//!
//! ## Usage
//!
//! ```rust,no_run
//! use covtask_core::Project;
//!
//! # fn example() -> covtask_core::CovtaskResult<()> {
//! let project = Project::load(".")?;
//! project.run(&["coverage".to_string()])?;
//! # Ok(())
//! # }
//! ```

pub mod configs;
pub mod coverage;
pub mod execution;
pub mod project;
pub mod results;
pub mod tasks;
pub mod types;

// Re-export the main types for easier usage
pub use project::Project;
pub use types::{CovtaskError, CovtaskResult};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A command to run for a task: a shell string or an argv list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Command {
    Single(String),
    Multiple(Vec<String>),
}

/// Actions implemented by covtask itself rather than by an external command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum Builtin {
    /// Capture gcov data with lcov and render it with genhtml
    CoverageReport,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema, Clone)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TaskConfig {
    pub name: String,
    pub description: Option<String>,
    /// Executable path, relative to the project root
    pub script: Option<String>,
    pub command: Option<Command>,
    pub builtin: Option<Builtin>,
    /// Tasks to run first, in order
    pub dependencies: Option<Vec<String>>,
}

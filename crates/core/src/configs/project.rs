use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::configs::tasks::TaskConfig;
use crate::types::{CovtaskError, CovtaskResult};

/// Name of the optional covtask configuration file at the project root
pub const PROJECT_CONFIG_FILE: &str = "covtask.yml";

/// Project file of the test framework; its presence marks a project root
/// when no `covtask.yml` exists
pub const RUNNER_PROJECT_FILE: &str = "project.yml";

#[derive(Debug, Default, Deserialize, Serialize, JsonSchema, Clone)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProjectConfig {
    pub name: Option<String>,
    pub description: Option<String>,
    /// Command prefix used to invoke framework tasks such as `test:all`.
    /// Defaults to `["ceedling"]`.
    pub runner: Option<Vec<String>>,
    /// Task run when no target is given. Defaults to `default`.
    pub default_task: Option<String>,
    pub coverage: Option<CoverageConfig>,
    /// Extra tasks; a task named like a built-in replaces it
    pub tasks: Option<Vec<TaskConfig>>,
}

#[derive(Debug, Default, Deserialize, Serialize, JsonSchema, Clone)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CoverageConfig {
    /// lcov executable. Defaults to `lcov`.
    pub lcov: Option<String>,
    /// genhtml executable. Defaults to `genhtml`.
    pub genhtml: Option<String>,
    /// Patterns passed to `lcov -e` to keep only matching sources.
    /// Empty by default, which skips the extraction step.
    pub include: Option<Vec<String>>,
}

pub fn parse_project_config(yaml_str: &str) -> CovtaskResult<ProjectConfig> {
    let config: ProjectConfig = serde_yaml::from_str(yaml_str)?;

    if let Some(runner) = &config.runner {
        if runner.is_empty() || runner[0].trim().is_empty() {
            return Err(CovtaskError::Config(
                "'runner' must name a program".to_string(),
            ));
        }
    }

    Ok(config)
}

/// JSON schema for `covtask.yml`, pretty printed
pub fn project_config_schema() -> CovtaskResult<String> {
    let schema = schemars::schema_for!(ProjectConfig);
    serde_json::to_string_pretty(&schema)
        .map_err(|e| CovtaskError::Config(format!("Failed to render schema: {}", e)))
}

//! Project loading and the high-level operations front ends call
//!
//! A project is a directory holding either a `covtask.yml` or the test
//! framework's `project.yml`. Loading validates the whole task graph up front,
//! so a bad dependency fails before any command runs.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::configs::project::{
    parse_project_config, ProjectConfig, PROJECT_CONFIG_FILE, RUNNER_PROJECT_FILE,
};
use crate::coverage::{CoveragePaths, CoverageTools};
use crate::execution::command::{ProcessRunner, SystemProcessRunner};
use crate::execution::dependencies::{build_task_graph, find_cycles, resolve_execution_order};
use crate::execution::runner::TaskRunner;
use crate::results::{TaskInfo, TaskListResult, TaskPlanResult};
use crate::tasks::{Task, TaskRegistry, DEFAULT_RUNNER, DEFAULT_TASK};
use crate::types::{CovtaskError, CovtaskResult};

#[derive(Debug)]
pub struct Project {
    pub root: PathBuf,
    pub name: String,
    pub description: Option<String>,
    pub default_task: String,
    pub tasks: TaskRegistry,
    pub coverage: CoverageTools,
}

impl Project {
    /// Load the project rooted at `path`
    pub fn load(path: impl AsRef<Path>) -> CovtaskResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CovtaskError::Project(format!(
                "Project root '{}' does not exist",
                path.display()
            )));
        }
        if !path.is_dir() {
            return Err(CovtaskError::Project(format!(
                "Project root '{}' is not a directory",
                path.display()
            )));
        }
        let root = path.canonicalize()?;

        let config_path = root.join(PROJECT_CONFIG_FILE);
        let config = if config_path.is_file() {
            debug!(config = %config_path.display(), "reading project config");
            let content = fs::read_to_string(&config_path)?;
            if content.trim().is_empty() {
                ProjectConfig::default()
            } else {
                parse_project_config(&content).map_err(|e| {
                    CovtaskError::Config(format!(
                        "Failed to parse {}: {}",
                        config_path.display(),
                        e
                    ))
                })?
            }
        } else if root.join(RUNNER_PROJECT_FILE).is_file() {
            ProjectConfig::default()
        } else {
            return Err(CovtaskError::Project(format!(
                "No {} or {} found in '{}'",
                PROJECT_CONFIG_FILE,
                RUNNER_PROJECT_FILE,
                root.display()
            )));
        };

        let project = Self::from_config(root, config)?;
        info!(
            project = %project.name,
            tasks = project.tasks.len(),
            "loaded project"
        );
        Ok(project)
    }

    /// Build a project from an already parsed configuration
    pub fn from_config(root: PathBuf, config: ProjectConfig) -> CovtaskResult<Self> {
        let runner = config
            .runner
            .clone()
            .unwrap_or_else(|| vec![DEFAULT_RUNNER.to_string()]);
        let mut tasks = TaskRegistry::with_builtins(&runner);

        for task_config in config.tasks.iter().flatten() {
            tasks.insert(Task::from_config(task_config)?);
        }

        let graph = build_task_graph(&tasks)?;
        let cycles = find_cycles(&graph);
        if !cycles.is_empty() {
            let description = cycles
                .iter()
                .map(|cycle| {
                    let mut path = cycle.clone();
                    if let Some(first) = path.first().cloned() {
                        path.push(first);
                    }
                    path.join(" -> ")
                })
                .collect::<Vec<_>>()
                .join("; ");
            return Err(CovtaskError::Cycle(description));
        }

        let default_task = config
            .default_task
            .clone()
            .unwrap_or_else(|| DEFAULT_TASK.to_string());
        if !tasks.contains(&default_task) {
            return Err(CovtaskError::Config(format!(
                "Default task '{}' is not defined",
                default_task
            )));
        }

        let name = config.name.clone().unwrap_or_else(|| {
            root.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| root.display().to_string())
        });
        let coverage = config
            .coverage
            .as_ref()
            .map(CoverageTools::from)
            .unwrap_or_default();

        Ok(Self {
            root,
            name,
            description: config.description.clone(),
            default_task,
            tasks,
            coverage,
        })
    }

    pub fn coverage_paths(&self) -> CoveragePaths {
        CoveragePaths::from_root(&self.root)
    }

    pub fn list_tasks(&self) -> TaskListResult {
        TaskListResult {
            project_name: self.name.clone(),
            project_description: self.description.clone(),
            default_task: self.default_task.clone(),
            tasks: self
                .tasks
                .iter()
                .map(|task| TaskInfo::from_task(task, &self.default_task))
                .collect(),
        }
    }

    pub fn plan(&self, targets: &[String]) -> CovtaskResult<TaskPlanResult> {
        let targets = self.effective_targets(targets);
        let order = resolve_execution_order(&self.tasks, &targets)?;
        Ok(TaskPlanResult { targets, order })
    }

    /// Run targets by spawning real processes
    pub fn run(&self, targets: &[String]) -> CovtaskResult<Vec<String>> {
        self.run_with(targets, &SystemProcessRunner)
    }

    pub fn run_with(
        &self,
        targets: &[String],
        runner: &dyn ProcessRunner,
    ) -> CovtaskResult<Vec<String>> {
        let targets = self.effective_targets(targets);
        TaskRunner::new(&self.root, &self.tasks, &self.coverage, runner).run_targets(&targets)
    }

    fn effective_targets(&self, targets: &[String]) -> Vec<String> {
        if targets.is_empty() {
            vec![self.default_task.clone()]
        } else {
            targets.to_vec()
        }
    }
}

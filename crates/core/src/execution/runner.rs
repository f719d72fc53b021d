//! High-level task runner
//!
//! This module coordinates dependency resolution and command execution for a
//! set of requested targets.

use std::path::Path;

use colored::*;
use tracing::info;

use crate::coverage::{CoveragePaths, CoverageReport, CoverageTools};
use crate::execution::command::{CommandExecutor, ProcessRunner};
use crate::execution::dependencies::resolve_execution_order;
use crate::tasks::{get_task_color, Task, TaskAction, TaskRegistry};
use crate::types::CovtaskResult;

/// Runs tasks and their dependencies strictly in sequence
pub struct TaskRunner<'a> {
    registry: &'a TaskRegistry,
    coverage: &'a CoverageTools,
    executor: CommandExecutor<'a>,
}

impl<'a> TaskRunner<'a> {
    pub fn new(
        root: &'a Path,
        registry: &'a TaskRegistry,
        coverage: &'a CoverageTools,
        runner: &'a dyn ProcessRunner,
    ) -> Self {
        Self {
            registry,
            coverage,
            executor: CommandExecutor::new(root, runner),
        }
    }

    /// Run `targets` and everything they depend on. The first failure aborts
    /// the chain. Returns the names of the tasks that ran, in order.
    pub fn run_targets(&self, targets: &[String]) -> CovtaskResult<Vec<String>> {
        let order = resolve_execution_order(self.registry, targets)?;

        for name in &order {
            if let Some(task) = self.registry.get(name) {
                self.run_task(task)?;
            }
        }

        Ok(order)
    }

    fn run_task(&self, task: &Task) -> CovtaskResult<()> {
        let task_color = get_task_color(&task.name);

        println!();
        println!(
            "┌─ {} {}",
            "Running task".bold(),
            task.name.color(task_color).bold()
        );
        if let Some(description) = &task.description {
            println!("└─ {}", description.bright_black());
        }

        info!(task = %task.name, action = task.action.kind(), "running task");

        match &task.action {
            TaskAction::Noop => {}
            TaskAction::Shell(cmd) => self.executor.execute_shell_command(cmd)?,
            TaskAction::Exec { program, args } => {
                self.executor.execute_command_with_args(program, args)?
            }
            TaskAction::Script(path) => self.executor.execute_script(path)?,
            TaskAction::CoverageReport => {
                let paths = CoveragePaths::from_root(self.executor.root());
                CoverageReport::new(self.coverage, paths).run(&self.executor)?
            }
        }

        println!(
            "{} {}",
            "✓".green().bold(),
            format!("Completed {}", task.name).color(task_color)
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;

    use super::*;
    use crate::execution::command::testing::RecordingRunner;
    use crate::tasks::DEFAULT_RUNNER;

    fn builtins() -> TaskRegistry {
        TaskRegistry::with_builtins(&[DEFAULT_RUNNER.to_string()])
    }

    #[test]
    fn test_default_runs_both_dependencies() {
        let temp_dir = tempfile::tempdir().unwrap();
        let registry = builtins();
        let tools = CoverageTools::default();
        let recorder = RecordingRunner::succeeding();
        let runner = TaskRunner::new(temp_dir.path(), &registry, &tools, &recorder);

        let ran = runner.run_targets(&["default".to_string()]).unwrap();

        assert_eq!(ran, vec!["test:all", "release", "default"]);
        assert_eq!(
            recorder.rendered(),
            vec!["ceedling test:all", "ceedling release"]
        );
    }

    #[test]
    fn test_default_fails_when_a_dependency_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        let registry = builtins();
        let tools = CoverageTools::default();
        let recorder = RecordingRunner::failing_when(|command| {
            command.args.iter().any(|arg| arg == "test:all").then_some(1)
        });
        let runner = TaskRunner::new(temp_dir.path(), &registry, &tools, &recorder);

        let err = runner.run_targets(&["default".to_string()]).unwrap_err();

        assert_eq!(err.exit_code(), 1);
        assert_eq!(recorder.rendered(), vec!["ceedling test:all"]);
    }

    #[test]
    fn test_coverage_chain() {
        let temp_dir = tempfile::tempdir().unwrap();
        let registry = builtins();
        let tools = CoverageTools::default();
        let recorder = RecordingRunner::succeeding();
        let runner = TaskRunner::new(temp_dir.path(), &registry, &tools, &recorder);

        runner.run_targets(&["coverage".to_string()]).unwrap();

        let calls = recorder.calls.borrow();
        let programs: Vec<String> = calls
            .iter()
            .map(|c| c.program.to_string_lossy().into_owned())
            .collect();
        assert_eq!(programs, vec!["ceedling", "lcov", "lcov", "genhtml"]);
        assert_eq!(calls[0].args, vec![OsString::from("gcov:all")]);
    }

    #[test]
    fn test_failed_instrumented_run_skips_report() {
        let temp_dir = tempfile::tempdir().unwrap();
        let registry = builtins();
        let tools = CoverageTools::default();
        let recorder = RecordingRunner::failing_when(|command| {
            (command.program == "ceedling").then_some(4)
        });
        let runner = TaskRunner::new(temp_dir.path(), &registry, &tools, &recorder);

        let err = runner.run_targets(&["coverage".to_string()]).unwrap_err();

        assert_eq!(err.exit_code(), 4);
        assert_eq!(recorder.calls.borrow().len(), 1);
    }

    #[test]
    fn test_tasks_run_once_across_targets() {
        let temp_dir = tempfile::tempdir().unwrap();
        let registry = builtins();
        let tools = CoverageTools::default();
        let recorder = RecordingRunner::succeeding();
        let runner = TaskRunner::new(temp_dir.path(), &registry, &tools, &recorder);

        runner
            .run_targets(&["test:all".to_string(), "default".to_string()])
            .unwrap();

        assert_eq!(
            recorder.rendered(),
            vec!["ceedling test:all", "ceedling release"]
        );
    }
}

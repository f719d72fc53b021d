//! Task definitions, the built-in task set and task color management
//!
//! Tasks live in a [`TaskRegistry`] that keeps declaration order. The built-in
//! set mirrors the framework tasks a Ceedling project exposes plus the local
//! `cov_report` task and the two aggregates `default` and `coverage`.

use std::path::PathBuf;

use colored::Color;

use crate::configs::tasks::{Builtin, Command as TaskCommand, TaskConfig};
use crate::types::{CovtaskError, CovtaskResult};

pub const DEFAULT_TASK: &str = "default";
pub const COVERAGE_TASK: &str = "coverage";
pub const COVERAGE_REPORT_TASK: &str = "cov_report";
pub const TEST_ALL_TASK: &str = "test:all";
pub const RELEASE_TASK: &str = "release";
pub const GCOV_ALL_TASK: &str = "gcov:all";

/// Runner prefix used when the project does not configure one
pub const DEFAULT_RUNNER: &str = "ceedling";

/// What a task does once its dependencies have run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskAction {
    /// Aggregate task with dependencies only
    Noop,
    /// Run through `sh -c`
    Shell(String),
    Exec {
        program: String,
        args: Vec<String>,
    },
    /// Executable path, relative paths resolve against the project root
    Script(PathBuf),
    CoverageReport,
}

impl TaskAction {
    pub fn from_config(config: &TaskConfig) -> CovtaskResult<Self> {
        let declared = [
            config.script.is_some(),
            config.command.is_some(),
            config.builtin.is_some(),
        ]
        .iter()
        .filter(|set| **set)
        .count();

        if declared > 1 {
            return Err(CovtaskError::Config(format!(
                "Task '{}' must declare only one of 'script', 'command' or 'builtin'",
                config.name
            )));
        }

        let action = if let Some(script) = &config.script {
            TaskAction::Script(PathBuf::from(script))
        } else if let Some(command) = &config.command {
            match command {
                TaskCommand::Single(cmd) => TaskAction::Shell(cmd.clone()),
                TaskCommand::Multiple(cmds) => match cmds.split_first() {
                    Some((program, args)) => TaskAction::Exec {
                        program: program.clone(),
                        args: args.to_vec(),
                    },
                    None => TaskAction::Noop,
                },
            }
        } else if let Some(Builtin::CoverageReport) = config.builtin {
            TaskAction::CoverageReport
        } else {
            TaskAction::Noop
        };

        Ok(action)
    }

    /// Short label used in listings
    pub fn kind(&self) -> &'static str {
        match self {
            TaskAction::Noop => "aggregate",
            TaskAction::Shell(_) => "shell",
            TaskAction::Exec { .. } => "command",
            TaskAction::Script(_) => "script",
            TaskAction::CoverageReport => "builtin",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub name: String,
    pub description: Option<String>,
    pub dependencies: Vec<String>,
    pub action: TaskAction,
}

impl Task {
    pub fn from_config(config: &TaskConfig) -> CovtaskResult<Self> {
        if config.name.trim().is_empty() {
            return Err(CovtaskError::Config("Task name must not be empty".to_string()));
        }

        Ok(Self {
            name: config.name.clone(),
            description: config.description.clone(),
            dependencies: config.dependencies.clone().unwrap_or_default(),
            action: TaskAction::from_config(config)?,
        })
    }
}

/// Ordered set of named tasks
#[derive(Debug, Clone, Default)]
pub struct TaskRegistry {
    tasks: Vec<Task>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with the framework tasks, `cov_report` and the
    /// `default` and `coverage` chains.
    pub fn with_builtins(runner: &[String]) -> Self {
        let mut registry = Self::new();

        for (name, description) in [
            (TEST_ALL_TASK, "Run all unit tests"),
            (RELEASE_TASK, "Build the release artifact"),
            (GCOV_ALL_TASK, "Run all unit tests with gcov instrumentation"),
        ] {
            registry
                .define(name, &[], runner_action(runner, name))
                .description = Some(description.to_string());
        }

        registry
            .define(COVERAGE_REPORT_TASK, &[], TaskAction::CoverageReport)
            .description = Some("Capture gcov data with lcov and render an HTML report".to_string());
        registry
            .define(DEFAULT_TASK, &[TEST_ALL_TASK, RELEASE_TASK], TaskAction::Noop)
            .description = Some("Run all tests, then build the release".to_string());
        registry
            .define(COVERAGE_TASK, &[GCOV_ALL_TASK, COVERAGE_REPORT_TASK], TaskAction::Noop)
            .description = Some("Run instrumented tests and render the coverage report".to_string());

        registry
    }

    /// Register a task. Redefining a name replaces the earlier task in place.
    pub fn define(&mut self, name: &str, dependencies: &[&str], action: TaskAction) -> &mut Task {
        self.insert(Task {
            name: name.to_string(),
            description: None,
            dependencies: dependencies.iter().map(|d| d.to_string()).collect(),
            action,
        })
    }

    pub fn insert(&mut self, task: Task) -> &mut Task {
        let index = match self.tasks.iter().position(|t| t.name == task.name) {
            Some(index) => {
                self.tasks[index] = task;
                index
            }
            None => {
                self.tasks.push(task);
                self.tasks.len() - 1
            }
        };
        &mut self.tasks[index]
    }

    pub fn get(&self, name: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

fn runner_action(runner: &[String], task_name: &str) -> TaskAction {
    match runner.split_first() {
        Some((program, prefix)) => {
            let mut args = prefix.to_vec();
            args.push(task_name.to_string());
            TaskAction::Exec {
                program: program.clone(),
                args,
            }
        }
        None => TaskAction::Exec {
            program: DEFAULT_RUNNER.to_string(),
            args: vec![task_name.to_string()],
        },
    }
}

/// Get a consistent color for a task name
pub fn get_task_color(task_name: &str) -> Color {
    let hash = task_name
        .bytes()
        .fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));

    // Label colors that stay clear of the red/yellow/green used for status
    let colors = [
        Color::TrueColor {
            r: 147,
            g: 112,
            b: 219,
        },
        Color::TrueColor {
            r: 64,
            g: 224,
            b: 208,
        },
        Color::TrueColor {
            r: 255,
            g: 140,
            b: 0,
        },
        Color::TrueColor {
            r: 199,
            g: 21,
            b: 133,
        },
        Color::TrueColor {
            r: 72,
            g: 209,
            b: 204,
        },
        Color::TrueColor {
            r: 138,
            g: 43,
            b: 226,
        },
    ];

    colors[(hash % colors.len() as u64) as usize]
}

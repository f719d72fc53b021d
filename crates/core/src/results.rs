//! Result types for project operations
//!
//! This module contains the output structures returned by [`Project`](crate::project::Project)
//! queries, for front ends to render.

use colored::Color;

use crate::tasks::Task;

/// A registered task as shown in listings
#[derive(Debug, Clone)]
pub struct TaskInfo {
    pub name: String,
    pub description: Option<String>,
    pub dependencies: Vec<String>,
    pub kind: &'static str,
    pub color: Color,
    pub is_default: bool,
}

#[derive(Debug)]
pub struct TaskListResult {
    pub project_name: String,
    pub project_description: Option<String>,
    pub default_task: String,
    pub tasks: Vec<TaskInfo>,
}

/// Execution order for a set of targets, computed without running anything
#[derive(Debug)]
pub struct TaskPlanResult {
    pub targets: Vec<String>,
    pub order: Vec<String>,
}

impl TaskInfo {
    pub fn from_task(task: &Task, default_task: &str) -> Self {
        Self {
            name: task.name.clone(),
            description: task.description.clone(),
            dependencies: task.dependencies.clone(),
            kind: task.action.kind(),
            color: crate::tasks::get_task_color(&task.name),
            is_default: task.name == default_task,
        }
    }
}

use anyhow::Result;
use colored::*;
use covtask_core::Project;

pub fn execute(project: &Project) -> Result<()> {
    let result = project.list_tasks();

    println!(
        "{} {}",
        "Tasks for".bold().underline(),
        result.project_name.bold().underline()
    );
    if let Some(description) = &result.project_description {
        println!("{}", description.dimmed());
    }
    println!();

    if result.tasks.is_empty() {
        println!("  {}", "No tasks found".dimmed());
        return Ok(());
    }

    for task in &result.tasks {
        let marker = if task.is_default {
            " (default)".green().to_string()
        } else {
            String::new()
        };
        println!(
            "{}{} {}",
            task.name.color(task.color).bold(),
            marker,
            format!("[{}]", task.kind).dimmed()
        );

        if let Some(description) = &task.description {
            println!("  {}", description);
        }
        if !task.dependencies.is_empty() {
            println!("  {} {}", "depends on:".dimmed(), task.dependencies.join(", "));
        }
    }

    Ok(())
}

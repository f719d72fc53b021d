use anyhow::Result;
use colored::*;
use covtask_core::Project;

pub fn execute(project: &Project, tasks: &[String]) -> Result<()> {
    let label = if tasks.is_empty() {
        project.default_task.clone()
    } else {
        tasks.join(" ")
    };
    println!("{} {}", "Running".bold(), label.cyan());

    let ran = project.run(tasks)?;

    println!();
    println!(
        "{} {}",
        "✓".green().bold(),
        format!("{} task(s) completed successfully!", ran.len())
            .green()
            .bold()
    );

    Ok(())
}

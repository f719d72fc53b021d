use anyhow::Result;
use colored::*;
use covtask_core::Project;

pub fn execute(project: &Project, tasks: &[String]) -> Result<()> {
    let plan = project.plan(tasks)?;

    println!(
        "{} {}",
        "Execution plan for".bold(),
        plan.targets.join(" ").cyan()
    );

    println!("\n{}:", "Execution order".bold());
    for (i, task) in plan.order.iter().enumerate() {
        println!("  {}. {}", i + 1, task);
    }

    Ok(())
}

use anyhow::Result;
use colored::*;
use covtask_core::Project;

pub fn execute(project: &Project) -> Result<()> {
    let paths = project.coverage_paths();

    println!("{} {}", "report dir:".bold(), paths.report_dir.display());
    println!("{} {}", "gcov data: ".bold(), paths.gcov_data_dir.display());
    println!("{} {}", "temp file: ".bold(), paths.tmp_file.display());
    println!("{} {}", "html:      ".bold(), paths.html_dir().display());

    Ok(())
}

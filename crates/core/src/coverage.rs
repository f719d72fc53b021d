//! lcov/genhtml coverage report
//!
//! The report task captures the gcov counters of an instrumented test run into a
//! temporary trace file, prints a summary of it and renders it as HTML:
//!
//! ```text
//! lcov -q -d <root>/build/gcov/out -c -o <root>/build/artifacts/test/cov.tmp -b .
//! lcov -q -l <root>/build/artifacts/test/cov.tmp
//! genhtml <root>/build/artifacts/test/cov.tmp -o <root>/build/artifacts/test/html
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::configs::project::CoverageConfig;
use crate::execution::command::{CommandExecutor, CommandLine};
use crate::types::CovtaskResult;

const REPORT_DIR: [&str; 3] = ["build", "artifacts", "test"];
const GCOV_DATA_DIR: [&str; 3] = ["build", "gcov", "out"];
const TMP_FILE_NAME: &str = "cov.tmp";
const HTML_DIR_NAME: &str = "html";

/// File-system locations used by the coverage report, derived from a root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoveragePaths {
    pub report_dir: PathBuf,
    pub gcov_data_dir: PathBuf,
    pub tmp_file: PathBuf,
}

impl CoveragePaths {
    pub fn from_root(root: &Path) -> Self {
        let report_dir = join_all(root, &REPORT_DIR);
        let gcov_data_dir = join_all(root, &GCOV_DATA_DIR);
        let tmp_file = report_dir.join(TMP_FILE_NAME);

        Self {
            report_dir,
            gcov_data_dir,
            tmp_file,
        }
    }

    pub fn html_dir(&self) -> PathBuf {
        self.report_dir.join(HTML_DIR_NAME)
    }
}

fn join_all(root: &Path, segments: &[&str]) -> PathBuf {
    segments
        .iter()
        .fold(root.to_path_buf(), |path, segment| path.join(segment))
}

/// External programs used by the report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageTools {
    pub lcov: String,
    pub genhtml: String,
    /// `lcov -e` patterns; empty skips extraction
    pub include: Vec<String>,
}

impl Default for CoverageTools {
    fn default() -> Self {
        Self {
            lcov: "lcov".to_string(),
            genhtml: "genhtml".to_string(),
            include: Vec::new(),
        }
    }
}

impl From<&CoverageConfig> for CoverageTools {
    fn from(config: &CoverageConfig) -> Self {
        let defaults = Self::default();
        Self {
            lcov: config.lcov.clone().unwrap_or(defaults.lcov),
            genhtml: config.genhtml.clone().unwrap_or(defaults.genhtml),
            include: config.include.clone().unwrap_or_default(),
        }
    }
}

/// One external invocation of the report
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverageStep {
    Capture(CommandLine),
    Extract(CommandLine),
    /// Diagnostic only; a failure does not stop the report
    List(CommandLine),
    Render(CommandLine),
}

impl CoverageStep {
    pub fn command(&self) -> &CommandLine {
        match self {
            CoverageStep::Capture(command)
            | CoverageStep::Extract(command)
            | CoverageStep::List(command)
            | CoverageStep::Render(command) => command,
        }
    }
}

pub struct CoverageReport<'a> {
    tools: &'a CoverageTools,
    paths: CoveragePaths,
}

impl<'a> CoverageReport<'a> {
    pub fn new(tools: &'a CoverageTools, paths: CoveragePaths) -> Self {
        Self { tools, paths }
    }

    /// The invocations the report makes, in order
    pub fn steps(&self) -> Vec<CoverageStep> {
        let lcov = &self.tools.lcov;
        let tmp_file = &self.paths.tmp_file;

        let mut steps = vec![CoverageStep::Capture(
            CommandLine::new(lcov)
                .arg("-q")
                .arg("-d")
                .arg(&self.paths.gcov_data_dir)
                .arg("-c")
                .arg("-o")
                .arg(tmp_file)
                .arg("-b")
                .arg("."),
        )];

        if !self.tools.include.is_empty() {
            steps.push(CoverageStep::Extract(
                CommandLine::new(lcov)
                    .arg("-q")
                    .arg("-e")
                    .arg(tmp_file)
                    .args(&self.tools.include)
                    .arg("-o")
                    .arg(tmp_file),
            ));
        }

        steps.push(CoverageStep::List(
            CommandLine::new(lcov).arg("-q").arg("-l").arg(tmp_file),
        ));
        steps.push(CoverageStep::Render(
            CommandLine::new(&self.tools.genhtml)
                .arg(tmp_file)
                .arg("-o")
                .arg(self.paths.html_dir()),
        ));

        steps
    }

    /// Run every step in order, stopping at the first failure that matters
    pub fn run(&self, executor: &CommandExecutor) -> CovtaskResult<()> {
        fs::create_dir_all(&self.paths.report_dir)?;

        for step in self.steps() {
            match step {
                CoverageStep::List(command) => {
                    if let Err(err) = executor.execute(&command) {
                        warn!(error = %err, "listing coverage trace failed");
                    }
                }
                step => executor.execute(step.command())?,
            }
        }

        info!(html = %self.paths.html_dir().display(), "coverage report written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::execution::command::testing::RecordingRunner;

    #[test]
    fn test_paths_are_fixed_suffixes_of_root() {
        let paths = CoveragePaths::from_root(Path::new("/work/semver"));

        assert_eq!(paths.report_dir, PathBuf::from("/work/semver/build/artifacts/test"));
        assert_eq!(paths.gcov_data_dir, PathBuf::from("/work/semver/build/gcov/out"));
        assert_eq!(
            paths.tmp_file,
            PathBuf::from("/work/semver/build/artifacts/test/cov.tmp")
        );
        assert_eq!(
            paths.html_dir(),
            PathBuf::from("/work/semver/build/artifacts/test/html")
        );
    }

    #[test]
    fn test_default_steps() {
        let tools = CoverageTools::default();
        let report = CoverageReport::new(&tools, CoveragePaths::from_root(Path::new("/p")));

        let rendered: Vec<String> = report
            .steps()
            .iter()
            .map(|step| step.command().to_string())
            .collect();

        assert_eq!(
            rendered,
            vec![
                "lcov -q -d /p/build/gcov/out -c -o /p/build/artifacts/test/cov.tmp -b .",
                "lcov -q -l /p/build/artifacts/test/cov.tmp",
                "genhtml /p/build/artifacts/test/cov.tmp -o /p/build/artifacts/test/html",
            ]
        );
    }

    #[test]
    fn test_include_patterns_add_extraction() {
        let tools = CoverageTools::from(&CoverageConfig {
            lcov: None,
            genhtml: Some("/opt/lcov/bin/genhtml".to_string()),
            include: Some(vec!["/p/src/*".to_string()]),
        });
        let report = CoverageReport::new(&tools, CoveragePaths::from_root(Path::new("/p")));
        let steps = report.steps();

        assert_eq!(steps.len(), 4);
        assert_eq!(
            steps[1],
            CoverageStep::Extract(
                CommandLine::new("lcov").args([
                    "-q",
                    "-e",
                    "/p/build/artifacts/test/cov.tmp",
                    "/p/src/*",
                    "-o",
                    "/p/build/artifacts/test/cov.tmp",
                ])
            )
        );
        assert_eq!(steps[3].command().program, "/opt/lcov/bin/genhtml");
    }

    #[test]
    fn test_failed_capture_stops_before_render() {
        let temp_dir = tempfile::tempdir().unwrap();
        let tools = CoverageTools::default();
        let report = CoverageReport::new(&tools, CoveragePaths::from_root(temp_dir.path()));
        let runner = RecordingRunner::failing_when(|command| {
            command.args.iter().any(|arg| arg == "-c").then_some(255)
        });
        let executor = CommandExecutor::new(temp_dir.path(), &runner);

        let err = report.run(&executor).unwrap_err();

        assert_eq!(err.exit_code(), 255);
        assert_eq!(runner.calls.borrow().len(), 1);
        assert!(temp_dir.path().join("build/artifacts/test").is_dir());
    }

    #[test]
    fn test_failed_listing_does_not_stop_render() {
        let temp_dir = tempfile::tempdir().unwrap();
        let tools = CoverageTools::default();
        let report = CoverageReport::new(&tools, CoveragePaths::from_root(temp_dir.path()));
        let runner = RecordingRunner::failing_when(|command| {
            command.args.iter().any(|arg| arg == "-l").then_some(1)
        });
        let executor = CommandExecutor::new(temp_dir.path(), &runner);

        report.run(&executor).unwrap();

        let calls = runner.calls.borrow();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[2].program, "genhtml");
    }

    #[test]
    fn test_failed_render_is_an_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let tools = CoverageTools::default();
        let report = CoverageReport::new(&tools, CoveragePaths::from_root(temp_dir.path()));
        let runner = RecordingRunner::failing_when(|command| {
            (command.program == "genhtml").then_some(2)
        });
        let executor = CommandExecutor::new(temp_dir.path(), &runner);

        let err = report.run(&executor).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_root_reaches_lcov_byte_for_byte() {
        use std::ffi::{OsStr, OsString};
        use std::os::unix::ffi::OsStrExt;

        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path().join(OsStr::from_bytes(b"proj\xff"));
        let paths = CoveragePaths::from_root(&root);
        let tools = CoverageTools::default();
        let report = CoverageReport::new(&tools, paths.clone());

        let steps = report.steps();

        let capture = steps[0].command();
        assert_eq!(capture.args[2], OsString::from(paths.gcov_data_dir.clone()));
        assert_eq!(capture.args[5], OsString::from(paths.tmp_file.clone()));
        let render = steps[2].command();
        assert_eq!(render.args[0], OsString::from(paths.tmp_file.clone()));
        assert_eq!(render.args[2], OsString::from(paths.html_dir()));
        assert!(paths
            .gcov_data_dir
            .as_os_str()
            .as_bytes()
            .ends_with(b"proj\xff/build/gcov/out"));
    }
}

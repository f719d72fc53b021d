use thiserror::Error;

/// The main error type for covtask operations
#[derive(Debug, Error)]
pub enum CovtaskError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Project error: {0}")]
    Project(String),

    #[error("Task error: {0}")]
    Task(String),

    #[error("Circular dependency detected: {0}")]
    Cycle(String),

    #[error("Failed to execute '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command '{program}' failed with exit code {}", display_code(.code))]
    CommandFailed { program: String, code: Option<i32> },
}

fn display_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "none (terminated by signal)".to_string(),
    }
}

impl CovtaskError {
    /// Process exit code a front end should use when surfacing this error.
    ///
    /// A failed external command hands its own exit code through, everything
    /// else maps to `1`.
    pub fn exit_code(&self) -> i32 {
        match self {
            CovtaskError::CommandFailed {
                code: Some(code), ..
            } if *code != 0 => *code,
            _ => 1,
        }
    }
}

/// Result type alias for covtask operations
pub type CovtaskResult<T> = Result<T, CovtaskError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_passes_through_command_failure() {
        let err = CovtaskError::CommandFailed {
            program: "lcov".to_string(),
            code: Some(3),
        };
        assert_eq!(err.exit_code(), 3);
        assert_eq!(err.to_string(), "Command 'lcov' failed with exit code 3");
    }

    #[test]
    fn test_exit_code_defaults_to_one() {
        let killed = CovtaskError::CommandFailed {
            program: "genhtml".to_string(),
            code: None,
        };
        assert_eq!(killed.exit_code(), 1);
        assert!(killed.to_string().contains("terminated by signal"));

        let config = CovtaskError::Config("bad".to_string());
        assert_eq!(config.exit_code(), 1);
    }
}

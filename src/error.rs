//! Custom error types and handling
//!
//! This module defines the harness error type and the process exit status
//! each error kind maps to.

use std::path::PathBuf;
use std::time::Duration;

use crate::config::ConfigError;
use crate::constants::exit_codes;

/// Harness-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Invocation errors
    #[error("Usage error: {0}")]
    Usage(String),

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    // Build errors
    #[error("Maven compilation failed in {}", .source_folder.display())]
    BuildFailed { source_folder: PathBuf },

    #[error("Build artifact not found: {}", .0.display())]
    ArtifactMissing(PathBuf),

    // Run errors
    #[error("Execution timed out after {limit:?} for {}", .input.display())]
    Timeout { input: PathBuf, limit: Duration },

    #[error("Execution failed for {}: {stderr}", .input.display())]
    ExecutionFailed {
        input: PathBuf,
        exit_code: Option<i32>,
        stderr: String,
    },

    // Internal errors
    #[error("Failed to launch `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("File error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Usage(_) => "USAGE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::BuildFailed { .. } => "BUILD_FAILURE",
            Self::ArtifactMissing(_) => "ARTIFACT_MISSING",
            Self::Timeout { .. } => "TIMEOUT",
            Self::ExecutionFailed { .. } => "EXECUTION_FAILURE",
            Self::Spawn { .. } => "SPAWN_ERROR",
            Self::Io(_) => "FILE_ERROR",
        }
    }

    /// Get the process exit status for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_) => exit_codes::USAGE,
            Self::BuildFailed { .. } | Self::ArtifactMissing(_) => exit_codes::BUILD_FAILED,
            Self::Timeout { .. } => exit_codes::RUN_TIMED_OUT,
            Self::ExecutionFailed { .. } => exit_codes::RUN_FAILED,
            Self::Configuration(_) | Self::Spawn { .. } | Self::Io(_) => {
                exit_codes::INTERNAL_ERROR
            }
        }
    }

    /// Whether this error aborts a benchmark batch part-way through
    pub fn is_run_failure(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::ExecutionFailed { .. })
    }
}

impl From<clap::Error> for AppError {
    fn from(err: clap::Error) -> Self {
        let reason = err.kind().as_str().unwrap_or("invalid arguments");
        AppError::Usage(reason.to_string())
    }
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_message_names_limit_and_file() {
        let err = AppError::Timeout {
            input: PathBuf::from("/data/inst01.dat"),
            limit: Duration::from_secs(3605),
        };
        assert_eq!(
            err.to_string(),
            "Execution timed out after 3605s for /data/inst01.dat"
        );
        assert_eq!(err.error_code(), "TIMEOUT");
        assert_eq!(err.exit_code(), exit_codes::RUN_TIMED_OUT);
        assert!(err.is_run_failure());
    }

    #[test]
    fn test_execution_failure_carries_stderr() {
        let err = AppError::ExecutionFailed {
            input: PathBuf::from("/data/inst01.dat"),
            exit_code: Some(1),
            stderr: "Exception in thread \"main\"".to_string(),
        };
        assert!(err.to_string().contains("Exception in thread"));
        assert_eq!(err.exit_code(), exit_codes::RUN_FAILED);
    }

    #[test]
    fn test_exit_codes_are_distinct_per_kind() {
        assert_eq!(AppError::Usage("x".into()).exit_code(), 1);
        assert_eq!(
            AppError::BuildFailed {
                source_folder: PathBuf::from("/src")
            }
            .exit_code(),
            2
        );
        assert_eq!(AppError::ArtifactMissing(PathBuf::from("a.jar")).exit_code(), 2);
        assert!(!AppError::ArtifactMissing(PathBuf::from("a.jar")).is_run_failure());
    }
}

//! Build and run request models

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::constants::TIMEOUT_EXIT_CODE;
use crate::error::{AppError, AppResult};
use crate::models::ProblemType;

/// Request to build the solver project
#[derive(Debug, Clone)]
pub struct BuildRequest {
    pub source_folder: PathBuf,
}

impl BuildRequest {
    pub fn new(source_folder: impl Into<PathBuf>) -> Self {
        Self {
            source_folder: source_folder.into(),
        }
    }
}

/// One solver invocation, derived from a single data file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    pub input_file: PathBuf,
    pub output_file: PathBuf,
    pub problem_type: ProblemType,
    pub time_limit: Duration,
}

/// Classified result of a solver process
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Success,
    Timeout,
    /// Carries the captured error stream, or a description when the
    /// process left nothing on stderr
    Failure(String),
}

impl RunOutcome {
    /// Classify a finished process from its exit code and stderr.
    ///
    /// `None` means the process was terminated by a signal.
    pub fn classify(exit_code: Option<i32>, stderr: &str) -> Self {
        match exit_code {
            Some(0) => Self::Success,
            Some(TIMEOUT_EXIT_CODE) => Self::Timeout,
            Some(code) if stderr.trim().is_empty() => {
                Self::Failure(format!("process exited with code {}", code))
            }
            None if stderr.trim().is_empty() => {
                Self::Failure("process terminated by signal".to_string())
            }
            _ => Self::Failure(stderr.to_string()),
        }
    }

    /// Turn the outcome into the batch-aborting error, if any
    pub fn into_result(self, request: &RunRequest, exit_code: Option<i32>) -> AppResult<()> {
        match self {
            Self::Success => Ok(()),
            Self::Timeout => Err(AppError::Timeout {
                input: request.input_file.clone(),
                limit: request.time_limit,
            }),
            Self::Failure(stderr) => Err(AppError::ExecutionFailed {
                input: request.input_file.clone(),
                exit_code,
                stderr,
            }),
        }
    }
}

/// A solver run that finished successfully
#[derive(Debug, Clone)]
pub struct CompletedRun {
    pub input_file: PathBuf,
    pub output_file: PathBuf,
    pub elapsed: Duration,
    /// Whether the solver actually left a result file behind
    pub output_written: bool,
}

/// Everything one benchmark batch processed
#[derive(Debug, Clone)]
pub struct BatchSummary {
    pub problem_type: ProblemType,
    pub started_at: DateTime<Utc>,
    pub runs: Vec<CompletedRun>,
}

impl BatchSummary {
    pub fn new(problem_type: ProblemType, started_at: DateTime<Utc>) -> Self {
        Self {
            problem_type,
            started_at,
            runs: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Sum of the solver wall times
    pub fn total_elapsed(&self) -> Duration {
        self.runs.iter().map(|run| run.elapsed).sum()
    }

    /// Runs that reported success without writing their result file
    pub fn missing_outputs(&self) -> impl Iterator<Item = &Path> {
        self.runs
            .iter()
            .filter(|run| !run.output_written)
            .map(|run| run.output_file.as_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> RunRequest {
        RunRequest {
            input_file: PathBuf::from("/in/a.dat"),
            output_file: PathBuf::from("/out/a.txt"),
            problem_type: ProblemType::Nearp,
            time_limit: Duration::from_secs(3605),
        }
    }

    #[test]
    fn test_classify_zero_is_success() {
        assert_eq!(RunOutcome::classify(Some(0), "warning"), RunOutcome::Success);
    }

    #[test]
    fn test_classify_124_is_always_timeout() {
        assert_eq!(RunOutcome::classify(Some(124), ""), RunOutcome::Timeout);
        assert_eq!(
            RunOutcome::classify(Some(124), "Exception in thread"),
            RunOutcome::Timeout
        );
    }

    #[test]
    fn test_classify_nonzero_keeps_stderr() {
        assert_eq!(
            RunOutcome::classify(Some(1), "java.lang.OutOfMemoryError"),
            RunOutcome::Failure("java.lang.OutOfMemoryError".to_string())
        );
        assert_eq!(
            RunOutcome::classify(Some(125), ""),
            RunOutcome::Failure("process exited with code 125".to_string())
        );
    }

    #[test]
    fn test_classify_signal_is_failure() {
        assert!(matches!(
            RunOutcome::classify(None, ""),
            RunOutcome::Failure(_)
        ));
    }

    #[test]
    fn test_into_result_maps_to_errors() {
        let req = request();
        assert!(RunOutcome::Success.into_result(&req, Some(0)).is_ok());

        match RunOutcome::Timeout.into_result(&req, Some(124)) {
            Err(AppError::Timeout { input, limit }) => {
                assert_eq!(input, req.input_file);
                assert_eq!(limit, Duration::from_secs(3605));
            }
            other => panic!("expected timeout, got {:?}", other),
        }

        match RunOutcome::Failure("boom".to_string()).into_result(&req, Some(3)) {
            Err(AppError::ExecutionFailed {
                input,
                exit_code,
                stderr,
            }) => {
                assert_eq!(input, req.input_file);
                assert_eq!(exit_code, Some(3));
                assert_eq!(stderr, "boom");
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_summary_totals() {
        let mut summary = BatchSummary::new(ProblemType::NearpTp, Utc::now());
        assert!(summary.is_empty());

        summary.runs.push(CompletedRun {
            input_file: PathBuf::from("/in/a.dat"),
            output_file: PathBuf::from("/out/a.txt"),
            elapsed: Duration::from_secs(2),
            output_written: true,
        });
        summary.runs.push(CompletedRun {
            input_file: PathBuf::from("/in/b.dat"),
            output_file: PathBuf::from("/out/b.txt"),
            elapsed: Duration::from_secs(3),
            output_written: false,
        });

        assert_eq!(summary.len(), 2);
        assert_eq!(summary.total_elapsed(), Duration::from_secs(5));
        let missing: Vec<&Path> = summary.missing_outputs().collect();
        assert_eq!(missing, vec![Path::new("/out/b.txt")]);
    }
}

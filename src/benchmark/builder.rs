//! Solver build step
//!
//! Runs `mvn clean package` in the solver's source folder. The packaged jar
//! is expected at [`BuildConfig::artifact_path`] afterwards; checking for it
//! is left to the caller.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, error, info};

use crate::config::BuildConfig;
use crate::error::AppResult;
use crate::models::BuildRequest;

use super::command::{CommandExecutor, CommandSpec};

/// Builds the solver project with Maven
pub struct Builder {
    config: BuildConfig,
    executor: Arc<dyn CommandExecutor>,
}

impl Builder {
    /// Create a new builder
    pub fn new(config: BuildConfig, executor: Arc<dyn CommandExecutor>) -> Self {
        Self { config, executor }
    }

    /// Command that builds the project in `request.source_folder`
    pub fn build_command(&self, request: &BuildRequest) -> CommandSpec {
        CommandSpec::new(self.config.program.as_str(), &request.source_folder)
            .args(&self.config.args)
            .capture_stdout(true)
    }

    /// Where the build leaves the solver jar
    pub fn artifact_path(&self, request: &BuildRequest) -> PathBuf {
        request.source_folder.join(&self.config.artifact_path)
    }

    /// Run the build.
    ///
    /// Returns `Ok(false)` when the build tool exits non-zero; its stderr is
    /// logged. An `Err` means the build tool could not be run at all.
    pub async fn build(&self, request: &BuildRequest) -> AppResult<bool> {
        info!("Compiling code in {}...", request.source_folder.display());

        let command = self.build_command(request);
        let output = self.executor.execute(&command).await?;

        if !output.stdout.is_empty() {
            debug!(build_log = %output.stdout, "Maven output");
        }

        if !output.success() {
            error!(
                exit_code = ?output.exit_code,
                "Maven compilation failed:\n{}",
                output.stderr
            );
            return Ok(false);
        }

        info!("Maven compilation successful.");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;
    use std::path::Path;

    use super::*;
    use crate::benchmark::command::{MockCommandExecutor, ProcessOutput};
    use crate::config::Config;
    use crate::error::AppError;
    use crate::platform::Platform;

    fn builder(executor: MockCommandExecutor) -> Builder {
        Builder::new(
            Config::for_platform(Platform::Posix).build,
            Arc::new(executor),
        )
    }

    #[test]
    fn test_build_command_runs_clean_package_in_source_folder() {
        let builder = builder(MockCommandExecutor::new());
        let command = builder.build_command(&BuildRequest::new("/work/tcc"));

        assert_eq!(command.program, OsString::from("mvn"));
        assert_eq!(
            command.args,
            vec![OsString::from("clean"), OsString::from("package")]
        );
        assert_eq!(command.current_dir, Path::new("/work/tcc"));
        assert_eq!(
            builder.artifact_path(&BuildRequest::new("/work/tcc")),
            Path::new("/work/tcc/target/tcc-1.0.jar")
        );
    }

    #[tokio::test]
    async fn test_successful_build() {
        let mut executor = MockCommandExecutor::new();
        executor
            .expect_execute()
            .withf(|spec| spec.current_dir == Path::new("/work/tcc"))
            .times(1)
            .returning(|_| {
                Ok(ProcessOutput {
                    exit_code: Some(0),
                    stdout: "[INFO] BUILD SUCCESS".to_string(),
                    stderr: String::new(),
                })
            });

        let built = builder(executor)
            .build(&BuildRequest::new("/work/tcc"))
            .await
            .unwrap();
        assert!(built);
    }

    #[tokio::test]
    async fn test_failed_build_returns_false() {
        let mut executor = MockCommandExecutor::new();
        executor.expect_execute().times(1).returning(|_| {
            Ok(ProcessOutput {
                exit_code: Some(1),
                stdout: "[ERROR] BUILD FAILURE".to_string(),
                stderr: "compilation error".to_string(),
            })
        });

        let built = builder(executor)
            .build(&BuildRequest::new("/work/tcc"))
            .await
            .unwrap();
        assert!(!built);
    }

    #[tokio::test]
    async fn test_unlaunchable_build_tool_is_error() {
        let mut executor = MockCommandExecutor::new();
        executor.expect_execute().times(1).returning(|spec| {
            Err(AppError::Spawn {
                program: spec.program_name(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
            })
        });

        let result = builder(executor).build(&BuildRequest::new("/work/tcc")).await;
        assert!(matches!(result, Err(AppError::Spawn { .. })));
    }
}

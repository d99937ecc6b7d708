//! Build-then-run orchestration
//!
//! The solver is built once. Only a successful build whose jar actually
//! exists leads to the benchmark runs.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::fs;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{BatchSummary, BuildRequest, ProblemType},
};

use super::{
    builder::Builder,
    command::CommandExecutor,
    launcher::{ProcessLauncher, launcher_for},
    runner::Runner,
};

/// One invocation of the harness
#[derive(Debug, Clone)]
pub struct BenchmarkJob {
    pub source_folder: PathBuf,
    pub input_folder: PathBuf,
    pub output_folder: PathBuf,
    pub problem_type: ProblemType,
}

/// Builder and runner wired together
pub struct BenchmarkPipeline {
    builder: Builder,
    runner: Runner,
}

impl BenchmarkPipeline {
    /// Create a pipeline using the configured platform's launcher
    pub fn new(config: Config, executor: Arc<dyn CommandExecutor>) -> Self {
        let launcher = launcher_for(&config.execution);
        Self::with_launcher(config, launcher, executor)
    }

    pub fn with_launcher(
        config: Config,
        launcher: Arc<dyn ProcessLauncher>,
        executor: Arc<dyn CommandExecutor>,
    ) -> Self {
        let builder = Builder::new(config.build.clone(), executor.clone());
        let runner = Runner::new(config, launcher, executor);
        Self { builder, runner }
    }

    /// Build the solver, then benchmark it over the input folder
    pub async fn run(&self, job: &BenchmarkJob) -> AppResult<BatchSummary> {
        let request = BuildRequest::new(&job.source_folder);

        if !self.builder.build(&request).await? {
            return Err(AppError::BuildFailed {
                source_folder: request.source_folder,
            });
        }

        let artifact = self.builder.artifact_path(&request);
        if !fs::try_exists(&artifact).await? {
            return Err(AppError::ArtifactMissing(artifact));
        }

        self.runner
            .run_benchmark(
                &job.source_folder,
                &job.input_folder,
                &job.output_folder,
                job.problem_type,
            )
            .await
    }
}

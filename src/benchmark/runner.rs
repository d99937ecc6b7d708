//! Benchmark runner - Runs the solver over every data file of a folder
//!
//! Inputs are processed one at a time, in directory-listing order. The first
//! run that times out or fails aborts the whole batch.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use tokio::fs;
use tracing::{debug, error, info, warn};

use crate::{
    config::Config,
    error::AppResult,
    models::{BatchSummary, CompletedRun, ProblemType, RunOutcome, RunRequest},
    utils::{format_milliseconds, has_extension, now_utc, output_path_for},
};

use super::{
    command::{CommandExecutor, CommandSpec},
    launcher::ProcessLauncher,
};

/// Runs the packaged solver against benchmark instances
pub struct Runner {
    config: Config,
    launcher: Arc<dyn ProcessLauncher>,
    executor: Arc<dyn CommandExecutor>,
}

impl Runner {
    /// Create a new benchmark runner
    pub fn new(
        config: Config,
        launcher: Arc<dyn ProcessLauncher>,
        executor: Arc<dyn CommandExecutor>,
    ) -> Self {
        Self {
            config,
            launcher,
            executor,
        }
    }

    /// Location of the solver jar inside `source_folder`
    pub fn artifact_path(&self, source_folder: &Path) -> PathBuf {
        source_folder.join(&self.config.build.artifact_path)
    }

    /// Run the solver on every data file in `input_folder`
    pub async fn run_benchmark(
        &self,
        source_folder: &Path,
        input_folder: &Path,
        output_folder: &Path,
        problem_type: ProblemType,
    ) -> AppResult<BatchSummary> {
        ensure_output_dir(output_folder).await?;

        let artifact = self.artifact_path(source_folder);
        let requests = self
            .collect_requests(input_folder, output_folder, problem_type)
            .await?;

        if requests.is_empty() {
            warn!(
                input = %input_folder.display(),
                extension = %self.config.files.input_extension,
                "No data files found"
            );
        }

        let mut summary = BatchSummary::new(problem_type, now_utc());
        for request in &requests {
            match self.run_one(source_folder, &artifact, request).await {
                Ok(run) => summary.runs.push(run),
                Err(e) => {
                    if e.is_run_failure() {
                        error!(
                            completed = summary.len(),
                            remaining = requests.len() - summary.len() - 1,
                            "Aborting benchmark at {}",
                            request.input_file.display()
                        );
                    }
                    return Err(e);
                }
            }
        }

        Ok(summary)
    }

    /// List the data files of `input_folder` as run requests, in
    /// directory-listing order
    pub async fn collect_requests(
        &self,
        input_folder: &Path,
        output_folder: &Path,
        problem_type: ProblemType,
    ) -> AppResult<Vec<RunRequest>> {
        let files = &self.config.files;
        let mut requests = Vec::new();

        let mut entries = fs::read_dir(input_folder).await?;
        while let Some(entry) = entries.next_entry().await? {
            let input_file = entry.path();

            if !has_extension(&input_file, &files.input_extension) {
                debug!(file = %input_file.display(), "Skipping non-data file");
                continue;
            }
            // Follows symlinks, so a link to a directory is skipped too
            if fs::metadata(&input_file).await?.is_dir() {
                debug!(dir = %input_file.display(), "Skipping directory");
                continue;
            }
            let Some(output_file) =
                output_path_for(&input_file, output_folder, &files.output_extension)
            else {
                continue;
            };

            requests.push(RunRequest {
                input_file,
                output_file,
                problem_type,
                time_limit: self.config.execution.time_limit,
            });
        }

        Ok(requests)
    }

    /// The bare solver invocation, before any timeout wrapping:
    /// `java -Xmx<heap> [-Djava.library.path=<cplex>] -jar <artifact> <type> <input> <output>`
    pub fn solver_command(
        &self,
        source_folder: &Path,
        artifact: &Path,
        request: &RunRequest,
    ) -> CommandSpec {
        let solver = &self.config.solver;

        let mut command = CommandSpec::new(solver.java_program.as_str(), source_folder)
            .arg(format!("-Xmx{}", solver.max_heap));

        if solver.use_cplex {
            let mut library_path = std::ffi::OsString::from("-Djava.library.path=");
            library_path.push(&solver.cplex_library_path);
            command = command.arg(library_path);
        }

        command
            .arg("-jar")
            .arg(artifact)
            .arg(request.problem_type.as_str())
            .arg(&request.input_file)
            .arg(&request.output_file)
    }

    /// Run a single request and classify the outcome
    async fn run_one(
        &self,
        source_folder: &Path,
        artifact: &Path,
        request: &RunRequest,
    ) -> AppResult<CompletedRun> {
        let file_name = request
            .input_file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        info!(
            input = %request.input_file.display(),
            problem_type = %request.problem_type,
            "Running {} as type {}",
            file_name,
            request.problem_type
        );

        let command = self
            .launcher
            .wrap(self.solver_command(source_folder, artifact, request));

        let start = Instant::now();
        let output = self.executor.execute(&command).await?;
        let elapsed = start.elapsed();

        RunOutcome::classify(output.exit_code, &output.stderr)
            .into_result(request, output.exit_code)?;

        let output_written = fs::try_exists(&request.output_file).await.unwrap_or(false);
        if !output_written {
            warn!(
                output = %request.output_file.display(),
                "Solver exited successfully but wrote no result file"
            );
        }

        info!(
            input = %request.input_file.display(),
            elapsed = %format_milliseconds(elapsed.as_millis()),
            "Finished {}",
            file_name
        );

        Ok(CompletedRun {
            input_file: request.input_file.clone(),
            output_file: request.output_file.clone(),
            elapsed,
            output_written,
        })
    }
}

/// Create the results folder unless it already exists.
///
/// Returns whether the folder was created.
pub async fn ensure_output_dir(path: &Path) -> AppResult<bool> {
    if fs::try_exists(path).await? {
        if !fs::metadata(path).await?.is_dir() {
            return Err(std::io::Error::other(format!(
                "{} exists and is not a directory",
                path.display()
            ))
            .into());
        }
        return Ok(false);
    }

    fs::create_dir_all(path).await?;
    info!(output = %path.display(), "Created output folder");
    Ok(true)
}

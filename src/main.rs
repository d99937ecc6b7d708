//! tcc-runner - Application Entry Point
//!
//! Usage: `tcc-runner <source_folder> <input_folder> <output_folder> <type>`

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tcc_runner::{
    AppError, Config,
    benchmark::{BenchmarkJob, BenchmarkPipeline, SystemExecutor},
    cli::{self, Cli},
    constants::{DEFAULT_LOG_FILTER, exit_codes},
    models::BatchSummary,
    utils::format_duration,
};

#[tokio::main]
async fn main() -> ExitCode {
    // Arguments are validated before anything else happens
    let cli = match cli::parse_args(std::env::args_os()) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("{}", cli::usage());
            return exit_code(e.exit_code());
        }
    };

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run(cli).await {
        Ok(summary) => {
            report(&summary);
            exit_code(exit_codes::SUCCESS)
        }
        Err(e) => match e.downcast_ref::<AppError>() {
            Some(app_error) => {
                tracing::error!(error_code = app_error.error_code(), "{:#}", e);
                exit_code(app_error.exit_code())
            }
            None => {
                tracing::error!("{:#}", e);
                exit_code(exit_codes::INTERNAL_ERROR)
            }
        },
    }
}

async fn run(cli: Cli) -> anyhow::Result<BatchSummary> {
    let job = BenchmarkJob {
        source_folder: absolute(&cli.source_folder)?,
        input_folder: absolute(&cli.input_folder)?,
        output_folder: absolute(&cli.output_folder)?,
        problem_type: cli.problem_type,
    };

    let config = Config::default();
    config.validate().map_err(AppError::from)?;
    tracing::debug!(?config, "Loaded configuration");

    let pipeline = BenchmarkPipeline::new(config, Arc::new(SystemExecutor::new()));
    let summary = pipeline.run(&job).await?;
    Ok(summary)
}

fn absolute(path: &Path) -> anyhow::Result<PathBuf> {
    std::path::absolute(path).with_context(|| format!("Invalid path: {}", path.display()))
}

fn report(summary: &BatchSummary) {
    tracing::info!(
        problem_type = %summary.problem_type,
        started_at = %summary.started_at.to_rfc3339(),
        "Benchmark complete: {} instance(s) in {}",
        summary.len(),
        format_duration(summary.total_elapsed())
    );

    for missing in summary.missing_outputs() {
        tracing::warn!(output = %missing.display(), "Result file missing");
    }
}

fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

//! Benchmark execution engine
//!
//! A benchmark session has two steps:
//!
//! 1. **Builder** (`builder.rs`): packages the solver with `mvn clean package`.
//!
//! 2. **Runner** (`runner.rs`): runs the packaged solver once per data file
//!    of the input folder, each run bounded by a wall-clock limit:
//!    - commands are wrapped by a platform [`ProcessLauncher`]
//!    - exit status 124 is a timeout, any other non-zero status a failure
//!    - the first timeout or failure aborts the batch
//!
//! [`BenchmarkPipeline`] chains the two.

pub mod builder;
pub mod command;
pub mod launcher;
pub mod pipeline;
pub mod runner;

pub use builder::Builder;
pub use command::{CommandExecutor, CommandSpec, ProcessOutput, SystemExecutor};
pub use launcher::{ProcessLauncher, TimeoutCommandLauncher, UnboundedLauncher, launcher_for};
pub use pipeline::{BenchmarkJob, BenchmarkPipeline};
pub use runner::{Runner, ensure_output_dir};

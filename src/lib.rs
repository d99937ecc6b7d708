//! tcc-runner - Benchmark harness for the TCC routing solver
//!
//! This library builds the Java solver with Maven and runs it over a folder
//! of benchmark instances, one process per instance, each bounded by a
//! wall-clock limit.
//!
//! # Architecture
//!
//! - **Builder**: `mvn clean package` in the solver's source folder
//! - **Runner**: one solver process per `.dat` file, sequentially
//! - **Launchers**: platform strategies wrapping runs in `timeout`
//! - **Executor**: the seam where processes are actually spawned

pub mod benchmark;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod platform;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};

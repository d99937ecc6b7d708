//! Domain models
//!
//! This module contains the request and outcome types that flow between
//! the builder and the runner.

pub mod problem;
pub mod run;

pub use problem::*;
pub use run::*;

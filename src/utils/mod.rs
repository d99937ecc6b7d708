//! Utility functions

pub mod paths;
pub mod time;

pub use paths::{has_extension, output_path_for};
pub use time::{format_duration, format_milliseconds, now_utc, timeout_argument};

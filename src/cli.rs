//! Command line interface
//!
//! Exactly four positional arguments and no flags. Anything else is a
//! usage error, reported before the filesystem or any process is touched.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

use crate::constants::problem_types;
use crate::error::{AppError, AppResult};
use crate::models::ProblemType;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "tcc-runner",
    about = "Build the TCC solver and benchmark it over a folder of instances",
    disable_help_flag = true
)]
pub struct Cli {
    /// Maven project of the solver
    pub source_folder: PathBuf,

    /// Folder with the `.dat` instances
    pub input_folder: PathBuf,

    /// Folder receiving one `.txt` result per instance
    pub output_folder: PathBuf,

    /// Solver mode
    #[arg(value_enum, ignore_case = true)]
    pub problem_type: ProblemType,
}

/// Usage text printed on any argument error
pub fn usage() -> String {
    format!(
        "Usage: tcc-runner <source_folder> <input_folder> <output_folder> <type>\n       type: {} or {}",
        problem_types::NEARP,
        problem_types::NEARPTP
    )
}

/// Number of positional arguments after the program name
const ARGUMENT_COUNT: usize = 4;

/// Parse the full argument list, program name included.
///
/// Every user argument is positional, so paths starting with `-` and a
/// literal `--` are taken as values rather than options.
pub fn parse_args<I, T>(args: I) -> AppResult<Cli>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let mut args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    if args.len() != ARGUMENT_COUNT + 1 {
        return Err(AppError::Usage(format!(
            "expected {} arguments, got {}",
            ARGUMENT_COUNT,
            args.len().saturating_sub(1)
        )));
    }

    args.insert(1, OsString::from("--"));
    Ok(Cli::try_parse_from(args)?)
}

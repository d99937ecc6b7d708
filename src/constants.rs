//! Application-wide constants
//!
//! This module contains all constant values used throughout the harness.
//! Constants are grouped by their purpose for better organization. The
//! defaults in [`crate::config::Config`] are built from these values.

// =============================================================================
// BUILD DEFAULTS
// =============================================================================

/// Maven launcher on POSIX systems
pub const MAVEN_PROGRAM: &str = "mvn";

/// Maven launcher on Windows (the batch wrapper must be named explicitly)
pub const MAVEN_PROGRAM_WINDOWS: &str = "mvn.cmd";

/// Maven goals run for every build
pub const MAVEN_GOALS: &[&str] = &["clean", "package"];

/// Location of the packaged solver, relative to the source folder
pub const ARTIFACT_RELATIVE_PATH: &str = "target/tcc-1.0.jar";

// =============================================================================
// SOLVER DEFAULTS
// =============================================================================

/// JVM launcher
pub const JAVA_PROGRAM: &str = "java";

/// Maximum JVM heap handed to `-Xmx`
pub const DEFAULT_MAX_HEAP: &str = "16g";

/// Whether the solver is launched with the CPLEX native libraries
pub const DEFAULT_USE_CPLEX: bool = true;

/// CPLEX native library folder on Windows
pub const CPLEX_LIBRARY_PATH_WINDOWS: &str =
    "C:/Program Files/IBM/ILOG/CPLEX_Studio2212/opl/bin/x64_win64";

/// CPLEX native library folder on Linux and macOS
pub const CPLEX_LIBRARY_PATH_POSIX: &str = "/opt/ibm/ILOG/CPLEX_Studio2212/opl/bin/x86-64_linux";

// =============================================================================
// EXECUTION DEFAULTS
// =============================================================================

/// Wall-clock limit for a single solver run (one hour plus a grace period)
pub const DEFAULT_TIME_LIMIT_SECONDS: u64 = 3605;

/// GNU coreutils timeout wrapper
pub const TIMEOUT_PROGRAM: &str = "timeout";

/// Homebrew coreutils installs the wrapper with a `g` prefix
pub const TIMEOUT_PROGRAM_MACOS: &str = "gtimeout";

/// Exit status reported by `timeout` when the wrapped command overran
pub const TIMEOUT_EXIT_CODE: i32 = 124;

// =============================================================================
// FILE LAYOUT
// =============================================================================

/// Extension of benchmark instance files
pub const DATA_FILE_EXTENSION: &str = "dat";

/// Extension of solver result files
pub const OUTPUT_FILE_EXTENSION: &str = "txt";

// =============================================================================
// LOGGING
// =============================================================================

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "tcc_runner=info";

// =============================================================================
// PROBLEM TYPES
// =============================================================================

/// Problem-type tags understood by the solver
pub mod problem_types {
    pub const NEARP: &str = "NEARP";
    pub const NEARPTP: &str = "NEARPTP";
}

// =============================================================================
// PROCESS EXIT CODES
// =============================================================================

/// Exit statuses of the harness itself
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USAGE: i32 = 1;
    pub const BUILD_FAILED: i32 = 2;
    pub const RUN_TIMED_OUT: i32 = 3;
    pub const RUN_FAILED: i32 = 4;
    pub const INTERNAL_ERROR: i32 = 5;
}

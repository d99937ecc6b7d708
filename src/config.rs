//! Harness configuration
//!
//! Every tunable of the build and benchmark steps lives in [`Config`], which
//! is handed to the builder and the runner when they are constructed. The
//! defaults come from [`crate::constants`] and the host [`Platform`]; the
//! harness deliberately reads no environment variables for them.

use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{
    ARTIFACT_RELATIVE_PATH, DATA_FILE_EXTENSION, DEFAULT_MAX_HEAP, DEFAULT_TIME_LIMIT_SECONDS,
    DEFAULT_USE_CPLEX, JAVA_PROGRAM, MAVEN_GOALS, OUTPUT_FILE_EXTENSION,
};
use crate::platform::Platform;

/// Main harness configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub build: BuildConfig,
    pub solver: SolverConfig,
    pub execution: ExecutionConfig,
    pub files: FileConfig,
}

/// Maven build configuration
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Build tool executable (`mvn`, or `mvn.cmd` on Windows)
    pub program: String,
    /// Arguments passed to the build tool
    pub args: Vec<String>,
    /// Packaged solver, relative to the source folder
    pub artifact_path: PathBuf,
}

/// JVM invocation of the solver
#[derive(Debug, Clone)]
pub struct SolverConfig {
    pub java_program: String,
    /// Value of `-Xmx`, e.g. `16g`
    pub max_heap: String,
    /// Pass `-Djava.library.path` so the solver can load CPLEX
    pub use_cplex: bool,
    pub cplex_library_path: PathBuf,
}

/// Per-run execution limits
#[derive(Debug, Clone)]
pub struct ExecutionConfig {
    /// Wall-clock limit for one solver run
    pub time_limit: Duration,
    /// External wrapper enforcing `time_limit`
    pub timeout_program: String,
    /// Platform whose launch strategy is used
    pub platform: Platform,
}

/// Input and output file naming
#[derive(Debug, Clone)]
pub struct FileConfig {
    /// Only inputs with this extension are benchmarked
    pub input_extension: String,
    /// Extension given to the solver's result file
    pub output_extension: String,
}

impl Config {
    /// Defaults for the given platform
    pub fn for_platform(platform: Platform) -> Self {
        Self {
            build: BuildConfig::for_platform(platform),
            solver: SolverConfig::for_platform(platform),
            execution: ExecutionConfig::for_platform(platform),
            files: FileConfig::default(),
        }
    }

    /// Check the configuration before anything is launched
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.build.program.trim().is_empty() {
            return Err(ConfigError::Empty("build.program".to_string()));
        }
        if self.solver.java_program.trim().is_empty() {
            return Err(ConfigError::Empty("solver.java_program".to_string()));
        }
        if self.solver.max_heap.trim().is_empty() {
            return Err(ConfigError::Empty("solver.max_heap".to_string()));
        }
        if self.solver.use_cplex && self.solver.cplex_library_path.as_os_str().is_empty() {
            return Err(ConfigError::Empty("solver.cplex_library_path".to_string()));
        }
        // `timeout` has millisecond resolution here and treats 0s as no limit
        if self.execution.time_limit < Duration::from_millis(1) {
            return Err(ConfigError::InvalidValue("execution.time_limit".to_string()));
        }
        if self.execution.platform.enforces_timeout()
            && self.execution.timeout_program.trim().is_empty()
        {
            return Err(ConfigError::Empty("execution.timeout_program".to_string()));
        }
        for (name, ext) in [
            ("files.input_extension", &self.files.input_extension),
            ("files.output_extension", &self.files.output_extension),
        ] {
            if ext.is_empty() {
                return Err(ConfigError::Empty(name.to_string()));
            }
            if ext.starts_with('.') || ext.contains(['/', '\\']) {
                return Err(ConfigError::InvalidValue(name.to_string()));
            }
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::for_platform(Platform::current())
    }
}

impl BuildConfig {
    fn for_platform(platform: Platform) -> Self {
        Self {
            program: platform.maven_program().to_string(),
            args: MAVEN_GOALS.iter().map(|goal| goal.to_string()).collect(),
            artifact_path: PathBuf::from(ARTIFACT_RELATIVE_PATH),
        }
    }
}

impl SolverConfig {
    fn for_platform(platform: Platform) -> Self {
        Self {
            java_program: JAVA_PROGRAM.to_string(),
            max_heap: DEFAULT_MAX_HEAP.to_string(),
            use_cplex: DEFAULT_USE_CPLEX,
            cplex_library_path: PathBuf::from(platform.cplex_library_path()),
        }
    }
}

impl ExecutionConfig {
    fn for_platform(platform: Platform) -> Self {
        Self {
            time_limit: Duration::from_secs(DEFAULT_TIME_LIMIT_SECONDS),
            timeout_program: platform.timeout_program().to_string(),
            platform,
        }
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            input_extension: DATA_FILE_EXTENSION.to_string(),
            output_extension: OUTPUT_FILE_EXTENSION.to_string(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration value must not be empty: {0}")]
    Empty(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

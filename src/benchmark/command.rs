//! External command description and execution
//!
//! Builder and runner describe what to launch as a [`CommandSpec`] and hand
//! it to a [`CommandExecutor`]. The production executor spawns the process
//! with tokio; tests substitute a mock.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::{AppError, AppResult};

/// A fully resolved external command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: OsString,
    pub args: Vec<OsString>,
    /// Working directory of the child
    pub current_dir: PathBuf,
    /// Pipe stdout back to the caller instead of inheriting the terminal
    pub capture_stdout: bool,
}

impl CommandSpec {
    pub fn new(program: impl Into<OsString>, current_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: current_dir.into(),
            capture_stdout: false,
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn capture_stdout(mut self, capture: bool) -> Self {
        self.capture_stdout = capture;
        self
    }

    /// Program name for logs and error messages
    pub fn program_name(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }

    /// Last argument, which for solver runs is the output file
    pub fn last_arg(&self) -> Option<&OsStr> {
        self.args.last().map(OsString::as_os_str)
    }

    pub fn working_dir(&self) -> &Path {
        &self.current_dir
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.to_string_lossy())?;
        for arg in &self.args {
            let arg = arg.to_string_lossy();
            if arg.contains(' ') {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// What a finished child process left behind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// `None` when the process was killed by a signal
    pub exit_code: Option<i32>,
    /// Empty unless the command asked for stdout to be captured
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Runs a [`CommandSpec`] to completion
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    async fn execute(&self, spec: &CommandSpec) -> AppResult<ProcessOutput>;
}

/// Executor backed by real OS processes
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemExecutor;

impl SystemExecutor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandExecutor for SystemExecutor {
    async fn execute(&self, spec: &CommandSpec) -> AppResult<ProcessOutput> {
        tracing::debug!(
            cwd = %spec.current_dir.display(),
            cmd = %spec,
            "Spawning process"
        );

        let stdout = if spec.capture_stdout {
            Stdio::piped()
        } else {
            Stdio::inherit()
        };

        let child = Command::new(&spec.program)
            .args(&spec.args)
            .current_dir(spec.working_dir())
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| AppError::Spawn {
                program: spec.program_name(),
                source,
            })?;

        let output = child.wait_with_output().await?;

        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = output.status.signal() {
                tracing::warn!(cmd = %spec, signal, "Process killed by signal");
            }
        }

        Ok(ProcessOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_quotes_arguments_with_spaces() {
        let spec = CommandSpec::new("java", "/src")
            .arg("-Djava.library.path=C:/Program Files/IBM")
            .arg("-jar")
            .arg("tcc.jar");
        assert_eq!(
            spec.to_string(),
            "java \"-Djava.library.path=C:/Program Files/IBM\" -jar tcc.jar"
        );
    }

    #[test]
    fn test_builder_methods() {
        let spec = CommandSpec::new("mvn", "/src")
            .args(["clean", "package"])
            .capture_stdout(true);
        assert_eq!(spec.program_name(), "mvn");
        assert_eq!(spec.args, vec![OsString::from("clean"), OsString::from("package")]);
        assert_eq!(spec.last_arg(), Some(OsStr::new("package")));
        assert!(spec.capture_stdout);
        assert_eq!(spec.working_dir(), Path::new("/src"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_system_executor_captures_stderr_and_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let spec = CommandSpec::new("sh", dir.path())
            .arg("-c")
            .arg("echo solver exploded >&2; exit 3");

        let output = SystemExecutor::new().execute(&spec).await.unwrap();
        assert_eq!(output.exit_code, Some(3));
        assert_eq!(output.stderr.trim(), "solver exploded");
        assert!(output.stdout.is_empty());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_system_executor_runs_in_working_dir() {
        let dir = tempfile::tempdir().unwrap();
        let spec = CommandSpec::new("sh", dir.path())
            .arg("-c")
            .arg("pwd")
            .capture_stdout(true);

        let output = SystemExecutor::new().execute(&spec).await.unwrap();
        assert!(output.success());
        let reported = PathBuf::from(output.stdout.trim());
        assert_eq!(
            reported.canonicalize().unwrap(),
            dir.path().canonicalize().unwrap()
        );
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let dir = tempfile::tempdir().unwrap();
        let spec = CommandSpec::new("definitely-not-a-real-program-4242", dir.path());

        let err = SystemExecutor::new().execute(&spec).await.unwrap_err();
        assert!(matches!(err, AppError::Spawn { .. }));
    }
}

//! Process launch strategies
//!
//! A launcher decides how a solver command is wrapped before it is executed.
//! On POSIX hosts the command is prefixed with coreutils `timeout`, which
//! kills the solver once the limit elapses and exits with status 124. On
//! Windows the command runs unwrapped and has no enforced limit at all.

use std::sync::Arc;
use std::time::Duration;

use crate::config::ExecutionConfig;
use crate::utils::time::timeout_argument;

use super::command::CommandSpec;

/// Wraps solver commands with the platform's time-limit enforcement
pub trait ProcessLauncher: Send + Sync + std::fmt::Debug {
    /// Produce the command that is actually executed
    fn wrap(&self, command: CommandSpec) -> CommandSpec;

    /// Limit enforced by the wrapper, if any
    fn enforced_limit(&self) -> Option<Duration>;
}

/// Prefixes commands with an external `timeout`-style program
#[derive(Debug, Clone)]
pub struct TimeoutCommandLauncher {
    program: String,
    limit: Duration,
}

impl TimeoutCommandLauncher {
    pub fn new(program: impl Into<String>, limit: Duration) -> Self {
        Self {
            program: program.into(),
            limit,
        }
    }
}

impl ProcessLauncher for TimeoutCommandLauncher {
    fn wrap(&self, command: CommandSpec) -> CommandSpec {
        let CommandSpec {
            program,
            args,
            current_dir,
            capture_stdout,
        } = command;

        CommandSpec::new(self.program.as_str(), current_dir)
            .arg(timeout_argument(self.limit))
            .arg(program)
            .args(args)
            .capture_stdout(capture_stdout)
    }

    fn enforced_limit(&self) -> Option<Duration> {
        Some(self.limit)
    }
}

/// Runs commands as-is, with no time limit
#[derive(Debug, Clone, Copy, Default)]
pub struct UnboundedLauncher;

impl ProcessLauncher for UnboundedLauncher {
    fn wrap(&self, command: CommandSpec) -> CommandSpec {
        command
    }

    fn enforced_limit(&self) -> Option<Duration> {
        None
    }
}

/// Pick the launch strategy for the configured platform
pub fn launcher_for(execution: &ExecutionConfig) -> Arc<dyn ProcessLauncher> {
    let launcher: Arc<dyn ProcessLauncher> = if execution.platform.enforces_timeout() {
        Arc::new(TimeoutCommandLauncher::new(
            execution.timeout_program.clone(),
            execution.time_limit,
        ))
    } else {
        Arc::new(UnboundedLauncher)
    };

    match launcher.enforced_limit() {
        Some(limit) => tracing::debug!(
            platform = %execution.platform,
            limit = %timeout_argument(limit),
            "Solver runs bounded by {}",
            execution.timeout_program
        ),
        None => tracing::warn!(
            platform = %execution.platform,
            "No timeout wrapper on this platform; solver runs are unbounded"
        ),
    }

    launcher
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;

    use super::*;
    use crate::config::Config;
    use crate::platform::Platform;

    fn java() -> CommandSpec {
        CommandSpec::new("java", "/src").args(["-jar", "tcc.jar"])
    }

    #[test]
    fn test_timeout_launcher_prefixes_command() {
        let launcher = TimeoutCommandLauncher::new("timeout", Duration::from_secs(3605));
        let wrapped = launcher.wrap(java());

        assert_eq!(wrapped.program, OsString::from("timeout"));
        assert_eq!(
            wrapped.args,
            vec![
                OsString::from("3605s"),
                OsString::from("java"),
                OsString::from("-jar"),
                OsString::from("tcc.jar"),
            ]
        );
        assert_eq!(wrapped.current_dir, java().current_dir);
        assert_eq!(launcher.enforced_limit(), Some(Duration::from_secs(3605)));
    }

    #[test]
    fn test_unbounded_launcher_is_identity() {
        let wrapped = UnboundedLauncher.wrap(java());
        assert_eq!(wrapped, java());
        assert_eq!(UnboundedLauncher.enforced_limit(), None);
    }

    #[test]
    fn test_launcher_for_platform() {
        let posix = Config::for_platform(Platform::Posix);
        assert!(launcher_for(&posix.execution).enforced_limit().is_some());

        let macos = Config::for_platform(Platform::MacOs);
        let wrapped = launcher_for(&macos.execution).wrap(java());
        assert_eq!(wrapped.program, OsString::from("gtimeout"));

        let windows = Config::for_platform(Platform::Windows);
        let launcher = launcher_for(&windows.execution);
        assert_eq!(launcher.enforced_limit(), None);
        assert_eq!(launcher.wrap(java()), java());
    }
}

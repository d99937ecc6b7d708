//! Host platform detection
//!
//! Command construction differs between Windows, macOS and the other POSIX
//! systems. Everything platform-dependent asks [`Platform`] instead of
//! sprinkling `cfg!` checks through the code.

use std::fmt;

use crate::constants::{
    CPLEX_LIBRARY_PATH_POSIX, CPLEX_LIBRARY_PATH_WINDOWS, MAVEN_PROGRAM, MAVEN_PROGRAM_WINDOWS,
    TIMEOUT_PROGRAM, TIMEOUT_PROGRAM_MACOS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    /// Linux and the other Unix-likes shipping GNU coreutils
    Posix,
}

impl Platform {
    /// Platform the binary was compiled for
    pub fn current() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::MacOs
        } else {
            Self::Posix
        }
    }

    pub fn maven_program(self) -> &'static str {
        match self {
            Self::Windows => MAVEN_PROGRAM_WINDOWS,
            Self::MacOs | Self::Posix => MAVEN_PROGRAM,
        }
    }

    pub fn timeout_program(self) -> &'static str {
        match self {
            Self::MacOs => TIMEOUT_PROGRAM_MACOS,
            Self::Windows | Self::Posix => TIMEOUT_PROGRAM,
        }
    }

    pub fn cplex_library_path(self) -> &'static str {
        match self {
            Self::Windows => CPLEX_LIBRARY_PATH_WINDOWS,
            Self::MacOs | Self::Posix => CPLEX_LIBRARY_PATH_POSIX,
        }
    }

    /// Whether runs are wrapped in an external timeout command.
    ///
    /// Windows has no `timeout` equivalent that reports 124, so solver runs
    /// there are not bounded at all.
    // TODO: bound Windows runs with tokio::time::timeout and a Job Object kill
    pub fn enforces_timeout(self) -> bool {
        !matches!(self, Self::Windows)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Windows => write!(f, "windows"),
            Self::MacOs => write!(f, "macos"),
            Self::Posix => write!(f, "posix"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_program_per_platform() {
        assert_eq!(Platform::Posix.timeout_program(), "timeout");
        assert_eq!(Platform::MacOs.timeout_program(), "gtimeout");
    }

    #[test]
    fn test_maven_program_per_platform() {
        assert_eq!(Platform::Windows.maven_program(), "mvn.cmd");
        assert_eq!(Platform::Posix.maven_program(), "mvn");
    }

    #[test]
    fn test_only_windows_skips_timeout() {
        assert!(!Platform::Windows.enforces_timeout());
        assert!(Platform::MacOs.enforces_timeout());
        assert!(Platform::Posix.enforces_timeout());
    }
}

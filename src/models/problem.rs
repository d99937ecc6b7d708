//! Problem-type model

use std::fmt;

use clap::ValueEnum;

use crate::constants::problem_types;

/// Solver mode selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum ProblemType {
    /// Node, Edge and Arc Routing Problem
    #[value(name = "NEARP")]
    Nearp,
    /// NEARP with turn penalties
    #[value(name = "NEARPTP")]
    NearpTp,
}

impl ProblemType {
    /// Tag passed verbatim to the solver
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nearp => problem_types::NEARP,
            Self::NearpTp => problem_types::NEARPTP,
        }
    }
}

impl fmt::Display for ProblemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_enum_ignores_case() {
        assert_eq!(ProblemType::from_str("NEARP", true).unwrap(), ProblemType::Nearp);
        assert_eq!(ProblemType::from_str("nearptp", true).unwrap(), ProblemType::NearpTp);
        assert!(ProblemType::from_str("NEARP-TP", true).is_err());
    }

    #[test]
    fn test_display_matches_solver_tag() {
        assert_eq!(ProblemType::Nearp.to_string(), "NEARP");
        assert_eq!(ProblemType::NearpTp.to_string(), "NEARPTP");
    }
}

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The outcome of a single match, as reported by the source table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchResult {
    Win,
    Loss,
}

impl MatchResult {
    /// Returns true when the result is a win.
    pub fn is_win(&self) -> bool {
        matches!(self, MatchResult::Win)
    }
}

impl FromStr for MatchResult {
    type Err = CoreError;

    /// Parses the source table's `Result` column. Only the exact labels
    /// `"Win"` and `"Loss"` are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Win" => Ok(MatchResult::Win),
            "Loss" => Ok(MatchResult::Loss),
            other => Err(CoreError::InvalidInput(
                "Result".to_string(),
                other.to_string(),
            )),
        }
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchResult::Win => write!(f, "Win"),
            MatchResult::Loss => write!(f, "Loss"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_exact_labels_only() {
        assert_eq!("Win".parse::<MatchResult>().unwrap(), MatchResult::Win);
        assert_eq!("Loss".parse::<MatchResult>().unwrap(), MatchResult::Loss);
        assert!("win".parse::<MatchResult>().is_err());
        assert!("Draw".parse::<MatchResult>().is_err());
        assert!("".parse::<MatchResult>().is_err());
    }

    #[test]
    fn display_round_trips() {
        for result in [MatchResult::Win, MatchResult::Loss] {
            assert_eq!(result.to_string().parse::<MatchResult>().unwrap(), result);
        }
    }
}

//! Error types for the game core.

use thiserror::Error;

/// Errors surfaced by the game core.
///
/// No operation retries internally; every fallible call returns one of these
/// and leaves recovery to the caller.
#[derive(Debug, Error)]
pub enum GameError {
    /// A construction-time parameter was rejected (bad sigma, unknown
    /// variant code, malformed grid dimensions). Fatal to that call.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A move request was not acceptable (e.g. `Stay` while the no-staying
    /// rule is active). Recoverable: re-prompt for a different direction.
    #[error("invalid direction: {0}")]
    InvalidDirection(String),

    /// A move was requested after game over. Recoverable: reset the agent.
    #[error("agent is dead; reset to start a new game")]
    DeadAgent,

    /// Config file I/O failure.
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file parse failure.
    #[error("config parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
}

impl GameError {
    /// Whether the caller can recover without tearing down the session.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, GameError::InvalidDirection(_) | GameError::DeadAgent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverability() {
        assert!(GameError::DeadAgent.is_recoverable());
        assert!(GameError::InvalidDirection("stay".into()).is_recoverable());
        assert!(!GameError::InvalidParameter("sigma".into()).is_recoverable());
    }
}

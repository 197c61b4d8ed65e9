use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Client-input failures for the login and vote operations. All map to 4xx
/// responses; none is ever fatal or retried server-side.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VoteError {
    #[error("Unknown player")]
    InvalidPlayer,
    #[error("No active session")]
    NotLoggedIn,
    #[error("Vote target is not on the roster")]
    InvalidTarget,
    #[error("Players cannot rate themselves")]
    SelfVoteForbidden,
    #[error("Score must be an integer from 1 to 10")]
    InvalidScore,
}

impl VoteError {
    /// Machine-readable wire code, as serialized into `{"error": code}`.
    pub const fn code(&self) -> &'static str {
        match self {
            VoteError::InvalidPlayer => "invalid_player",
            VoteError::NotLoggedIn => "not_logged_in",
            VoteError::InvalidTarget => "invalid_to",
            VoteError::SelfVoteForbidden => "self_vote_forbidden",
            VoteError::InvalidScore => "invalid_score",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

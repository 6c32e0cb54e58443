//! Domain error types.
//!
//! Every public operation in the competition core reports failure through
//! [`CompetitionError`]. Storage faults pass through untouched; everything
//! else is a named, caller-recoverable failure kind.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompetitionError {
    #[error("invalid request: {0}")]
    Invalid(String),

    #[error("competition limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("rate limited, retry in {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("permission denied: missing {permission}")]
    PermissionDenied { permission: String },

    #[error("competition {0} not found")]
    NotFound(i64),

    #[error("competition {0} is not active")]
    InactiveCompetition(i64),

    #[error("competition {id} reached maximum participants ({max})")]
    CapacityExceeded { id: i64, max: i64 },

    #[error("competition {id} is invite-only")]
    InviteOnly { id: i64 },

    #[error("player {player_id} already has a participation record for competition {competition_id}")]
    DuplicateParticipant { competition_id: i64, player_id: i64 },

    #[error("player {player_id} already left competition {competition_id}")]
    AlreadyLeft { competition_id: i64, player_id: i64 },

    #[error("player {player_id} is not a participant of competition {competition_id}")]
    NotAParticipant { competition_id: i64, player_id: i64 },

    #[error("player {0} not found")]
    PlayerNotFound(i64),

    #[error("player {0} has no linked accounts")]
    NoAccounts(i64),

    #[error("competition {0} has no start date and cannot be ranked")]
    DraftCompetition(i64),

    #[error("match data lookup failed: {0}")]
    Lookup(String),

    #[error("invalid stored data: {0}")]
    Corrupt(String),

    #[error(transparent)]
    Storage(#[from] sqlx::Error),
}

impl CompetitionError {
    /// Whether a retry of the same call could reasonably succeed without
    /// any other state change.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            CompetitionError::RateLimited { .. } | CompetitionError::Lookup(_)
        )
    }
}

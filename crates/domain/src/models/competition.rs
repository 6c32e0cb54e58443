//! Competition aggregate and its derived status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::criteria::Criteria;

/// Who may enter a competition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Visibility {
    Open,
    InviteOnly,
    ServerWide,
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Visibility::Open => write!(f, "OPEN"),
            Visibility::InviteOnly => write!(f, "INVITE_ONLY"),
            Visibility::ServerWide => write!(f, "SERVER_WIDE"),
        }
    }
}

/// Logical competition state. Never persisted; always recomputed from the
/// stored dates and cancellation flag so it cannot drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompetitionStatus {
    Draft,
    Active,
    Ended,
    Cancelled,
}

/// A server-scoped leaderboard contest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Competition {
    pub id: i64,
    pub server_id: String,
    pub owner_id: String,
    pub channel_id: String,
    pub title: String,
    pub description: Option<String>,
    pub visibility: Visibility,
    pub max_participants: i64,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub is_cancelled: bool,
    pub criteria: Criteria,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Competition {
    /// Derive the logical status at `now`.
    ///
    /// Cancellation wins over everything, a missing start date means the
    /// competition was never published, and a past end date means it is over.
    pub fn status(&self, now: DateTime<Utc>) -> CompetitionStatus {
        if self.is_cancelled {
            return CompetitionStatus::Cancelled;
        }
        if self.start_date.is_none() {
            return CompetitionStatus::Draft;
        }
        match self.end_date {
            Some(end) if end <= now => CompetitionStatus::Ended,
            _ => CompetitionStatus::Active,
        }
    }

    /// Whether the competition still occupies an owner/server slot: anything
    /// not cancelled and not ended, drafts included.
    pub fn counts_toward_limits(&self, now: DateTime<Utc>) -> bool {
        matches!(
            self.status(now),
            CompetitionStatus::Draft | CompetitionStatus::Active
        )
    }
}

/// Validated input for creating a competition.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateCompetitionRequest {
    pub server_id: String,
    pub owner_id: String,
    pub channel_id: String,

    #[validate(length(min = 1, max = 100, message = "title must be 1-100 characters"))]
    pub title: String,

    #[validate(length(max = 1024, message = "description must be at most 1024 characters"))]
    pub description: Option<String>,

    pub visibility: Visibility,

    #[validate(range(min = 2, max = 200, message = "max_participants must be between 2 and 200"))]
    pub max_participants: i64,

    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,

    pub criteria: Criteria,
}

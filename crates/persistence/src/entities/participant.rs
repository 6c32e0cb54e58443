//! Participant entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::participant::ParticipantStatus;
use sqlx::FromRow;

/// Database enum for participant status, stored as TEXT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
pub enum ParticipantStatusDb {
    #[sqlx(rename = "INVITED")]
    Invited,
    #[sqlx(rename = "JOINED")]
    Joined,
    #[sqlx(rename = "LEFT")]
    Left,
}

impl From<ParticipantStatusDb> for ParticipantStatus {
    fn from(db: ParticipantStatusDb) -> Self {
        match db {
            ParticipantStatusDb::Invited => ParticipantStatus::Invited,
            ParticipantStatusDb::Joined => ParticipantStatus::Joined,
            ParticipantStatusDb::Left => ParticipantStatus::Left,
        }
    }
}

impl From<ParticipantStatus> for ParticipantStatusDb {
    fn from(status: ParticipantStatus) -> Self {
        match status {
            ParticipantStatus::Invited => ParticipantStatusDb::Invited,
            ParticipantStatus::Joined => ParticipantStatusDb::Joined,
            ParticipantStatus::Left => ParticipantStatusDb::Left,
        }
    }
}

/// Database row mapping for the competition_participants table.
#[derive(Debug, Clone, FromRow)]
pub struct CompetitionParticipantEntity {
    pub competition_id: i64,
    pub player_id: i64,
    pub status: ParticipantStatusDb,
    pub invited_by: Option<String>,
    pub invited_at: Option<DateTime<Utc>>,
    pub joined_at: Option<DateTime<Utc>>,
    pub left_at: Option<DateTime<Utc>>,
}

impl From<CompetitionParticipantEntity> for domain::models::CompetitionParticipant {
    fn from(entity: CompetitionParticipantEntity) -> Self {
        Self {
            competition_id: entity.competition_id,
            player_id: entity.player_id,
            status: entity.status.into(),
            invited_by: entity.invited_by,
            invited_at: entity.invited_at,
            joined_at: entity.joined_at,
            left_at: entity.left_at,
        }
    }
}

/// A joined participant together with their display name, used to build
/// leaderboard rosters in one query.
#[derive(Debug, Clone, FromRow)]
pub struct RosterMemberEntity {
    pub player_id: i64,
    pub display_name: String,
}

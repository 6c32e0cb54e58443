//! Participant lifecycle types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a (competition, player) pair. `Left` is terminal:
/// a player who left can never re-enter the same competition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParticipantStatus {
    Invited,
    Joined,
    Left,
}

impl ParticipantStatus {
    /// Whether this row occupies a roster slot for capacity purposes.
    pub fn occupies_slot(self) -> bool {
        matches!(self, ParticipantStatus::Invited | ParticipantStatus::Joined)
    }
}

impl std::fmt::Display for ParticipantStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParticipantStatus::Invited => write!(f, "INVITED"),
            ParticipantStatus::Joined => write!(f, "JOINED"),
            ParticipantStatus::Left => write!(f, "LEFT"),
        }
    }
}

/// A participation record. Timestamps are each set exactly once and never
/// cleared, so the full invite/join/leave history stays queryable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CompetitionParticipant {
    pub competition_id: i64,
    pub player_id: i64,
    pub status: ParticipantStatus,
    pub invited_by: Option<String>,
    pub invited_at: Option<DateTime<Utc>>,
    pub joined_at: Option<DateTime<Utc>>,
    pub left_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_occupancy() {
        assert!(ParticipantStatus::Invited.occupies_slot());
        assert!(ParticipantStatus::Joined.occupies_slot());
        assert!(!ParticipantStatus::Left.occupies_slot());
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_value(ParticipantStatus::Invited).unwrap(),
            serde_json::json!("INVITED")
        );
        assert_eq!(ParticipantStatus::Left.to_string(), "LEFT");
    }
}

//! Point-in-time performance snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::rank::Rank;

/// When in the competition lifecycle a snapshot was captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SnapshotType {
    Start,
    End,
}

impl std::fmt::Display for SnapshotType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotType::Start => write!(f, "START"),
            SnapshotType::End => write!(f, "END"),
        }
    }
}

/// Criteria-shaped measurement payload. Which variant is captured follows
/// from the competition's criteria, not from the snapshot type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SnapshotPayload {
    /// Best ranked standing across the player's linked accounts, `None` when
    /// every account is unranked in the queue.
    Rank { rank: Option<Rank> },
    /// Games played across linked accounts.
    GamesPlayed { games: u32 },
    /// Wins (and the games they came from) across linked accounts.
    WinCount { wins: u32, games: u32 },
}

/// A stored snapshot row. At most one exists per
/// (competition, player, snapshot type); re-capture overwrites it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CompetitionSnapshot {
    pub competition_id: i64,
    pub player_id: i64,
    pub snapshot_type: SnapshotType,
    pub payload: SnapshotPayload,
    pub captured_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::rank::{Division, Tier};

    #[test]
    fn test_payload_kind_tags() {
        let rank = SnapshotPayload::Rank {
            rank: Some(Rank::new(Tier::Gold, Division::II, 50)),
        };
        let json = serde_json::to_value(&rank).unwrap();
        assert_eq!(json["kind"], "rank");
        assert_eq!(json["rank"]["tier"], "GOLD");

        let wins = SnapshotPayload::WinCount { wins: 12, games: 20 };
        let json = serde_json::to_value(&wins).unwrap();
        assert_eq!(json["kind"], "win_count");
        assert_eq!(json["wins"], 12);
    }

    #[test]
    fn test_unranked_payload_round_trips() {
        let payload = SnapshotPayload::Rank { rank: None };
        let json = serde_json::to_string(&payload).unwrap();
        let parsed: SnapshotPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, payload);
    }
}

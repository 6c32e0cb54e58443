//! Leaderboard types, including the heterogeneous score.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::rank::Rank;

/// Version tag written into persisted leaderboard documents.
pub const LEADERBOARD_DOCUMENT_VERSION: u32 = 1;

/// A score is either a plain number (games, wins, win rate, climb) or a
/// ranked standing, depending on the competition's criteria. Serialized
/// untagged so cache documents carry a bare number or a rank object.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Score {
    Numeric(f64),
    Ranked(Rank),
}

impl Score {
    /// Descending sort puts greater scores first.
    pub fn cmp_value(&self, other: &Self) -> std::cmp::Ordering {
        use std::cmp::Ordering;
        match (self, other) {
            (Score::Numeric(a), Score::Numeric(b)) => a.total_cmp(b),
            (Score::Ranked(a), Score::Ranked(b)) => a.cmp(b),
            // Mixed shapes never come out of one criteria; rank-shaped
            // scores sort above plain numbers to keep the order total.
            (Score::Numeric(_), Score::Ranked(_)) => Ordering::Less,
            (Score::Ranked(_), Score::Numeric(_)) => Ordering::Greater,
        }
    }
}

impl PartialEq for Score {
    fn eq(&self, other: &Self) -> bool {
        self.cmp_value(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for Score {}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp_value(other))
    }
}

impl Ord for Score {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.cmp_value(other)
    }
}

/// One ranked row of a computed leaderboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LeaderboardEntry {
    pub player_id: i64,
    pub player_name: String,
    pub score: Score,
    /// Standard competition rank: 1 + count of players strictly ahead.
    pub rank: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

/// A computed leaderboard for one competition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Leaderboard {
    pub competition_id: i64,
    pub calculated_at: DateTime<Utc>,
    pub entries: Vec<LeaderboardEntry>,
}

/// The cache document a display layer reads. Produced from a computed
/// leaderboard; this core never writes it to the object store itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LeaderboardDocument {
    pub version: u32,
    pub competition_id: i64,
    pub calculated_at: DateTime<Utc>,
    pub entries: Vec<LeaderboardEntry>,
}

impl From<Leaderboard> for LeaderboardDocument {
    fn from(board: Leaderboard) -> Self {
        Self {
            version: LEADERBOARD_DOCUMENT_VERSION,
            competition_id: board.competition_id,
            calculated_at: board.calculated_at,
            entries: board.entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::rank::{Division, Tier};

    #[test]
    fn test_numeric_scores_compare_directly() {
        assert!(Score::Numeric(100.0) > Score::Numeric(80.0));
        assert_eq!(Score::Numeric(80.0), Score::Numeric(80.0));
    }

    #[test]
    fn test_rank_scores_compare_by_ladder() {
        let gold = Score::Ranked(Rank::new(Tier::Gold, Division::II, 50));
        let silver = Score::Ranked(Rank::new(Tier::Silver, Division::I, 99));
        assert!(gold > silver);
    }

    #[test]
    fn test_score_serializes_untagged() {
        let json = serde_json::to_value(Score::Numeric(42.0)).unwrap();
        assert_eq!(json, serde_json::json!(42.0));

        let json = serde_json::to_value(Score::Ranked(Rank::new(Tier::Gold, Division::I, 10)))
            .unwrap();
        assert_eq!(json["tier"], "GOLD");
        assert_eq!(json["division"], "I");
        assert_eq!(json["league_points"], 10);
    }

    #[test]
    fn test_document_carries_version_tag() {
        let board = Leaderboard {
            competition_id: 5,
            calculated_at: Utc::now(),
            entries: vec![],
        };
        let doc = LeaderboardDocument::from(board);
        assert_eq!(doc.version, LEADERBOARD_DOCUMENT_VERSION);
        assert_eq!(doc.competition_id, 5);
    }
}

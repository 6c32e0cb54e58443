//! Scoring criteria for competitions.
//!
//! A competition is created with exactly one criteria value and it never
//! changes afterwards. The criteria decides which snapshot payload shape is
//! captured and which scoring function the leaderboard applies.

use serde::{Deserialize, Serialize};

/// Ranked queues competitions can score against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Queue {
    #[serde(rename = "RANKED_SOLO_5x5")]
    RankedSolo5x5,
    #[serde(rename = "RANKED_FLEX_SR")]
    RankedFlexSr,
}

impl std::fmt::Display for Queue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Queue::RankedSolo5x5 => write!(f, "RANKED_SOLO_5x5"),
            Queue::RankedFlexSr => write!(f, "RANKED_FLEX_SR"),
        }
    }
}

/// What a competition measures. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Criteria {
    MostGamesPlayed { queue: Queue },
    HighestRank { queue: Queue },
    MostRankClimb { queue: Queue },
    MostWinsPlayer { queue: Queue },
    MostWinsChampion { champion_id: i32, queue: Queue },
    HighestWinRate { queue: Queue, min_games: u32 },
}

impl Criteria {
    /// The queue this criteria reads stats from.
    pub fn queue(&self) -> Queue {
        match self {
            Criteria::MostGamesPlayed { queue }
            | Criteria::HighestRank { queue }
            | Criteria::MostRankClimb { queue }
            | Criteria::MostWinsPlayer { queue }
            | Criteria::MostWinsChampion { queue, .. }
            | Criteria::HighestWinRate { queue, .. } => *queue,
        }
    }

    /// Whether this criteria is scored from rank snapshots rather than
    /// aggregate match counts.
    pub fn is_rank_based(&self) -> bool {
        matches!(
            self,
            Criteria::HighestRank { .. } | Criteria::MostRankClimb { .. }
        )
    }
}

//! Port for the external match/rank data collaborators.
//!
//! The command layer wires in a real Riot-backed implementation; tests use
//! in-memory fakes. Implementations are expected to bound every call with
//! their own timeout so no core operation can block indefinitely.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::CompetitionError;
use crate::models::criteria::Queue;
use crate::models::rank::Rank;

/// Inclusive time window for aggregate match lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }
}

/// Aggregate match counts for one account in one queue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueueStats {
    pub wins: u32,
    pub games: u32,
}

/// External source of ranked standings and match aggregates.
#[async_trait]
pub trait MatchDataProvider: Send + Sync {
    /// Current ranked standing for an account, `None` if unranked.
    async fn fetch_player_rank(
        &self,
        puuid: &str,
        queue: Queue,
    ) -> Result<Option<Rank>, CompetitionError>;

    /// Win/game counts for an account in a queue over a date range,
    /// optionally filtered to a single champion.
    async fn fetch_player_queue_stats(
        &self,
        puuid: &str,
        queue: Queue,
        range: DateRange,
        champion_id: Option<i32>,
    ) -> Result<QueueStats, CompetitionError>;
}

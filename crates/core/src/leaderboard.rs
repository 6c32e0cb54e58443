//! Leaderboard calculation.
//!
//! Gathers the roster (JOINED participants only), computes each player's
//! score with the criteria-specific function, and delegates ordering and
//! tie-aware rank assignment to the pure ranking service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use domain::error::CompetitionError;
use domain::models::competition::{Competition, CompetitionStatus};
use domain::models::criteria::{Criteria, Queue};
use domain::models::leaderboard::{Leaderboard, LeaderboardDocument, Score};
use domain::models::rank::Rank;
use domain::models::snapshot::{SnapshotPayload, SnapshotType};
use domain::services::match_data::{DateRange, MatchDataProvider, QueueStats};
use domain::services::ranking::{rank_players, ScoredPlayer};
use persistence::repositories::{
    CompetitionRepository, ParticipantRepository, PlayerRepository, SnapshotRepository,
};
use sqlx::SqlitePool;
use tracing::warn;

/// Service computing ranked leaderboards for competitions.
#[derive(Clone)]
pub struct LeaderboardService {
    competitions: CompetitionRepository,
    participants: ParticipantRepository,
    players: PlayerRepository,
    snapshots: SnapshotRepository,
    provider: Arc<dyn MatchDataProvider>,
}

impl LeaderboardService {
    pub fn new(pool: SqlitePool, provider: Arc<dyn MatchDataProvider>) -> Self {
        Self {
            competitions: CompetitionRepository::new(pool.clone()),
            participants: ParticipantRepository::new(pool.clone()),
            players: PlayerRepository::new(pool.clone()),
            snapshots: SnapshotRepository::new(pool),
            provider,
        }
    }

    /// Compute the ranked leaderboard for a competition.
    ///
    /// Fails on drafts (nothing to rank without dates). An active
    /// competition with an empty roster yields an empty board, not an error.
    pub async fn calculate_leaderboard(
        &self,
        competition_id: i64,
    ) -> Result<Leaderboard, CompetitionError> {
        let competition: Competition = self
            .competitions
            .find_by_id(competition_id)
            .await?
            .map(Into::into)
            .ok_or(CompetitionError::NotFound(competition_id))?;

        let now = Utc::now();
        if competition.status(now) == CompetitionStatus::Draft {
            return Err(CompetitionError::DraftCompetition(competition_id));
        }

        let roster = self.participants.list_roster(competition_id).await?;
        let mut scored = Vec::with_capacity(roster.len());
        for member in roster {
            let (score, metadata) = self
                .score_player(&competition, member.player_id, now)
                .await?;
            scored.push(ScoredPlayer {
                player_id: member.player_id,
                player_name: member.display_name,
                score,
                metadata,
            });
        }

        Ok(Leaderboard {
            competition_id,
            calculated_at: now,
            entries: rank_players(scored),
        })
    }

    /// Compute the leaderboard and wrap it in the versioned cache document
    /// an external job persists for the display layer.
    pub async fn calculate_document(
        &self,
        competition_id: i64,
    ) -> Result<LeaderboardDocument, CompetitionError> {
        Ok(self.calculate_leaderboard(competition_id).await?.into())
    }

    async fn score_player(
        &self,
        competition: &Competition,
        player_id: i64,
        now: DateTime<Utc>,
    ) -> Result<(Score, Option<serde_json::Value>), CompetitionError> {
        match &competition.criteria {
            Criteria::HighestRank { .. } => {
                let rank = self
                    .snapshot_rank(competition.id, player_id, SnapshotType::End)
                    .await?
                    .unwrap_or_else(Rank::lowest);
                Ok((Score::Ranked(rank), None))
            }
            Criteria::MostRankClimb { .. } => {
                let start = self
                    .snapshot_rank(competition.id, player_id, SnapshotType::Start)
                    .await?;
                let end = self
                    .snapshot_rank(competition.id, player_id, SnapshotType::End)
                    .await?;
                // No measurable climb without both endpoints.
                let climb = match (start, end) {
                    (Some(start), Some(end)) => {
                        (end.ladder_points() - start.ladder_points()) as f64
                    }
                    _ => 0.0,
                };
                Ok((Score::Numeric(climb), None))
            }
            Criteria::MostGamesPlayed { queue } => {
                let stats = self
                    .player_stats(competition, player_id, *queue, None, now)
                    .await;
                Ok((Score::Numeric(f64::from(stats.games)), None))
            }
            Criteria::MostWinsPlayer { queue } => {
                let stats = self
                    .player_stats(competition, player_id, *queue, None, now)
                    .await;
                let metadata = serde_json::json!({ "games": stats.games });
                Ok((Score::Numeric(f64::from(stats.wins)), Some(metadata)))
            }
            Criteria::MostWinsChampion { champion_id, queue } => {
                let stats = self
                    .player_stats(competition, player_id, *queue, Some(*champion_id), now)
                    .await;
                let metadata =
                    serde_json::json!({ "games": stats.games, "champion_id": champion_id });
                Ok((Score::Numeric(f64::from(stats.wins)), Some(metadata)))
            }
            Criteria::HighestWinRate { queue, min_games } => {
                let stats = self
                    .player_stats(competition, player_id, *queue, None, now)
                    .await;
                // Below the games floor the player stays visible but sorts
                // beneath every real win rate.
                let score = if stats.games >= (*min_games).max(1) {
                    f64::from(stats.wins) / f64::from(stats.games)
                } else {
                    -1.0
                };
                let metadata = serde_json::json!({ "wins": stats.wins, "games": stats.games });
                Ok((Score::Numeric(score), Some(metadata)))
            }
        }
    }

    async fn snapshot_rank(
        &self,
        competition_id: i64,
        player_id: i64,
        snapshot_type: SnapshotType,
    ) -> Result<Option<Rank>, CompetitionError> {
        let snapshot = self
            .snapshots
            .find(competition_id, player_id, snapshot_type)
            .await?;
        Ok(snapshot.and_then(|entity| match entity.payload.0 {
            SnapshotPayload::Rank { rank } => rank,
            _ => None,
        }))
    }

    /// Summed queue stats across the player's linked accounts over the
    /// competition window. Lookup failures score the player zero instead of
    /// failing the whole board, matching the batch-snapshot containment.
    async fn player_stats(
        &self,
        competition: &Competition,
        player_id: i64,
        queue: Queue,
        champion_id: Option<i32>,
        now: DateTime<Utc>,
    ) -> QueueStats {
        let start = match competition.start_date {
            Some(start) => start,
            None => return QueueStats::default(),
        };
        let end = competition.end_date.map_or(now, |end| end.min(now));
        let range = DateRange::new(start, end);

        let accounts = match self.players.list_accounts(player_id).await {
            Ok(accounts) => accounts,
            Err(err) => {
                warn!(player_id, error = %err, "Failed to load accounts for scoring");
                return QueueStats::default();
            }
        };

        let mut total = QueueStats::default();
        for account in accounts {
            match self
                .provider
                .fetch_player_queue_stats(&account.puuid, queue, range, champion_id)
                .await
            {
                Ok(stats) => {
                    total.wins += stats.wins;
                    total.games += stats.games;
                }
                Err(err) => {
                    warn!(
                        player_id,
                        puuid = %account.puuid,
                        error = %err,
                        "Queue stats lookup failed, scoring account as zero"
                    );
                }
            }
        }
        total
    }
}

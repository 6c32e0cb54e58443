//! Performance snapshot capture.
//!
//! Snapshots record a player's relevant stat (shaped by the competition's
//! criteria) at the START or END of a competition. Writes are upserts, so a
//! retried snapshot job overwrites instead of erroring.

use std::sync::Arc;

use chrono::Utc;
use domain::error::CompetitionError;
use domain::models::criteria::Criteria;
use domain::models::snapshot::{CompetitionSnapshot, SnapshotPayload, SnapshotType};
use domain::services::match_data::{DateRange, MatchDataProvider, QueueStats};
use persistence::entities::RiotAccountEntity;
use persistence::repositories::{
    CompetitionRepository, ParticipantRepository, PlayerRepository, SnapshotRepository,
};
use sqlx::SqlitePool;
use tracing::{info, warn};

/// Outcome of a best-effort batch snapshot run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SnapshotBatchReport {
    pub succeeded: u32,
    pub failed: u32,
}

/// Service capturing criteria-shaped performance snapshots.
#[derive(Clone)]
pub struct SnapshotService {
    competitions: CompetitionRepository,
    participants: ParticipantRepository,
    players: PlayerRepository,
    snapshots: SnapshotRepository,
    provider: Arc<dyn MatchDataProvider>,
}

impl SnapshotService {
    pub fn new(pool: SqlitePool, provider: Arc<dyn MatchDataProvider>) -> Self {
        Self {
            competitions: CompetitionRepository::new(pool.clone()),
            participants: ParticipantRepository::new(pool.clone()),
            players: PlayerRepository::new(pool.clone()),
            snapshots: SnapshotRepository::new(pool),
            provider,
        }
    }

    /// Capture (or re-capture) one player's snapshot. Multi-account players
    /// are reduced to a single payload: best rank, summed counters.
    pub async fn create_snapshot(
        &self,
        competition_id: i64,
        player_id: i64,
        snapshot_type: SnapshotType,
        criteria: &Criteria,
    ) -> Result<CompetitionSnapshot, CompetitionError> {
        self.players
            .find_by_id(player_id)
            .await?
            .ok_or(CompetitionError::PlayerNotFound(player_id))?;

        let accounts = self.players.list_accounts(player_id).await?;
        if accounts.is_empty() {
            return Err(CompetitionError::NoAccounts(player_id));
        }

        let competition = self
            .competitions
            .find_by_id(competition_id)
            .await?
            .ok_or(CompetitionError::NotFound(competition_id))?;

        let now = Utc::now();
        // Same window the leaderboard scores over: games after the end date
        // never count, even when the job is retried late.
        let start = competition.start_date.unwrap_or(now);
        let end = competition.end_date.map_or(now, |end| end.min(now));
        let range = DateRange::new(start, end);
        let payload = self.capture_payload(&accounts, criteria, range).await?;

        let entity = self
            .snapshots
            .upsert(competition_id, player_id, snapshot_type, &payload, now)
            .await?;
        info!(
            competition_id,
            player_id,
            snapshot_type = %snapshot_type,
            "Captured competition snapshot"
        );
        Ok(entity.into())
    }

    /// Capture snapshots for every JOINED participant, independently.
    ///
    /// One player's lookup failure never aborts the rest: failures are
    /// logged and counted, and the report is returned to the scheduler.
    pub async fn create_snapshots_for_all_participants(
        &self,
        competition_id: i64,
        snapshot_type: SnapshotType,
        criteria: &Criteria,
    ) -> Result<SnapshotBatchReport, CompetitionError> {
        let player_ids = self.participants.list_joined_ids(competition_id).await?;

        let mut report = SnapshotBatchReport::default();
        for player_id in player_ids {
            match self
                .create_snapshot(competition_id, player_id, snapshot_type, criteria)
                .await
            {
                Ok(_) => report.succeeded += 1,
                Err(err) => {
                    warn!(
                        competition_id,
                        player_id,
                        snapshot_type = %snapshot_type,
                        error = %err,
                        "Snapshot failed for player, continuing batch"
                    );
                    report.failed += 1;
                }
            }
        }

        info!(
            competition_id,
            snapshot_type = %snapshot_type,
            succeeded = report.succeeded,
            failed = report.failed,
            "Snapshot batch finished"
        );
        Ok(report)
    }

    /// Parsed snapshot payload, or None if never captured.
    pub async fn get_snapshot(
        &self,
        competition_id: i64,
        player_id: i64,
        snapshot_type: SnapshotType,
    ) -> Result<Option<CompetitionSnapshot>, CompetitionError> {
        Ok(self
            .snapshots
            .find(competition_id, player_id, snapshot_type)
            .await?
            .map(Into::into))
    }

    async fn capture_payload(
        &self,
        accounts: &[RiotAccountEntity],
        criteria: &Criteria,
        range: DateRange,
    ) -> Result<SnapshotPayload, CompetitionError> {
        match criteria {
            Criteria::HighestRank { queue } | Criteria::MostRankClimb { queue } => {
                let mut best = None;
                for account in accounts {
                    if let Some(rank) = self
                        .provider
                        .fetch_player_rank(&account.puuid, *queue)
                        .await?
                    {
                        best = Some(match best {
                            Some(current) if current >= rank => current,
                            _ => rank,
                        });
                    }
                }
                Ok(SnapshotPayload::Rank { rank: best })
            }
            Criteria::MostGamesPlayed { queue } => {
                let stats = self.summed_stats(accounts, *queue, range, None).await?;
                Ok(SnapshotPayload::GamesPlayed { games: stats.games })
            }
            Criteria::MostWinsPlayer { queue } => {
                let stats = self.summed_stats(accounts, *queue, range, None).await?;
                Ok(SnapshotPayload::WinCount {
                    wins: stats.wins,
                    games: stats.games,
                })
            }
            Criteria::MostWinsChampion { champion_id, queue } => {
                let stats = self
                    .summed_stats(accounts, *queue, range, Some(*champion_id))
                    .await?;
                Ok(SnapshotPayload::WinCount {
                    wins: stats.wins,
                    games: stats.games,
                })
            }
            Criteria::HighestWinRate { queue, .. } => {
                let stats = self.summed_stats(accounts, *queue, range, None).await?;
                Ok(SnapshotPayload::WinCount {
                    wins: stats.wins,
                    games: stats.games,
                })
            }
        }
    }

    async fn summed_stats(
        &self,
        accounts: &[RiotAccountEntity],
        queue: domain::models::criteria::Queue,
        range: DateRange,
        champion_id: Option<i32>,
    ) -> Result<QueueStats, CompetitionError> {
        let mut total = QueueStats::default();
        for account in accounts {
            let stats = self
                .provider
                .fetch_player_queue_stats(&account.puuid, queue, range, champion_id)
                .await?;
            total.wins += stats.wins;
            total.games += stats.games;
        }
        Ok(total)
    }
}

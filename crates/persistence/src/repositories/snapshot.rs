//! Snapshot repository for database operations.
//!
//! Snapshot writes are upserts on the (competition, player, type) key so a
//! retried snapshot job overwrites rather than errors. Last write wins.

use chrono::{DateTime, Utc};
use domain::models::snapshot::{SnapshotPayload, SnapshotType};
use sqlx::types::Json;
use sqlx::SqlitePool;

use crate::entities::{CompetitionSnapshotEntity, SnapshotTypeDb};
use crate::metrics::QueryTimer;

const SNAPSHOT_COLUMNS: &str =
    "competition_id, player_id, snapshot_type, payload, captured_at";

/// Repository for snapshot-related database operations.
#[derive(Clone)]
pub struct SnapshotRepository {
    pool: SqlitePool,
}

impl SnapshotRepository {
    /// Creates a new SnapshotRepository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert or overwrite the snapshot for a (competition, player, type).
    pub async fn upsert(
        &self,
        competition_id: i64,
        player_id: i64,
        snapshot_type: SnapshotType,
        payload: &SnapshotPayload,
        captured_at: DateTime<Utc>,
    ) -> Result<CompetitionSnapshotEntity, sqlx::Error> {
        let timer = QueryTimer::new("upsert_snapshot");
        let result = sqlx::query_as::<_, CompetitionSnapshotEntity>(&format!(
            r#"
            INSERT INTO competition_snapshots
                (competition_id, player_id, snapshot_type, payload, captured_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT(competition_id, player_id, snapshot_type)
            DO UPDATE SET payload = excluded.payload, captured_at = excluded.captured_at
            RETURNING {SNAPSHOT_COLUMNS}
            "#
        ))
        .bind(competition_id)
        .bind(player_id)
        .bind(SnapshotTypeDb::from(snapshot_type))
        .bind(Json(payload.clone()))
        .bind(captured_at)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Fetch one snapshot, or None if it was never captured.
    pub async fn find(
        &self,
        competition_id: i64,
        player_id: i64,
        snapshot_type: SnapshotType,
    ) -> Result<Option<CompetitionSnapshotEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_snapshot");
        let result = sqlx::query_as::<_, CompetitionSnapshotEntity>(&format!(
            "SELECT {SNAPSHOT_COLUMNS} FROM competition_snapshots \
             WHERE competition_id = $1 AND player_id = $2 AND snapshot_type = $3"
        ))
        .bind(competition_id)
        .bind(player_id)
        .bind(SnapshotTypeDb::from(snapshot_type))
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Count captured snapshots of one type for a competition.
    pub async fn count_by_type(
        &self,
        competition_id: i64,
        snapshot_type: SnapshotType,
    ) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_snapshots_by_type");
        let result = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM competition_snapshots
            WHERE competition_id = $1 AND snapshot_type = $2
            "#,
        )
        .bind(competition_id)
        .bind(SnapshotTypeDb::from(snapshot_type))
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }
}

//! Snapshot entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::snapshot::{SnapshotPayload, SnapshotType};
use sqlx::types::Json;
use sqlx::FromRow;

/// Database enum for snapshot type, stored as TEXT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
pub enum SnapshotTypeDb {
    #[sqlx(rename = "START")]
    Start,
    #[sqlx(rename = "END")]
    End,
}

impl From<SnapshotTypeDb> for SnapshotType {
    fn from(db: SnapshotTypeDb) -> Self {
        match db {
            SnapshotTypeDb::Start => SnapshotType::Start,
            SnapshotTypeDb::End => SnapshotType::End,
        }
    }
}

impl From<SnapshotType> for SnapshotTypeDb {
    fn from(kind: SnapshotType) -> Self {
        match kind {
            SnapshotType::Start => SnapshotTypeDb::Start,
            SnapshotType::End => SnapshotTypeDb::End,
        }
    }
}

/// Database row mapping for the competition_snapshots table.
#[derive(Debug, Clone, FromRow)]
pub struct CompetitionSnapshotEntity {
    pub competition_id: i64,
    pub player_id: i64,
    pub snapshot_type: SnapshotTypeDb,
    pub payload: Json<SnapshotPayload>,
    pub captured_at: DateTime<Utc>,
}

impl From<CompetitionSnapshotEntity> for domain::models::CompetitionSnapshot {
    fn from(entity: CompetitionSnapshotEntity) -> Self {
        Self {
            competition_id: entity.competition_id,
            player_id: entity.player_id,
            snapshot_type: entity.snapshot_type.into(),
            payload: entity.payload.0,
            captured_at: entity.captured_at,
        }
    }
}

//! Participant repository for database operations.
//!
//! The (competition_id, player_id) primary key is the backstop for the
//! duplicate-join race: a unique violation on insert surfaces as the typed
//! `DuplicateParticipant` error, never as a generic storage fault. Capacity
//! is counted inside the insert transaction for the same reason.

use chrono::{DateTime, Utc};
use domain::error::CompetitionError;
use domain::models::participant::ParticipantStatus;
use sqlx::SqlitePool;

use crate::entities::{CompetitionParticipantEntity, ParticipantStatusDb, RosterMemberEntity};
use crate::metrics::QueryTimer;

const PARTICIPANT_COLUMNS: &str =
    "competition_id, player_id, status, invited_by, invited_at, joined_at, left_at";

/// Repository for participant-related database operations.
#[derive(Clone)]
pub struct ParticipantRepository {
    pool: SqlitePool,
}

impl ParticipantRepository {
    /// Creates a new ParticipantRepository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a fresh participation row (direct join or invite), counting
    /// capacity and inserting in one transaction.
    ///
    /// `joined` selects JOINED (direct join) vs INVITED (invite) semantics.
    pub async fn insert_new(
        &self,
        competition_id: i64,
        player_id: i64,
        max_participants: i64,
        joined: bool,
        invited_by: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<CompetitionParticipantEntity, CompetitionError> {
        let timer = QueryTimer::new("insert_participant");
        let mut tx = self.pool.begin().await?;

        let occupied = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM competition_participants
            WHERE competition_id = $1 AND status IN ('JOINED', 'INVITED')
            "#,
        )
        .bind(competition_id)
        .fetch_one(&mut *tx)
        .await?;
        if occupied >= max_participants {
            return Err(CompetitionError::CapacityExceeded {
                id: competition_id,
                max: max_participants,
            });
        }

        let (status, invited_at, joined_at) = if joined {
            (ParticipantStatusDb::Joined, None, Some(now))
        } else {
            (ParticipantStatusDb::Invited, Some(now), None)
        };

        let inserted = sqlx::query_as::<_, CompetitionParticipantEntity>(&format!(
            r#"
            INSERT INTO competition_participants
                (competition_id, player_id, status, invited_by, invited_at, joined_at, left_at)
            VALUES ($1, $2, $3, $4, $5, $6, NULL)
            RETURNING {PARTICIPANT_COLUMNS}
            "#
        ))
        .bind(competition_id)
        .bind(player_id)
        .bind(status)
        .bind(invited_by)
        .bind(invited_at)
        .bind(joined_at)
        .fetch_one(&mut *tx)
        .await;

        let entity = match inserted {
            Ok(entity) => entity,
            Err(sqlx::Error::Database(db_err))
                if matches!(db_err.kind(), sqlx::error::ErrorKind::UniqueViolation) =>
            {
                return Err(CompetitionError::DuplicateParticipant {
                    competition_id,
                    player_id,
                });
            }
            Err(err) => return Err(err.into()),
        };

        tx.commit().await?;
        timer.record();
        Ok(entity)
    }

    /// Find the participation row for a pair, regardless of status.
    pub async fn find(
        &self,
        competition_id: i64,
        player_id: i64,
    ) -> Result<Option<CompetitionParticipantEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_participant");
        let result = sqlx::query_as::<_, CompetitionParticipantEntity>(&format!(
            "SELECT {PARTICIPANT_COLUMNS} FROM competition_participants \
             WHERE competition_id = $1 AND player_id = $2"
        ))
        .bind(competition_id)
        .bind(player_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Promote an INVITED row to JOINED, preserving the invite timestamps.
    /// Returns the number of rows changed.
    pub async fn mark_joined(
        &self,
        competition_id: i64,
        player_id: i64,
        now: DateTime<Utc>,
    ) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("mark_participant_joined");
        let result = sqlx::query(
            r#"
            UPDATE competition_participants
            SET status = 'JOINED', joined_at = $3
            WHERE competition_id = $1 AND player_id = $2 AND status = 'INVITED'
            "#,
        )
        .bind(competition_id)
        .bind(player_id)
        .bind(now)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Move a non-LEFT row to the terminal LEFT state. Prior timestamps are
    /// untouched so the invite/join history stays intact.
    pub async fn mark_left(
        &self,
        competition_id: i64,
        player_id: i64,
        now: DateTime<Utc>,
    ) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("mark_participant_left");
        let result = sqlx::query(
            r#"
            UPDATE competition_participants
            SET status = 'LEFT', left_at = $3
            WHERE competition_id = $1 AND player_id = $2
              AND status IN ('JOINED', 'INVITED')
            "#,
        )
        .bind(competition_id)
        .bind(player_id)
        .bind(now)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Count rows that occupy a roster slot (JOINED or INVITED).
    pub async fn count_occupying(&self, competition_id: i64) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_occupying_participants");
        let result = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM competition_participants
            WHERE competition_id = $1 AND status IN ('JOINED', 'INVITED')
            "#,
        )
        .bind(competition_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Count rows with an exact status.
    pub async fn count_by_status(
        &self,
        competition_id: i64,
        status: ParticipantStatus,
    ) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_participants_by_status");
        let result = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM competition_participants
            WHERE competition_id = $1 AND status = $2
            "#,
        )
        .bind(competition_id)
        .bind(ParticipantStatusDb::from(status))
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Player ids of all JOINED participants, in join order.
    pub async fn list_joined_ids(&self, competition_id: i64) -> Result<Vec<i64>, sqlx::Error> {
        let timer = QueryTimer::new("list_joined_participant_ids");
        let result = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT player_id FROM competition_participants
            WHERE competition_id = $1 AND status = 'JOINED'
            ORDER BY joined_at, player_id
            "#,
        )
        .bind(competition_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// The leaderboard roster: JOINED participants with display names.
    pub async fn list_roster(
        &self,
        competition_id: i64,
    ) -> Result<Vec<RosterMemberEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_roster");
        let result = sqlx::query_as::<_, RosterMemberEntity>(
            r#"
            SELECT cp.player_id, p.display_name
            FROM competition_participants cp
            JOIN players p ON cp.player_id = p.id
            WHERE cp.competition_id = $1 AND cp.status = 'JOINED'
            ORDER BY cp.player_id
            "#,
        )
        .bind(competition_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}

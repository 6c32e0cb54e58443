//! Competition repository for database operations.
//!
//! This is the single write path for competition creation: the owner and
//! server limits are re-checked inside the insert transaction so two
//! concurrent creations cannot both slip past validation.

use chrono::{DateTime, Utc};
use domain::error::CompetitionError;
use domain::models::competition::CreateCompetitionRequest;
use sqlx::types::Json;
use sqlx::SqlitePool;

use crate::entities::{CompetitionEntity, VisibilityDb};
use crate::metrics::QueryTimer;

const COMPETITION_COLUMNS: &str = "id, server_id, owner_id, channel_id, title, description, \
     visibility, max_participants, start_date, end_date, is_cancelled, criteria, \
     created_at, updated_at";

/// Caps on concurrently open (non-cancelled, non-ended) competitions.
#[derive(Debug, Clone, Copy)]
pub struct CompetitionLimits {
    pub max_open_per_owner: i64,
    pub max_open_per_server: i64,
}

impl Default for CompetitionLimits {
    fn default() -> Self {
        Self {
            max_open_per_owner: 1,
            max_open_per_server: 2,
        }
    }
}

/// Repository for competition-related database operations.
#[derive(Clone)]
pub struct CompetitionRepository {
    pool: SqlitePool,
}

impl CompetitionRepository {
    /// Creates a new CompetitionRepository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Count the owner's competitions on a server that still occupy a slot:
    /// not cancelled and not past their end date (drafts included).
    pub async fn count_open_for_owner(
        &self,
        server_id: &str,
        owner_id: &str,
        now: DateTime<Utc>,
    ) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_open_for_owner");
        let result = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM competitions
            WHERE server_id = $1 AND owner_id = $2
              AND is_cancelled = 0
              AND (end_date IS NULL OR end_date > $3)
            "#,
        )
        .bind(server_id)
        .bind(owner_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Count all slot-occupying competitions on a server across owners.
    pub async fn count_open_for_server(
        &self,
        server_id: &str,
        now: DateTime<Utc>,
    ) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_open_for_server");
        let result = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM competitions
            WHERE server_id = $1
              AND is_cancelled = 0
              AND (end_date IS NULL OR end_date > $2)
            "#,
        )
        .bind(server_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Insert a new competition, re-validating the owner and server limits
    /// inside the same transaction as the insert.
    pub async fn create(
        &self,
        request: &CreateCompetitionRequest,
        limits: CompetitionLimits,
        now: DateTime<Utc>,
    ) -> Result<CompetitionEntity, CompetitionError> {
        let timer = QueryTimer::new("create_competition");
        let mut tx = self.pool.begin().await?;

        let owner_count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM competitions
            WHERE server_id = $1 AND owner_id = $2
              AND is_cancelled = 0
              AND (end_date IS NULL OR end_date > $3)
            "#,
        )
        .bind(&request.server_id)
        .bind(&request.owner_id)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;
        if owner_count >= limits.max_open_per_owner {
            return Err(CompetitionError::LimitExceeded(format!(
                "you already have {owner_count} open competition(s) on this server (limit {})",
                limits.max_open_per_owner
            )));
        }

        let server_count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM competitions
            WHERE server_id = $1
              AND is_cancelled = 0
              AND (end_date IS NULL OR end_date > $2)
            "#,
        )
        .bind(&request.server_id)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;
        if server_count >= limits.max_open_per_server {
            return Err(CompetitionError::LimitExceeded(format!(
                "this server already has {server_count} open competitions (limit {})",
                limits.max_open_per_server
            )));
        }

        let entity = sqlx::query_as::<_, CompetitionEntity>(&format!(
            r#"
            INSERT INTO competitions
                (server_id, owner_id, channel_id, title, description, visibility,
                 max_participants, start_date, end_date, is_cancelled, criteria,
                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 0, $10, $11, $11)
            RETURNING {COMPETITION_COLUMNS}
            "#
        ))
        .bind(&request.server_id)
        .bind(&request.owner_id)
        .bind(&request.channel_id)
        .bind(&request.title)
        .bind(&request.description)
        .bind(VisibilityDb::from(request.visibility))
        .bind(request.max_participants)
        .bind(request.start_date)
        .bind(request.end_date)
        .bind(Json(request.criteria.clone()))
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        timer.record();
        Ok(entity)
    }

    /// Find a competition by id.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<CompetitionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_competition_by_id");
        let result = sqlx::query_as::<_, CompetitionEntity>(&format!(
            "SELECT {COMPETITION_COLUMNS} FROM competitions WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List a server's competitions, newest first.
    pub async fn list_by_server(
        &self,
        server_id: &str,
    ) -> Result<Vec<CompetitionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_competitions_by_server");
        let result = sqlx::query_as::<_, CompetitionEntity>(&format!(
            "SELECT {COMPETITION_COLUMNS} FROM competitions \
             WHERE server_id = $1 ORDER BY created_at DESC"
        ))
        .bind(server_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Set the cancellation flag. Returns the number of rows changed (zero
    /// when the competition was already cancelled or does not exist).
    pub async fn cancel(&self, id: i64, now: DateTime<Utc>) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("cancel_competition");
        let result = sqlx::query(
            r#"
            UPDATE competitions
            SET is_cancelled = 1, updated_at = $2
            WHERE id = $1 AND is_cancelled = 0
            "#,
        )
        .bind(id)
        .bind(now)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Update the end date of a competition.
    pub async fn set_end_date(
        &self,
        id: i64,
        end_date: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("set_competition_end_date");
        let result = sqlx::query(
            r#"
            UPDATE competitions
            SET end_date = $2, updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(end_date)
        .bind(now)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}

//! Server permission repository for database operations.

use chrono::{DateTime, Utc};
use domain::models::permission::Permission;
use sqlx::SqlitePool;

use crate::entities::{PermissionDb, ServerPermissionEntity};
use crate::metrics::QueryTimer;

/// Repository for server permission grants.
#[derive(Clone)]
pub struct PermissionRepository {
    pool: SqlitePool,
}

impl PermissionRepository {
    /// Creates a new PermissionRepository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Idempotent grant: the unique (server, user, permission) row is
    /// created or refreshed with the latest granter and timestamp.
    pub async fn grant(
        &self,
        server_id: &str,
        discord_user_id: &str,
        permission: Permission,
        granted_by: &str,
        granted_at: DateTime<Utc>,
    ) -> Result<ServerPermissionEntity, sqlx::Error> {
        let timer = QueryTimer::new("grant_permission");
        let result = sqlx::query_as::<_, ServerPermissionEntity>(
            r#"
            INSERT INTO server_permissions
                (server_id, discord_user_id, permission, granted_by, granted_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT(server_id, discord_user_id, permission)
            DO UPDATE SET granted_by = excluded.granted_by, granted_at = excluded.granted_at
            RETURNING server_id, discord_user_id, permission, granted_by, granted_at
            "#,
        )
        .bind(server_id)
        .bind(discord_user_id)
        .bind(PermissionDb::from(permission))
        .bind(granted_by)
        .bind(granted_at)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Whether a grant exists. Never errors on absence.
    pub async fn has(
        &self,
        server_id: &str,
        discord_user_id: &str,
        permission: Permission,
    ) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("has_permission");
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM server_permissions
                WHERE server_id = $1 AND discord_user_id = $2 AND permission = $3
            )
            "#,
        )
        .bind(server_id)
        .bind(discord_user_id)
        .bind(PermissionDb::from(permission))
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Fetch a grant row, or None when the capability was never granted.
    pub async fn find(
        &self,
        server_id: &str,
        discord_user_id: &str,
        permission: Permission,
    ) -> Result<Option<ServerPermissionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_permission");
        let result = sqlx::query_as::<_, ServerPermissionEntity>(
            r#"
            SELECT server_id, discord_user_id, permission, granted_by, granted_at
            FROM server_permissions
            WHERE server_id = $1 AND discord_user_id = $2 AND permission = $3
            "#,
        )
        .bind(server_id)
        .bind(discord_user_id)
        .bind(PermissionDb::from(permission))
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }
}

//! Server-scoped permission grants and creation capability checks.

use chrono::Utc;
use domain::error::CompetitionError;
use domain::models::permission::{CreateAccess, Permission, ServerPermission};
use persistence::repositories::PermissionRepository;
use sqlx::SqlitePool;
use tracing::info;

/// Service for granting and checking named capabilities on a server.
#[derive(Clone)]
pub struct PermissionService {
    repo: PermissionRepository,
}

impl PermissionService {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            repo: PermissionRepository::new(pool),
        }
    }

    /// Grant a capability to a user on a server. Idempotent: re-granting
    /// refreshes who granted it and when, leaving a single row.
    pub async fn grant_permission(
        &self,
        server_id: &str,
        discord_user_id: &str,
        permission: Permission,
        granted_by: &str,
    ) -> Result<ServerPermission, CompetitionError> {
        let entity = self
            .repo
            .grant(server_id, discord_user_id, permission, granted_by, Utc::now())
            .await?;
        info!(
            server_id,
            discord_user_id,
            permission = %permission,
            granted_by,
            "Granted server permission"
        );
        Ok(entity.into())
    }

    /// Whether the user holds the capability on the server.
    pub async fn has_permission(
        &self,
        server_id: &str,
        discord_user_id: &str,
        permission: Permission,
    ) -> Result<bool, CompetitionError> {
        Ok(self.repo.has(server_id, discord_user_id, permission).await?)
    }

    /// Whether the caller may create competitions on the server.
    ///
    /// `is_admin` is the caller-supplied administrator-equivalent check; the
    /// core does not interpret the platform's permission bits beyond it.
    pub async fn can_create_competition(
        &self,
        server_id: &str,
        discord_user_id: &str,
        is_admin: bool,
    ) -> Result<CreateAccess, CompetitionError> {
        if is_admin {
            return Ok(CreateAccess::allowed());
        }
        if self
            .repo
            .has(server_id, discord_user_id, Permission::CreateCompetition)
            .await?
        {
            Ok(CreateAccess::allowed())
        } else {
            Ok(CreateAccess::denied(Permission::CreateCompetition))
        }
    }

    /// Full grant row, if present.
    pub async fn get_grant(
        &self,
        server_id: &str,
        discord_user_id: &str,
        permission: Permission,
    ) -> Result<Option<ServerPermission>, CompetitionError> {
        Ok(self
            .repo
            .find(server_id, discord_user_id, permission)
            .await?
            .map(Into::into))
    }
}

//! Server permission entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::permission::Permission;
use sqlx::FromRow;

/// Database enum for named capabilities, stored as TEXT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
pub enum PermissionDb {
    #[sqlx(rename = "CREATE_COMPETITION")]
    CreateCompetition,
    #[sqlx(rename = "MANAGE_COMPETITIONS")]
    ManageCompetitions,
}

impl From<PermissionDb> for Permission {
    fn from(db: PermissionDb) -> Self {
        match db {
            PermissionDb::CreateCompetition => Permission::CreateCompetition,
            PermissionDb::ManageCompetitions => Permission::ManageCompetitions,
        }
    }
}

impl From<Permission> for PermissionDb {
    fn from(permission: Permission) -> Self {
        match permission {
            Permission::CreateCompetition => PermissionDb::CreateCompetition,
            Permission::ManageCompetitions => PermissionDb::ManageCompetitions,
        }
    }
}

/// Database row mapping for the server_permissions table.
#[derive(Debug, Clone, FromRow)]
pub struct ServerPermissionEntity {
    pub server_id: String,
    pub discord_user_id: String,
    pub permission: PermissionDb,
    pub granted_by: String,
    pub granted_at: DateTime<Utc>,
}

impl From<ServerPermissionEntity> for domain::models::ServerPermission {
    fn from(entity: ServerPermissionEntity) -> Self {
        Self {
            server_id: entity.server_id,
            discord_user_id: entity.discord_user_id,
            permission: entity.permission.into(),
            granted_by: entity.granted_by,
            granted_at: entity.granted_at,
        }
    }
}

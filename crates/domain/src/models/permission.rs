//! Server-scoped permission grants.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Named capabilities a server admin can grant to members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
    CreateCompetition,
    ManageCompetitions,
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Permission::CreateCompetition => write!(f, "CREATE_COMPETITION"),
            Permission::ManageCompetitions => write!(f, "MANAGE_COMPETITIONS"),
        }
    }
}

/// One grant of a capability to a Discord user on a server. Grants are
/// upserts: re-granting refreshes `granted_by` and `granted_at` in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ServerPermission {
    pub server_id: String,
    pub discord_user_id: String,
    pub permission: Permission,
    pub granted_by: String,
    pub granted_at: DateTime<Utc>,
}

/// Outcome of a create-competition capability check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAccess {
    pub allowed: bool,
    pub reason: Option<String>,
}

impl CreateAccess {
    pub fn allowed() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    pub fn denied(permission: Permission) -> Self {
        Self {
            allowed: false,
            reason: Some(format!("missing {permission} permission on this server")),
        }
    }
}

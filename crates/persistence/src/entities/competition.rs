//! Competition entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::competition::Visibility;
use domain::models::criteria::Criteria;
use sqlx::types::Json;
use sqlx::FromRow;

/// Database enum for competition visibility, stored as TEXT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
pub enum VisibilityDb {
    #[sqlx(rename = "OPEN")]
    Open,
    #[sqlx(rename = "INVITE_ONLY")]
    InviteOnly,
    #[sqlx(rename = "SERVER_WIDE")]
    ServerWide,
}

impl From<VisibilityDb> for Visibility {
    fn from(db: VisibilityDb) -> Self {
        match db {
            VisibilityDb::Open => Visibility::Open,
            VisibilityDb::InviteOnly => Visibility::InviteOnly,
            VisibilityDb::ServerWide => Visibility::ServerWide,
        }
    }
}

impl From<Visibility> for VisibilityDb {
    fn from(visibility: Visibility) -> Self {
        match visibility {
            Visibility::Open => VisibilityDb::Open,
            Visibility::InviteOnly => VisibilityDb::InviteOnly,
            Visibility::ServerWide => VisibilityDb::ServerWide,
        }
    }
}

/// Database row mapping for the competitions table.
#[derive(Debug, Clone, FromRow)]
pub struct CompetitionEntity {
    pub id: i64,
    pub server_id: String,
    pub owner_id: String,
    pub channel_id: String,
    pub title: String,
    pub description: Option<String>,
    pub visibility: VisibilityDb,
    pub max_participants: i64,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub is_cancelled: bool,
    pub criteria: Json<Criteria>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CompetitionEntity> for domain::models::Competition {
    fn from(entity: CompetitionEntity) -> Self {
        Self {
            id: entity.id,
            server_id: entity.server_id,
            owner_id: entity.owner_id,
            channel_id: entity.channel_id,
            title: entity.title,
            description: entity.description,
            visibility: entity.visibility.into(),
            max_participants: entity.max_participants,
            start_date: entity.start_date,
            end_date: entity.end_date,
            is_cancelled: entity.is_cancelled,
            criteria: entity.criteria.0,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

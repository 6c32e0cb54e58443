//! Player and linked account entities (database row mappings).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database row mapping for the players table.
#[derive(Debug, Clone, FromRow)]
pub struct PlayerEntity {
    pub id: i64,
    pub discord_user_id: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<PlayerEntity> for domain::models::Player {
    fn from(entity: PlayerEntity) -> Self {
        Self {
            id: entity.id,
            discord_user_id: entity.discord_user_id,
            display_name: entity.display_name,
            created_at: entity.created_at,
        }
    }
}

/// Database row mapping for the riot_accounts table.
#[derive(Debug, Clone, FromRow)]
pub struct RiotAccountEntity {
    pub id: i64,
    pub player_id: i64,
    pub puuid: String,
    pub game_name: String,
    pub tag_line: String,
    pub region: String,
}

impl From<RiotAccountEntity> for domain::models::RiotAccount {
    fn from(entity: RiotAccountEntity) -> Self {
        Self {
            id: entity.id,
            player_id: entity.player_id,
            puuid: entity.puuid,
            game_name: entity.game_name,
            tag_line: entity.tag_line,
            region: entity.region,
        }
    }
}

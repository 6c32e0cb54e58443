//! Player registry repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::entities::{PlayerEntity, RiotAccountEntity};
use crate::metrics::QueryTimer;

/// Repository for players and their linked Riot accounts.
#[derive(Clone)]
pub struct PlayerRepository {
    pool: SqlitePool,
}

impl PlayerRepository {
    /// Creates a new PlayerRepository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Register a player.
    pub async fn create(
        &self,
        discord_user_id: &str,
        display_name: &str,
        now: DateTime<Utc>,
    ) -> Result<PlayerEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_player");
        let result = sqlx::query_as::<_, PlayerEntity>(
            r#"
            INSERT INTO players (discord_user_id, display_name, created_at)
            VALUES ($1, $2, $3)
            RETURNING id, discord_user_id, display_name, created_at
            "#,
        )
        .bind(discord_user_id)
        .bind(display_name)
        .bind(now)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a player by id.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<PlayerEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_player_by_id");
        let result = sqlx::query_as::<_, PlayerEntity>(
            "SELECT id, discord_user_id, display_name, created_at FROM players WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a player by their Discord account.
    pub async fn find_by_discord_id(
        &self,
        discord_user_id: &str,
    ) -> Result<Option<PlayerEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_player_by_discord_id");
        let result = sqlx::query_as::<_, PlayerEntity>(
            "SELECT id, discord_user_id, display_name, created_at FROM players \
             WHERE discord_user_id = $1",
        )
        .bind(discord_user_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Link a Riot account to a player.
    pub async fn link_account(
        &self,
        player_id: i64,
        puuid: &str,
        game_name: &str,
        tag_line: &str,
        region: &str,
    ) -> Result<RiotAccountEntity, sqlx::Error> {
        let timer = QueryTimer::new("link_riot_account");
        let result = sqlx::query_as::<_, RiotAccountEntity>(
            r#"
            INSERT INTO riot_accounts (player_id, puuid, game_name, tag_line, region)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, player_id, puuid, game_name, tag_line, region
            "#,
        )
        .bind(player_id)
        .bind(puuid)
        .bind(game_name)
        .bind(tag_line)
        .bind(region)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// All Riot accounts linked to a player.
    pub async fn list_accounts(
        &self,
        player_id: i64,
    ) -> Result<Vec<RiotAccountEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_riot_accounts");
        let result = sqlx::query_as::<_, RiotAccountEntity>(
            "SELECT id, player_id, puuid, game_name, tag_line, region \
             FROM riot_accounts WHERE player_id = $1 ORDER BY id",
        )
        .bind(player_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}

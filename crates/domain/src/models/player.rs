//! Player registry models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered player, keyed by their Discord account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Player {
    pub id: i64,
    pub discord_user_id: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
}

/// A linked Riot account. A player may link several; snapshot reduction
/// merges their results (best rank, summed counters).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RiotAccount {
    pub id: i64,
    pub player_id: i64,
    pub puuid: String,
    pub game_name: String,
    pub tag_line: String,
    pub region: String,
}

//! Pure leaderboard ranking.
//!
//! Sorts scored players descending and assigns standard competition ranks:
//! equal scores share a rank number and later ranks skip accordingly, so
//! scores 100, 80, 80, 60 rank 1, 2, 2, 4. The result is independent of the
//! input order.

use crate::models::leaderboard::{LeaderboardEntry, Score};

/// A roster member with their computed score, before ranking.
#[derive(Debug, Clone)]
pub struct ScoredPlayer {
    pub player_id: i64,
    pub player_name: String,
    pub score: Score,
    pub metadata: Option<serde_json::Value>,
}

/// Order players by score (descending, ties broken by player id for a
/// deterministic output order) and assign tie-aware rank numbers.
pub fn rank_players(mut players: Vec<ScoredPlayer>) -> Vec<LeaderboardEntry> {
    players.sort_by(|a, b| {
        b.score
            .cmp_value(&a.score)
            .then_with(|| a.player_id.cmp(&b.player_id))
    });

    let mut entries = Vec::with_capacity(players.len());
    let mut current_rank = 0u32;
    let mut prev_score: Option<Score> = None;

    for (position, player) in players.into_iter().enumerate() {
        let tied = prev_score
            .map(|prev| prev == player.score)
            .unwrap_or(false);
        if !tied {
            // 1 + number of players strictly ahead in sort order.
            current_rank = position as u32 + 1;
        }
        prev_score = Some(player.score);
        entries.push(LeaderboardEntry {
            player_id: player.player_id,
            player_name: player.player_name,
            score: player.score,
            rank: current_rank,
            metadata: player.metadata,
        });
    }

    entries
}

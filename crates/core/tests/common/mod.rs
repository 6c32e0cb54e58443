//! Common test utilities for integration tests.
//!
//! Every test runs against a freshly migrated in-memory SQLite database, so
//! suites are hermetic and need no external services. Match data comes from
//! an in-memory fake provider configured per test.

// Allow dead code in this module - these are helper utilities that may not be
// used by all integration tests but are intentionally available for future use.
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use domain::error::CompetitionError;
use domain::models::competition::{CreateCompetitionRequest, Visibility};
use domain::models::criteria::{Criteria, Queue};
use domain::models::rank::Rank;
use domain::services::match_data::{DateRange, MatchDataProvider, QueueStats};
use persistence::repositories::{CompetitionLimits, CompetitionRepository, PlayerRepository};
use sqlx::SqlitePool;

/// Create a migrated in-memory test pool.
pub async fn create_test_pool() -> SqlitePool {
    persistence::db::create_test_pool().await
}

/// Limits wide enough that seeding never trips the creation caps.
pub fn unbounded_limits() -> CompetitionLimits {
    CompetitionLimits {
        max_open_per_owner: 1000,
        max_open_per_server: 1000,
    }
}

/// A creation request that yields an ACTIVE competition (started yesterday,
/// open end) with room for ten players.
pub fn competition_request(server_id: &str, owner_id: &str) -> CreateCompetitionRequest {
    CreateCompetitionRequest {
        server_id: server_id.to_string(),
        owner_id: owner_id.to_string(),
        channel_id: "channel-1".to_string(),
        title: "Solo queue grind".to_string(),
        description: Some("Most games wins".to_string()),
        visibility: Visibility::Open,
        max_participants: 10,
        start_date: Some(Utc::now() - Duration::days(1)),
        end_date: None,
        criteria: Criteria::MostGamesPlayed {
            queue: Queue::RankedSolo5x5,
        },
    }
}

/// Seed a competition directly through the repository, bypassing the rate
/// limiter and the configured caps.
pub async fn seed_competition(pool: &SqlitePool, request: &CreateCompetitionRequest) -> i64 {
    CompetitionRepository::new(pool.clone())
        .create(request, unbounded_limits(), Utc::now())
        .await
        .expect("Failed to seed competition")
        .id
}

/// Register a player with one linked Riot account; returns (player_id, puuid).
pub async fn seed_player(pool: &SqlitePool, discord_user_id: &str, name: &str) -> (i64, String) {
    let repo = PlayerRepository::new(pool.clone());
    let player = repo
        .create(discord_user_id, name, Utc::now())
        .await
        .expect("Failed to seed player");
    let puuid = format!("puuid-{discord_user_id}");
    repo.link_account(player.id, &puuid, name, "EUW", "europe")
        .await
        .expect("Failed to link account");
    (player.id, puuid)
}

/// Register a player with no linked accounts.
pub async fn seed_bare_player(pool: &SqlitePool, discord_user_id: &str, name: &str) -> i64 {
    PlayerRepository::new(pool.clone())
        .create(discord_user_id, name, Utc::now())
        .await
        .expect("Failed to seed player")
        .id
}

/// In-memory stand-in for the Riot-backed provider.
///
/// Ranks and stats are keyed by puuid; puuids in the failing set error on
/// every lookup, which is how tests exercise per-player containment.
#[derive(Default)]
pub struct MockProvider {
    ranks: Mutex<HashMap<String, Rank>>,
    stats: Mutex<HashMap<String, QueueStats>>,
    failing: Mutex<HashSet<String>>,
    last_stats_range: Mutex<Option<DateRange>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_rank(&self, puuid: &str, rank: Rank) {
        self.ranks.lock().unwrap().insert(puuid.to_string(), rank);
    }

    pub fn set_stats(&self, puuid: &str, wins: u32, games: u32) {
        self.stats
            .lock()
            .unwrap()
            .insert(puuid.to_string(), QueueStats { wins, games });
    }

    pub fn fail_for(&self, puuid: &str) {
        self.failing.lock().unwrap().insert(puuid.to_string());
    }

    /// The window of the most recent stats lookup, for asserting on the
    /// date range callers query over.
    pub fn last_stats_range(&self) -> Option<DateRange> {
        *self.last_stats_range.lock().unwrap()
    }

    fn check_failing(&self, puuid: &str) -> Result<(), CompetitionError> {
        if self.failing.lock().unwrap().contains(puuid) {
            return Err(CompetitionError::Lookup(format!(
                "simulated lookup failure for {puuid}"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl MatchDataProvider for MockProvider {
    async fn fetch_player_rank(
        &self,
        puuid: &str,
        _queue: Queue,
    ) -> Result<Option<Rank>, CompetitionError> {
        self.check_failing(puuid)?;
        Ok(self.ranks.lock().unwrap().get(puuid).copied())
    }

    async fn fetch_player_queue_stats(
        &self,
        puuid: &str,
        _queue: Queue,
        range: DateRange,
        _champion_id: Option<i32>,
    ) -> Result<QueueStats, CompetitionError> {
        *self.last_stats_range.lock().unwrap() = Some(range);
        self.check_failing(puuid)?;
        Ok(self
            .stats
            .lock()
            .unwrap()
            .get(puuid)
            .copied()
            .unwrap_or_default())
    }
}

/// Yesterday, for seeding competitions that are already running.
pub fn yesterday() -> DateTime<Utc> {
    Utc::now() - Duration::days(1)
}

/// An hour ago, for seeding competitions that have already ended.
pub fn an_hour_ago() -> DateTime<Utc> {
    Utc::now() - Duration::hours(1)
}

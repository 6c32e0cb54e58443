//! Riot-backed implementation of the match data port.
//!
//! Ranked standings come from the Riot league API; queue aggregates come
//! from the match-history stats service that fronts the object-store cache.
//! Every request is bounded by the configured timeout, and any failure maps
//! to the transient `Lookup` error so callers can contain it per player.

use std::time::Duration;

use async_trait::async_trait;
use domain::error::CompetitionError;
use domain::models::criteria::Queue;
use domain::models::rank::{Division, Rank, Tier};
use domain::services::match_data::{DateRange, MatchDataProvider, QueueStats};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::RiotSettings;

/// League entry as returned by the Riot league-v4 API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LeagueEntryDto {
    queue_type: String,
    tier: Tier,
    rank: Division,
    league_points: i32,
}

/// Aggregate response from the match-history stats service.
#[derive(Debug, Clone, Deserialize)]
struct QueueStatsDto {
    wins: u32,
    games: u32,
}

/// HTTP client for ranked standings and match aggregates.
#[derive(Clone)]
pub struct RiotApiClient {
    client: Client,
    settings: RiotSettings,
}

impl RiotApiClient {
    pub fn new(settings: RiotSettings) -> Result<Self, CompetitionError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .map_err(|e| CompetitionError::Lookup(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, settings })
    }

    fn lookup_err(context: &str, err: reqwest::Error) -> CompetitionError {
        if err.is_timeout() {
            CompetitionError::Lookup(format!("{context}: request timed out"))
        } else {
            CompetitionError::Lookup(format!("{context}: {err}"))
        }
    }
}

#[async_trait]
impl MatchDataProvider for RiotApiClient {
    async fn fetch_player_rank(
        &self,
        puuid: &str,
        queue: Queue,
    ) -> Result<Option<Rank>, CompetitionError> {
        let url = format!(
            "{}/lol/league/v4/entries/by-puuid/{puuid}",
            self.settings.base_url
        );
        let entries: Vec<LeagueEntryDto> = self
            .client
            .get(&url)
            .header("X-Riot-Token", &self.settings.api_key)
            .send()
            .await
            .map_err(|e| Self::lookup_err("league entries request", e))?
            .error_for_status()
            .map_err(|e| Self::lookup_err("league entries response", e))?
            .json()
            .await
            .map_err(|e| Self::lookup_err("league entries decode", e))?;

        let queue_name = queue.to_string();
        let rank = entries
            .into_iter()
            .find(|entry| entry.queue_type == queue_name)
            .map(|entry| Rank::new(entry.tier, entry.rank, entry.league_points));
        debug!(puuid, %queue, found = rank.is_some(), "Fetched player rank");
        Ok(rank)
    }

    async fn fetch_player_queue_stats(
        &self,
        puuid: &str,
        queue: Queue,
        range: DateRange,
        champion_id: Option<i32>,
    ) -> Result<QueueStats, CompetitionError> {
        let url = format!(
            "{}/players/{puuid}/queue-stats",
            self.settings.stats_base_url
        );
        let mut request = self.client.get(&url).query(&[
            ("queue", queue.to_string()),
            ("start_time", range.start.timestamp_millis().to_string()),
            ("end_time", range.end.timestamp_millis().to_string()),
        ]);
        if let Some(champion_id) = champion_id {
            request = request.query(&[("champion_id", champion_id.to_string())]);
        }

        let stats: QueueStatsDto = request
            .send()
            .await
            .map_err(|e| Self::lookup_err("queue stats request", e))?
            .error_for_status()
            .map_err(|e| Self::lookup_err("queue stats response", e))?
            .json()
            .await
            .map_err(|e| Self::lookup_err("queue stats decode", e))?;

        debug!(
            puuid,
            %queue,
            wins = stats.wins,
            games = stats.games,
            "Fetched queue stats"
        );
        Ok(QueueStats {
            wins: stats.wins,
            games: stats.games,
        })
    }
}

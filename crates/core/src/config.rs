use persistence::db::DatabaseConfig;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database: DatabaseSettings,
    pub riot: RiotSettings,
    #[serde(default)]
    pub limits: LimitsSettings,
    #[serde(default)]
    pub rate_limit: RateLimitSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RiotSettings {
    #[serde(default = "default_riot_base_url")]
    pub base_url: String,

    /// Base URL of the match-history stats service backing queue aggregates.
    #[serde(default = "default_stats_base_url")]
    pub stats_base_url: String,

    pub api_key: String,

    #[serde(default = "default_riot_timeout")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LimitsSettings {
    #[serde(default = "default_max_open_per_owner")]
    pub max_open_per_owner: i64,

    #[serde(default = "default_max_open_per_server")]
    pub max_open_per_server: i64,
}

impl Default for LimitsSettings {
    fn default() -> Self {
        Self {
            max_open_per_owner: default_max_open_per_owner(),
            max_open_per_server: default_max_open_per_server(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitSettings {
    /// Creation attempts allowed per (server, owner) per minute.
    #[serde(default = "default_creations_per_minute")]
    pub creations_per_minute: u32,
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            creations_per_minute: default_creations_per_minute(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from `config/default.toml`, an optional
    /// `config/local.toml` override, and `COMPETITION__`-prefixed
    /// environment variables. A `.env` file is read into the environment
    /// first, if present.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("COMPETITION").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.database.url.clone(),
            max_connections: self.database.max_connections,
            connect_timeout_secs: self.database.connect_timeout_secs,
            idle_timeout_secs: self.database.idle_timeout_secs,
        }
    }
}

fn default_max_connections() -> u32 {
    5
}

fn default_connect_timeout() -> u64 {
    30
}

fn default_idle_timeout() -> u64 {
    600
}

fn default_riot_base_url() -> String {
    "https://europe.api.riotgames.com".to_string()
}

fn default_stats_base_url() -> String {
    "http://localhost:8090".to_string()
}

fn default_riot_timeout() -> u64 {
    5
}

fn default_max_open_per_owner() -> i64 {
    1
}

fn default_max_open_per_server() -> i64 {
    2
}

fn default_creations_per_minute() -> u32 {
    3
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "compact".to_string()
}

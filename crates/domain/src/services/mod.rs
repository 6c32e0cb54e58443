//! Pure domain services and collaborator ports.

pub mod match_data;
pub mod ranking;

pub use match_data::{DateRange, MatchDataProvider, QueueStats};
pub use ranking::{rank_players, ScoredPlayer};

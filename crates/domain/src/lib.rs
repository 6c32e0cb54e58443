//! Domain layer for the guild competition backend.
//!
//! This crate contains:
//! - Domain models (Competition, participants, snapshots, ranks)
//! - Pure business logic services (leaderboard ranking)
//! - Domain error types

pub mod error;
pub mod models;
pub mod services;

pub use error::CompetitionError;

//! Coordination layer for the guild competition backend.
//!
//! Exposes the public operations consumed by the chat-platform command
//! layer: competition creation under owner/server limits and rate limiting,
//! the participant join/invite/leave state machine, permission grants,
//! performance snapshots, and leaderboard calculation.

pub mod competitions;
pub mod config;
pub mod leaderboard;
pub mod logging;
pub mod participants;
pub mod permissions;
pub mod rate_limit;
pub mod riot;
pub mod snapshots;
pub mod validation;

pub use competitions::CompetitionService;
pub use leaderboard::LeaderboardService;
pub use participants::ParticipantService;
pub use permissions::PermissionService;
pub use rate_limit::CreationRateLimiter;
pub use snapshots::{SnapshotBatchReport, SnapshotService};
pub use validation::ValidationService;

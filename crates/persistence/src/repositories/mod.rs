//! Repository implementations for database operations.

pub mod competition;
pub mod participant;
pub mod permission;
pub mod player;
pub mod snapshot;

pub use competition::{CompetitionLimits, CompetitionRepository};
pub use participant::ParticipantRepository;
pub use permission::PermissionRepository;
pub use player::PlayerRepository;
pub use snapshot::SnapshotRepository;

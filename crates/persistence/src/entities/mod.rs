//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod competition;
pub mod participant;
pub mod permission;
pub mod player;
pub mod snapshot;

pub use competition::{CompetitionEntity, VisibilityDb};
pub use participant::{CompetitionParticipantEntity, ParticipantStatusDb, RosterMemberEntity};
pub use permission::{PermissionDb, ServerPermissionEntity};
pub use player::{PlayerEntity, RiotAccountEntity};
pub use snapshot::{CompetitionSnapshotEntity, SnapshotTypeDb};

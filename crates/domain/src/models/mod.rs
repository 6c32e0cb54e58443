//! Domain models for guild competitions.

pub mod competition;
pub mod criteria;
pub mod leaderboard;
pub mod participant;
pub mod permission;
pub mod player;
pub mod rank;
pub mod snapshot;

pub use competition::{Competition, CompetitionStatus, CreateCompetitionRequest, Visibility};
pub use criteria::{Criteria, Queue};
pub use leaderboard::{Leaderboard, LeaderboardDocument, LeaderboardEntry, Score};
pub use participant::{CompetitionParticipant, ParticipantStatus};
pub use permission::{CreateAccess, Permission, ServerPermission};
pub use player::{Player, RiotAccount};
pub use rank::{Division, Rank, Tier};
pub use snapshot::{CompetitionSnapshot, SnapshotPayload, SnapshotType};

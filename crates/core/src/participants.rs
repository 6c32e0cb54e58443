//! Participant lifecycle service.
//!
//! State machine over (competition, player) pairs: INVITED and JOINED are
//! live states, LEFT is terminal. A player who never entered has no row at
//! all, and rows are never deleted.

use chrono::Utc;
use domain::error::CompetitionError;
use domain::models::competition::{Competition, CompetitionStatus, Visibility};
use domain::models::participant::{CompetitionParticipant, ParticipantStatus};
use persistence::repositories::{CompetitionRepository, ParticipantRepository};
use sqlx::SqlitePool;
use tracing::info;

/// Service driving participant state transitions.
#[derive(Clone)]
pub struct ParticipantService {
    competitions: CompetitionRepository,
    participants: ParticipantRepository,
}

impl ParticipantService {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            competitions: CompetitionRepository::new(pool.clone()),
            participants: ParticipantRepository::new(pool),
        }
    }

    async fn active_competition(&self, competition_id: i64) -> Result<Competition, CompetitionError> {
        let competition: Competition = self
            .competitions
            .find_by_id(competition_id)
            .await?
            .map(Into::into)
            .ok_or(CompetitionError::NotFound(competition_id))?;
        if competition.status(Utc::now()) != CompetitionStatus::Active {
            return Err(CompetitionError::InactiveCompetition(competition_id));
        }
        Ok(competition)
    }

    /// Direct join: creates a JOINED row for a player with no history in
    /// this competition. A player who ever left can never rejoin.
    pub async fn add_participant(
        &self,
        competition_id: i64,
        player_id: i64,
    ) -> Result<CompetitionParticipant, CompetitionError> {
        let competition = self.active_competition(competition_id).await?;
        if competition.visibility == Visibility::InviteOnly {
            return Err(CompetitionError::InviteOnly { id: competition_id });
        }

        let entity = self
            .participants
            .insert_new(
                competition_id,
                player_id,
                competition.max_participants,
                true,
                None,
                Utc::now(),
            )
            .await?;
        info!(competition_id, player_id, "Player joined competition");
        Ok(entity.into())
    }

    /// Invite a player. Invited players occupy a roster slot immediately.
    pub async fn invite_participant(
        &self,
        competition_id: i64,
        player_id: i64,
        invited_by: &str,
    ) -> Result<CompetitionParticipant, CompetitionError> {
        let competition = self.active_competition(competition_id).await?;

        let entity = self
            .participants
            .insert_new(
                competition_id,
                player_id,
                competition.max_participants,
                false,
                Some(invited_by),
                Utc::now(),
            )
            .await?;
        info!(competition_id, player_id, invited_by, "Player invited to competition");
        Ok(entity.into())
    }

    /// Accept a pending invite, preserving the invite timestamps.
    pub async fn accept_invite(
        &self,
        competition_id: i64,
        player_id: i64,
    ) -> Result<CompetitionParticipant, CompetitionError> {
        let row = self
            .participants
            .find(competition_id, player_id)
            .await?
            .ok_or(CompetitionError::NotAParticipant {
                competition_id,
                player_id,
            })?;

        match ParticipantStatus::from(row.status) {
            ParticipantStatus::Left => Err(CompetitionError::AlreadyLeft {
                competition_id,
                player_id,
            }),
            ParticipantStatus::Joined => Err(CompetitionError::DuplicateParticipant {
                competition_id,
                player_id,
            }),
            ParticipantStatus::Invited => {
                self.participants
                    .mark_joined(competition_id, player_id, Utc::now())
                    .await?;
                info!(competition_id, player_id, "Player accepted invite");
                self.require(competition_id, player_id).await
            }
        }
    }

    /// Leave a competition: the terminal transition. Permitted regardless of
    /// the competition's derived status; prior timestamps are preserved.
    pub async fn remove_participant(
        &self,
        competition_id: i64,
        player_id: i64,
    ) -> Result<CompetitionParticipant, CompetitionError> {
        let row = self
            .participants
            .find(competition_id, player_id)
            .await?
            .ok_or(CompetitionError::NotAParticipant {
                competition_id,
                player_id,
            })?;

        if ParticipantStatus::from(row.status) == ParticipantStatus::Left {
            return Err(CompetitionError::AlreadyLeft {
                competition_id,
                player_id,
            });
        }

        self.participants
            .mark_left(competition_id, player_id, Utc::now())
            .await?;
        info!(competition_id, player_id, "Player left competition");
        self.require(competition_id, player_id).await
    }

    /// Current status for the pair; None means the player was never a
    /// participant (not an error).
    pub async fn get_participant_status(
        &self,
        competition_id: i64,
        player_id: i64,
    ) -> Result<Option<ParticipantStatus>, CompetitionError> {
        Ok(self
            .participants
            .find(competition_id, player_id)
            .await?
            .map(|row| row.status.into()))
    }

    /// Participants currently occupying a roster slot (JOINED or INVITED).
    pub async fn active_participant_count(
        &self,
        competition_id: i64,
    ) -> Result<i64, CompetitionError> {
        Ok(self.participants.count_occupying(competition_id).await?)
    }

    async fn require(
        &self,
        competition_id: i64,
        player_id: i64,
    ) -> Result<CompetitionParticipant, CompetitionError> {
        self.participants
            .find(competition_id, player_id)
            .await?
            .map(Into::into)
            .ok_or(CompetitionError::NotAParticipant {
                competition_id,
                player_id,
            })
    }
}

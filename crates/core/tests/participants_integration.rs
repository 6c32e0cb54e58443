//! Integration tests for the participant lifecycle state machine.
//!
//! Runs entirely against an in-memory SQLite database.
//!
//! Run with: cargo test --test participants_integration

mod common;

use chrono::Utc;
use common::{an_hour_ago, competition_request, create_test_pool, seed_competition, seed_player};
use competition_core::participants::ParticipantService;
use domain::error::CompetitionError;
use domain::models::competition::Visibility;
use domain::models::participant::ParticipantStatus;

// ============================================================================
// Join Tests
// ============================================================================

#[tokio::test]
async fn test_join_creates_joined_participant() {
    let pool = create_test_pool().await;
    let competition_id = seed_competition(&pool, &competition_request("guild-1", "owner-1")).await;
    let (player_id, _) = seed_player(&pool, "user-1", "Alice").await;

    let service = ParticipantService::new(pool.clone());
    let participant = service
        .add_participant(competition_id, player_id)
        .await
        .unwrap();

    assert_eq!(participant.status, ParticipantStatus::Joined);
    assert!(participant.joined_at.is_some());
    assert!(participant.invited_by.is_none());
    assert_eq!(
        service
            .get_participant_status(competition_id, player_id)
            .await
            .unwrap(),
        Some(ParticipantStatus::Joined)
    );
}

#[tokio::test]
async fn test_join_missing_competition_is_not_found() {
    let pool = create_test_pool().await;
    let (player_id, _) = seed_player(&pool, "user-1", "Alice").await;

    let service = ParticipantService::new(pool.clone());
    let err = service.add_participant(9999, player_id).await.unwrap_err();
    assert!(matches!(err, CompetitionError::NotFound(9999)));
}

#[tokio::test]
async fn test_join_inactive_competition_is_rejected() {
    let pool = create_test_pool().await;
    let mut request = competition_request("guild-1", "owner-1");
    request.end_date = Some(an_hour_ago());
    let competition_id = seed_competition(&pool, &request).await;
    let (player_id, _) = seed_player(&pool, "user-1", "Alice").await;

    let service = ParticipantService::new(pool.clone());
    let err = service
        .add_participant(competition_id, player_id)
        .await
        .unwrap_err();
    assert!(matches!(err, CompetitionError::InactiveCompetition(_)));
}

#[tokio::test]
async fn test_join_twice_is_duplicate() {
    let pool = create_test_pool().await;
    let competition_id = seed_competition(&pool, &competition_request("guild-1", "owner-1")).await;
    let (player_id, _) = seed_player(&pool, "user-1", "Alice").await;

    let service = ParticipantService::new(pool.clone());
    service
        .add_participant(competition_id, player_id)
        .await
        .unwrap();

    let err = service
        .add_participant(competition_id, player_id)
        .await
        .unwrap_err();
    assert!(matches!(err, CompetitionError::DuplicateParticipant { .. }));
}

#[tokio::test]
async fn test_direct_join_rejected_for_invite_only() {
    let pool = create_test_pool().await;
    let mut request = competition_request("guild-1", "owner-1");
    request.visibility = Visibility::InviteOnly;
    let competition_id = seed_competition(&pool, &request).await;
    let (player_id, _) = seed_player(&pool, "user-1", "Alice").await;

    let service = ParticipantService::new(pool.clone());
    let err = service
        .add_participant(competition_id, player_id)
        .await
        .unwrap_err();
    assert!(matches!(err, CompetitionError::InviteOnly { .. }));

    // The invite path still works for the same competition.
    service
        .invite_participant(competition_id, player_id, "owner-1")
        .await
        .unwrap();
    service
        .accept_invite(competition_id, player_id)
        .await
        .unwrap();
}

// ============================================================================
// Capacity Tests
// ============================================================================

#[tokio::test]
async fn test_capacity_rejects_overflow_and_leave_frees_slot() {
    let pool = create_test_pool().await;
    let mut request = competition_request("guild-1", "owner-1");
    request.max_participants = 2;
    let competition_id = seed_competition(&pool, &request).await;

    let service = ParticipantService::new(pool.clone());
    let (first, _) = seed_player(&pool, "user-1", "Alice").await;
    let (second, _) = seed_player(&pool, "user-2", "Bob").await;
    let (third, _) = seed_player(&pool, "user-3", "Cara").await;

    service.add_participant(competition_id, first).await.unwrap();
    service
        .add_participant(competition_id, second)
        .await
        .unwrap();
    assert_eq!(
        service
            .active_participant_count(competition_id)
            .await
            .unwrap(),
        2
    );

    let err = service
        .add_participant(competition_id, third)
        .await
        .unwrap_err();
    assert!(matches!(err, CompetitionError::CapacityExceeded { max: 2, .. }));

    // Leaving releases the slot for a new player.
    service
        .remove_participant(competition_id, first)
        .await
        .unwrap();
    service.add_participant(competition_id, third).await.unwrap();
}

#[tokio::test]
async fn test_invited_players_occupy_capacity() {
    let pool = create_test_pool().await;
    let mut request = competition_request("guild-1", "owner-1");
    request.max_participants = 2;
    let competition_id = seed_competition(&pool, &request).await;

    let service = ParticipantService::new(pool.clone());
    let (first, _) = seed_player(&pool, "user-1", "Alice").await;
    let (second, _) = seed_player(&pool, "user-2", "Bob").await;
    let (third, _) = seed_player(&pool, "user-3", "Cara").await;

    service
        .invite_participant(competition_id, first, "owner-1")
        .await
        .unwrap();
    service
        .invite_participant(competition_id, second, "owner-1")
        .await
        .unwrap();

    let err = service
        .add_participant(competition_id, third)
        .await
        .unwrap_err();
    assert!(matches!(err, CompetitionError::CapacityExceeded { .. }));
}

// ============================================================================
// Invite Tests
// ============================================================================

#[tokio::test]
async fn test_invite_then_accept_preserves_invite_fields() {
    let pool = create_test_pool().await;
    let competition_id = seed_competition(&pool, &competition_request("guild-1", "owner-1")).await;
    let (player_id, _) = seed_player(&pool, "user-1", "Alice").await;

    let service = ParticipantService::new(pool.clone());
    let invited = service
        .invite_participant(competition_id, player_id, "owner-1")
        .await
        .unwrap();
    assert_eq!(invited.status, ParticipantStatus::Invited);
    assert_eq!(invited.invited_by.as_deref(), Some("owner-1"));
    assert!(invited.invited_at.is_some());
    assert!(invited.joined_at.is_none());

    let joined = service
        .accept_invite(competition_id, player_id)
        .await
        .unwrap();
    assert_eq!(joined.status, ParticipantStatus::Joined);
    assert_eq!(joined.invited_at, invited.invited_at);
    assert_eq!(joined.invited_by.as_deref(), Some("owner-1"));
    assert!(joined.joined_at.is_some());
}

#[tokio::test]
async fn test_accept_without_invite_is_not_a_participant() {
    let pool = create_test_pool().await;
    let competition_id = seed_competition(&pool, &competition_request("guild-1", "owner-1")).await;
    let (player_id, _) = seed_player(&pool, "user-1", "Alice").await;

    let service = ParticipantService::new(pool.clone());
    let err = service
        .accept_invite(competition_id, player_id)
        .await
        .unwrap_err();
    assert!(matches!(err, CompetitionError::NotAParticipant { .. }));
}

#[tokio::test]
async fn test_accept_when_already_joined_is_duplicate() {
    let pool = create_test_pool().await;
    let competition_id = seed_competition(&pool, &competition_request("guild-1", "owner-1")).await;
    let (player_id, _) = seed_player(&pool, "user-1", "Alice").await;

    let service = ParticipantService::new(pool.clone());
    service
        .add_participant(competition_id, player_id)
        .await
        .unwrap();

    let err = service
        .accept_invite(competition_id, player_id)
        .await
        .unwrap_err();
    assert!(matches!(err, CompetitionError::DuplicateParticipant { .. }));
}

// ============================================================================
// Leave Tests
// ============================================================================

#[tokio::test]
async fn test_leave_is_terminal_no_rejoin_ever() {
    let pool = create_test_pool().await;
    let competition_id = seed_competition(&pool, &competition_request("guild-1", "owner-1")).await;
    let (player_id, _) = seed_player(&pool, "user-1", "Alice").await;

    let service = ParticipantService::new(pool.clone());
    service
        .add_participant(competition_id, player_id)
        .await
        .unwrap();
    let left = service
        .remove_participant(competition_id, player_id)
        .await
        .unwrap();
    assert_eq!(left.status, ParticipantStatus::Left);
    assert!(left.left_at.is_some());
    // The join timestamp survives the transition.
    assert!(left.joined_at.is_some());

    // Rejoining, being re-invited, and accepting are all permanently closed.
    let rejoin = service
        .add_participant(competition_id, player_id)
        .await
        .unwrap_err();
    assert!(matches!(rejoin, CompetitionError::DuplicateParticipant { .. }));

    let reinvite = service
        .invite_participant(competition_id, player_id, "owner-1")
        .await
        .unwrap_err();
    assert!(matches!(
        reinvite,
        CompetitionError::DuplicateParticipant { .. }
    ));

    let accept = service
        .accept_invite(competition_id, player_id)
        .await
        .unwrap_err();
    assert!(matches!(accept, CompetitionError::AlreadyLeft { .. }));
}

#[tokio::test]
async fn test_leave_twice_is_already_left() {
    let pool = create_test_pool().await;
    let competition_id = seed_competition(&pool, &competition_request("guild-1", "owner-1")).await;
    let (player_id, _) = seed_player(&pool, "user-1", "Alice").await;

    let service = ParticipantService::new(pool.clone());
    service
        .add_participant(competition_id, player_id)
        .await
        .unwrap();
    service
        .remove_participant(competition_id, player_id)
        .await
        .unwrap();

    let err = service
        .remove_participant(competition_id, player_id)
        .await
        .unwrap_err();
    assert!(matches!(err, CompetitionError::AlreadyLeft { .. }));
}

#[tokio::test]
async fn test_leave_allowed_after_competition_ends() {
    let pool = create_test_pool().await;
    let competition_id = seed_competition(&pool, &competition_request("guild-1", "owner-1")).await;
    let (player_id, _) = seed_player(&pool, "user-1", "Alice").await;

    let service = ParticipantService::new(pool.clone());
    service
        .add_participant(competition_id, player_id)
        .await
        .unwrap();

    // End the competition, then leave: leaving is not gated on activity.
    persistence::repositories::CompetitionRepository::new(pool.clone())
        .set_end_date(competition_id, Some(an_hour_ago()), Utc::now())
        .await
        .unwrap();

    let left = service
        .remove_participant(competition_id, player_id)
        .await
        .unwrap();
    assert_eq!(left.status, ParticipantStatus::Left);
}

#[tokio::test]
async fn test_invited_player_can_leave_without_joining() {
    let pool = create_test_pool().await;
    let competition_id = seed_competition(&pool, &competition_request("guild-1", "owner-1")).await;
    let (player_id, _) = seed_player(&pool, "user-1", "Alice").await;

    let service = ParticipantService::new(pool.clone());
    service
        .invite_participant(competition_id, player_id, "owner-1")
        .await
        .unwrap();

    let left = service
        .remove_participant(competition_id, player_id)
        .await
        .unwrap();
    assert_eq!(left.status, ParticipantStatus::Left);
    assert!(left.joined_at.is_none());
}

#[tokio::test]
async fn test_status_is_none_for_unknown_pair() {
    let pool = create_test_pool().await;
    let competition_id = seed_competition(&pool, &competition_request("guild-1", "owner-1")).await;
    let (player_id, _) = seed_player(&pool, "user-1", "Alice").await;

    let service = ParticipantService::new(pool.clone());
    assert_eq!(
        service
            .get_participant_status(competition_id, player_id)
            .await
            .unwrap(),
        None
    );
}

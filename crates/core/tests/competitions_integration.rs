//! Integration tests for competition creation and lifecycle.
//!
//! Runs entirely against an in-memory SQLite database.
//!
//! Run with: cargo test --test competitions_integration

mod common;

use std::sync::Arc;

use chrono::{Duration, Utc};
use common::{an_hour_ago, competition_request, create_test_pool, seed_competition};
use competition_core::competitions::CompetitionService;
use competition_core::rate_limit::CreationRateLimiter;
use competition_core::validation::ValidationService;
use domain::error::CompetitionError;
use domain::models::competition::CompetitionStatus;
use persistence::repositories::CompetitionLimits;
use sqlx::SqlitePool;

fn service(pool: &SqlitePool, limits: CompetitionLimits, rate: u32) -> CompetitionService {
    CompetitionService::new(
        pool.clone(),
        ValidationService::new(pool.clone(), limits),
        Arc::new(CreationRateLimiter::new(rate)),
    )
}

// ============================================================================
// Creation Tests
// ============================================================================

#[tokio::test]
async fn test_create_competition_success() {
    let pool = create_test_pool().await;
    let service = service(&pool, CompetitionLimits::default(), 100);

    let created = service
        .create_competition(competition_request("guild-1", "owner-1"))
        .await
        .unwrap();

    assert!(created.id > 0);
    assert_eq!(created.server_id, "guild-1");
    assert_eq!(created.owner_id, "owner-1");
    assert_eq!(created.status(Utc::now()), CompetitionStatus::Active);

    let fetched = service.get(created.id).await.unwrap();
    assert_eq!(fetched.title, created.title);
}

#[tokio::test]
async fn test_create_rejects_invalid_request() {
    let pool = create_test_pool().await;
    let service = service(&pool, CompetitionLimits::default(), 100);

    let mut request = competition_request("guild-1", "owner-1");
    request.title = String::new();

    let err = service.create_competition(request).await.unwrap_err();
    assert!(matches!(err, CompetitionError::Invalid(_)));
}

#[tokio::test]
async fn test_owner_limit_blocks_second_competition() {
    let pool = create_test_pool().await;
    let service = service(&pool, CompetitionLimits::default(), 100);

    service
        .create_competition(competition_request("guild-1", "owner-1"))
        .await
        .unwrap();

    let err = service
        .create_competition(competition_request("guild-1", "owner-1"))
        .await
        .unwrap_err();
    assert!(matches!(err, CompetitionError::LimitExceeded(_)));

    // Another server is an independent scope for the same owner.
    service
        .create_competition(competition_request("guild-2", "owner-1"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_server_limit_blocks_third_competition() {
    let pool = create_test_pool().await;
    let service = service(&pool, CompetitionLimits::default(), 100);

    service
        .create_competition(competition_request("guild-1", "owner-1"))
        .await
        .unwrap();
    service
        .create_competition(competition_request("guild-1", "owner-2"))
        .await
        .unwrap();

    let err = service
        .create_competition(competition_request("guild-1", "owner-3"))
        .await
        .unwrap_err();
    assert!(matches!(err, CompetitionError::LimitExceeded(_)));
}

#[tokio::test]
async fn test_cancelling_frees_a_limit_slot() {
    let pool = create_test_pool().await;
    let service = service(&pool, CompetitionLimits::default(), 100);

    let first = service
        .create_competition(competition_request("guild-1", "owner-1"))
        .await
        .unwrap();
    assert!(service
        .create_competition(competition_request("guild-1", "owner-1"))
        .await
        .is_err());

    service.cancel(first.id).await.unwrap();

    service
        .create_competition(competition_request("guild-1", "owner-1"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_ended_competition_does_not_count_toward_limits() {
    let pool = create_test_pool().await;

    let mut ended = competition_request("guild-1", "owner-1");
    ended.start_date = Some(Utc::now() - Duration::days(7));
    ended.end_date = Some(an_hour_ago());
    seed_competition(&pool, &ended).await;

    let service = service(&pool, CompetitionLimits::default(), 100);
    service
        .create_competition(competition_request("guild-1", "owner-1"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_draft_counts_toward_limits() {
    let pool = create_test_pool().await;
    let service = service(&pool, CompetitionLimits::default(), 100);

    let mut draft = competition_request("guild-1", "owner-1");
    draft.start_date = None;
    draft.end_date = None;
    service.create_competition(draft).await.unwrap();

    let err = service
        .create_competition(competition_request("guild-1", "owner-1"))
        .await
        .unwrap_err();
    assert!(matches!(err, CompetitionError::LimitExceeded(_)));
}

// ============================================================================
// Rate Limiting Tests
// ============================================================================

#[tokio::test]
async fn test_creation_is_rate_limited_per_owner() {
    let pool = create_test_pool().await;
    // Generous caps so only the rate limiter can reject.
    let limits = CompetitionLimits {
        max_open_per_owner: 100,
        max_open_per_server: 100,
    };
    let service = service(&pool, limits, 1);

    service
        .create_competition(competition_request("guild-1", "owner-1"))
        .await
        .unwrap();

    let err = service
        .create_competition(competition_request("guild-1", "owner-1"))
        .await
        .unwrap_err();
    match err {
        CompetitionError::RateLimited { retry_after_secs } => assert!(retry_after_secs >= 1),
        other => panic!("expected RateLimited, got {other:?}"),
    }

    // A different owner on the same server has a fresh budget.
    service
        .create_competition(competition_request("guild-1", "owner-2"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_rate_limited_creation_mutates_nothing() {
    let pool = create_test_pool().await;
    let limits = CompetitionLimits {
        max_open_per_owner: 100,
        max_open_per_server: 100,
    };
    let rate_limiter = Arc::new(CreationRateLimiter::new(1));
    let service = CompetitionService::new(
        pool.clone(),
        ValidationService::new(pool.clone(), limits),
        rate_limiter.clone(),
    );

    service
        .create_competition(competition_request("guild-1", "owner-1"))
        .await
        .unwrap();
    assert!(service
        .create_competition(competition_request("guild-1", "owner-1"))
        .await
        .is_err());

    assert_eq!(service.list_by_server("guild-1").await.unwrap().len(), 1);

    // After a reset the same owner can create again.
    rate_limiter.clear_all();
    service
        .create_competition(competition_request("guild-1", "owner-1"))
        .await
        .unwrap();
    assert_eq!(service.list_by_server("guild-1").await.unwrap().len(), 2);
}

// ============================================================================
// Lifecycle Tests
// ============================================================================

#[tokio::test]
async fn test_cancel_is_idempotent() {
    let pool = create_test_pool().await;
    let service = service(&pool, CompetitionLimits::default(), 100);

    let created = service
        .create_competition(competition_request("guild-1", "owner-1"))
        .await
        .unwrap();

    service.cancel(created.id).await.unwrap();
    service.cancel(created.id).await.unwrap();

    let fetched = service.get(created.id).await.unwrap();
    assert_eq!(fetched.status(Utc::now()), CompetitionStatus::Cancelled);
}

#[tokio::test]
async fn test_cancel_missing_competition_is_not_found() {
    let pool = create_test_pool().await;
    let service = service(&pool, CompetitionLimits::default(), 100);

    let err = service.cancel(9999).await.unwrap_err();
    assert!(matches!(err, CompetitionError::NotFound(9999)));
}

#[tokio::test]
async fn test_set_end_date_ends_and_reopens() {
    let pool = create_test_pool().await;
    let service = service(&pool, CompetitionLimits::default(), 100);

    let created = service
        .create_competition(competition_request("guild-1", "owner-1"))
        .await
        .unwrap();
    assert!(service.is_active(created.id).await.unwrap());

    let ended = service
        .set_end_date(created.id, Some(an_hour_ago()))
        .await
        .unwrap();
    assert_eq!(ended.status(Utc::now()), CompetitionStatus::Ended);
    assert!(!service.is_active(created.id).await.unwrap());

    let reopened = service.set_end_date(created.id, None).await.unwrap();
    assert_eq!(reopened.status(Utc::now()), CompetitionStatus::Active);
}

#[tokio::test]
async fn test_list_by_server_scopes_results() {
    let pool = create_test_pool().await;
    seed_competition(&pool, &competition_request("guild-1", "owner-1")).await;
    seed_competition(&pool, &competition_request("guild-1", "owner-2")).await;
    seed_competition(&pool, &competition_request("guild-2", "owner-1")).await;

    let service = service(&pool, CompetitionLimits::default(), 100);
    let listed = service.list_by_server("guild-1").await.unwrap();
    assert_eq!(listed.len(), 2);
    assert!(listed.iter().all(|c| c.server_id == "guild-1"));
}

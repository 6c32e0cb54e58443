//! Competition lifecycle service.
//!
//! The single entry point for creating competitions: request validation,
//! owner/server limit checks, rate limiting, then the transactional insert.
//! Post-creation mutations are soft only (cancellation, end-date edits).

use std::sync::Arc;

use chrono::{DateTime, Utc};
use domain::error::CompetitionError;
use domain::models::competition::{Competition, CompetitionStatus, CreateCompetitionRequest};
use persistence::repositories::CompetitionRepository;
use sqlx::SqlitePool;
use tracing::{info, warn};
use validator::Validate;

use crate::rate_limit::CreationRateLimiter;
use crate::validation::ValidationService;

/// Service for creating and mutating competitions.
#[derive(Clone)]
pub struct CompetitionService {
    repo: CompetitionRepository,
    validation: ValidationService,
    rate_limiter: Arc<CreationRateLimiter>,
}

impl CompetitionService {
    pub fn new(
        pool: SqlitePool,
        validation: ValidationService,
        rate_limiter: Arc<CreationRateLimiter>,
    ) -> Self {
        Self {
            repo: CompetitionRepository::new(pool),
            validation,
            rate_limiter,
        }
    }

    /// Create a competition for an owner on a server.
    ///
    /// Owner limit, then server limit, then the rate limiter; the limits are
    /// re-checked inside the insert transaction so concurrent creations
    /// cannot both pass. A rate-limited call mutates nothing.
    pub async fn create_competition(
        &self,
        request: CreateCompetitionRequest,
    ) -> Result<Competition, CompetitionError> {
        request
            .validate()
            .map_err(|e| CompetitionError::Invalid(e.to_string()))?;

        self.validation
            .validate_owner_limit(&request.server_id, &request.owner_id)
            .await?;
        self.validation
            .validate_server_limit(&request.server_id)
            .await?;

        if let Err(retry_after_secs) = self.rate_limiter.check(&request.server_id, &request.owner_id)
        {
            warn!(
                server_id = %request.server_id,
                owner_id = %request.owner_id,
                retry_after_secs,
                "Competition creation rate limited"
            );
            return Err(CompetitionError::RateLimited { retry_after_secs });
        }

        let entity = self
            .repo
            .create(&request, self.validation.limits(), Utc::now())
            .await?;
        info!(
            competition_id = entity.id,
            server_id = %entity.server_id,
            owner_id = %entity.owner_id,
            title = %entity.title,
            "Created competition"
        );
        Ok(entity.into())
    }

    /// Fetch a competition by id.
    pub async fn get(&self, id: i64) -> Result<Competition, CompetitionError> {
        self.repo
            .find_by_id(id)
            .await?
            .map(Competition::from)
            .ok_or(CompetitionError::NotFound(id))
    }

    /// Whether the competition's derived status is ACTIVE right now.
    pub async fn is_active(&self, id: i64) -> Result<bool, CompetitionError> {
        let competition = self.get(id).await?;
        Ok(competition.status(Utc::now()) == CompetitionStatus::Active)
    }

    /// All competitions on a server, newest first.
    pub async fn list_by_server(
        &self,
        server_id: &str,
    ) -> Result<Vec<Competition>, CompetitionError> {
        let entities = self.repo.list_by_server(server_id).await?;
        Ok(entities.into_iter().map(Into::into).collect())
    }

    /// Soft-cancel a competition. Idempotent: cancelling an already
    /// cancelled competition is a no-op.
    pub async fn cancel(&self, id: i64) -> Result<(), CompetitionError> {
        let changed = self.repo.cancel(id, Utc::now()).await?;
        if changed == 0 && self.repo.find_by_id(id).await?.is_none() {
            return Err(CompetitionError::NotFound(id));
        }
        info!(competition_id = id, "Cancelled competition");
        Ok(())
    }

    /// Replace the end date (None reopens a competition with no end).
    pub async fn set_end_date(
        &self,
        id: i64,
        end_date: Option<DateTime<Utc>>,
    ) -> Result<Competition, CompetitionError> {
        let changed = self.repo.set_end_date(id, end_date, Utc::now()).await?;
        if changed == 0 {
            return Err(CompetitionError::NotFound(id));
        }
        self.get(id).await
    }
}

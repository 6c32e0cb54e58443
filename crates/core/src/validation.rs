//! Pre-creation limit validation.
//!
//! Pure read-side checks with no side effects. The creation write path
//! re-runs the same counts inside its insert transaction, so these exist
//! for early, friendly rejection before the rate limiter is consumed.

use chrono::Utc;
use domain::error::CompetitionError;
use persistence::repositories::{CompetitionLimits, CompetitionRepository};
use sqlx::SqlitePool;

/// Service enforcing the owner and server competition caps.
#[derive(Clone)]
pub struct ValidationService {
    repo: CompetitionRepository,
    limits: CompetitionLimits,
}

impl ValidationService {
    pub fn new(pool: SqlitePool, limits: CompetitionLimits) -> Self {
        Self {
            repo: CompetitionRepository::new(pool),
            limits,
        }
    }

    pub fn limits(&self) -> CompetitionLimits {
        self.limits
    }

    /// Fail when the owner already has their quota of open (non-cancelled,
    /// non-ended) competitions on the server.
    pub async fn validate_owner_limit(
        &self,
        server_id: &str,
        owner_id: &str,
    ) -> Result<(), CompetitionError> {
        let count = self
            .repo
            .count_open_for_owner(server_id, owner_id, Utc::now())
            .await?;
        if count >= self.limits.max_open_per_owner {
            return Err(CompetitionError::LimitExceeded(format!(
                "you already have {count} open competition(s) on this server (limit {})",
                self.limits.max_open_per_owner
            )));
        }
        Ok(())
    }

    /// Fail when the server already has its quota of open competitions,
    /// regardless of owner.
    pub async fn validate_server_limit(&self, server_id: &str) -> Result<(), CompetitionError> {
        let count = self
            .repo
            .count_open_for_server(server_id, Utc::now())
            .await?;
        if count >= self.limits.max_open_per_server {
            return Err(CompetitionError::LimitExceeded(format!(
                "this server already has {count} open competitions (limit {})",
                self.limits.max_open_per_server
            )));
        }
        Ok(())
    }
}

//! Verification record cleanup for periodic maintenance of the store
//!
//! Records are replaced on every issuance, so the table holds at most one
//! row per email. This task removes rows for emails that never verified
//! once their code has been expired for longer than the grace period.

use chrono::{Duration, Utc};
use std::sync::Arc;
use tracing::{error, info, warn};

use fit_shared::CleanupConfig;

use crate::errors::DomainError;
use crate::repositories::VerificationRepository;

/// Configuration for the verification cleanup service
#[derive(Debug, Clone)]
pub struct VerificationCleanupConfig {
    /// How often to run cleanup (in seconds)
    pub interval_seconds: u64,
    /// Grace period after expiry before deletion (in minutes)
    pub grace_period_minutes: i64,
    /// Whether to enable automatic cleanup
    pub enabled: bool,
}

impl Default for VerificationCleanupConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 3600,
            grace_period_minutes: 60,
            enabled: true,
        }
    }
}

impl From<&CleanupConfig> for VerificationCleanupConfig {
    fn from(config: &CleanupConfig) -> Self {
        Self {
            interval_seconds: config.interval_seconds,
            grace_period_minutes: config.grace_minutes,
            enabled: config.enabled,
        }
    }
}

/// Service for deleting expired, unverified verification records
pub struct VerificationCleanupService<R: VerificationRepository + 'static> {
    repository: Arc<R>,
    config: VerificationCleanupConfig,
}

impl<R: VerificationRepository> VerificationCleanupService<R> {
    /// Create a new cleanup service
    pub fn new(repository: Arc<R>, config: VerificationCleanupConfig) -> Self {
        Self { repository, config }
    }

    /// Run a single cleanup cycle
    ///
    /// # Returns
    /// * `Ok(CleanupResult)` - Summary of cleanup operations
    /// * `Err(DomainError)` - If cleanup fails
    pub async fn run_cleanup(&self) -> Result<CleanupResult, DomainError> {
        if !self.config.enabled {
            return Ok(CleanupResult::default());
        }

        let cutoff = Utc::now() - Duration::minutes(self.config.grace_period_minutes);
        let mut result = CleanupResult::default();

        match self.repository.delete_expired(cutoff).await {
            Ok(count) => {
                result.expired_records_deleted = count;
            }
            Err(e) => {
                error!(error = %e, event = "cleanup_failed", "Failed to delete expired verification records");
                result.errors.push(format!("Verification cleanup error: {}", e));
            }
        }

        info!(
            deleted = result.expired_records_deleted,
            cutoff = %cutoff,
            event = "cleanup_completed",
            "Verification cleanup completed"
        );

        Ok(result)
    }

    /// Start the cleanup service as a background task
    ///
    /// This spawns a tokio task that runs cleanup at regular intervals
    pub fn start_background_task(self: Arc<Self>) {
        if !self.config.enabled {
            warn!("Verification cleanup service is disabled");
            return;
        }

        let interval = std::time::Duration::from_secs(self.config.interval_seconds.max(1));

        tokio::spawn(async move {
            info!(
                "Verification cleanup service started - will run every {} seconds",
                self.config.interval_seconds
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;

                match self.run_cleanup().await {
                    Ok(result) => {
                        if !result.is_success() {
                            warn!("Cleanup completed with errors: {:?}", result.errors);
                        }
                    }
                    Err(e) => {
                        error!("Verification cleanup cycle failed: {}", e);
                    }
                }
            }
        });
    }
}

/// Result of a cleanup operation
#[derive(Debug, Default)]
pub struct CleanupResult {
    /// Number of expired verification records deleted
    pub expired_records_deleted: u64,
    /// Any errors encountered during cleanup
    pub errors: Vec<String>,
}

impl CleanupResult {
    /// Check if the cleanup was successful (no errors)
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

//! Verification repository trait defining the interface for code persistence.
//!
//! The store holds at most one record per email. Writing a record for an
//! email that already has one replaces it, so the newest issuance is always
//! the only candidate for verification.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::VerificationRecord;
use crate::errors::DomainError;

/// Repository trait for verification record persistence
#[async_trait]
pub trait VerificationRepository: Send + Sync {
    /// Insert the record, replacing any existing record for the same email
    ///
    /// # Returns
    /// * `Ok(VerificationRecord)` - The stored record
    /// * `Err(DomainError)` - Database or other error occurred
    async fn upsert(&self, record: VerificationRecord) -> Result<VerificationRecord, DomainError>;

    /// Find the most recent record for an email, verified or not
    async fn find_latest_by_email(
        &self,
        email: &str,
    ) -> Result<Option<VerificationRecord>, DomainError>;

    /// Find the most recent unverified record for an email
    ///
    /// Expired records are returned as well; callers decide on expiry.
    async fn find_latest_unverified(
        &self,
        email: &str,
    ) -> Result<Option<VerificationRecord>, DomainError>;

    /// Flip a record to verified
    ///
    /// # Returns
    /// * `Ok(true)` - The record existed and was unverified
    /// * `Ok(false)` - No unverified record with that id
    async fn mark_verified(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Delete unverified records that expired before `cutoff`
    ///
    /// # Returns
    /// Number of deleted records
    async fn delete_expired(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError>;
}

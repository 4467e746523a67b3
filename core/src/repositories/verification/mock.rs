//! Mock implementation of VerificationRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::VerificationRecord;
use crate::errors::DomainError;

use super::trait_::VerificationRepository;

/// In-memory verification store keyed by email
#[derive(Clone)]
pub struct MockVerificationRepository {
    records: Arc<RwLock<HashMap<String, VerificationRecord>>>,
    fail_writes: Arc<AtomicBool>,
}

impl MockVerificationRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            fail_writes: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Make every subsequent write fail with an upstream error
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Store a record directly, bypassing the failure switch
    pub async fn seed(&self, record: VerificationRecord) {
        self.records
            .write()
            .await
            .insert(record.email.clone(), record);
    }

    pub async fn get(&self, email: &str) -> Option<VerificationRecord> {
        self.records.read().await.get(email).cloned()
    }

    pub async fn count(&self) -> usize {
        self.records.read().await.len()
    }

    fn check_writable(&self) -> Result<(), DomainError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::upstream("verification store unavailable"));
        }
        Ok(())
    }
}

impl Default for MockVerificationRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VerificationRepository for MockVerificationRepository {
    async fn upsert(&self, record: VerificationRecord) -> Result<VerificationRecord, DomainError> {
        self.check_writable()?;
        let mut records = self.records.write().await;
        records.insert(record.email.clone(), record.clone());
        Ok(record)
    }

    async fn find_latest_by_email(
        &self,
        email: &str,
    ) -> Result<Option<VerificationRecord>, DomainError> {
        Ok(self.records.read().await.get(email).cloned())
    }

    async fn find_latest_unverified(
        &self,
        email: &str,
    ) -> Result<Option<VerificationRecord>, DomainError> {
        let records = self.records.read().await;
        Ok(records.get(email).filter(|r| !r.verified).cloned())
    }

    async fn mark_verified(&self, id: Uuid) -> Result<bool, DomainError> {
        self.check_writable()?;
        let mut records = self.records.write().await;
        match records.values_mut().find(|r| r.id == id && !r.verified) {
            Some(record) => {
                record.mark_verified();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_expired(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError> {
        self.check_writable()?;
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, r| r.verified || r.expires_at >= cutoff);
        Ok((before - records.len()) as u64)
    }
}

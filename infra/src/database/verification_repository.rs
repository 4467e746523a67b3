//! PostgreSQL verification store
//!
//! Rows live in `user_verifications`, unique on `email`. Writing a record
//! for an email that already has one replaces every column, so a new
//! issuance always gets a new id, code and expiry.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{debug, error, info};
use uuid::Uuid;

use fit_core::domain::entities::VerificationRecord;
use fit_core::errors::{DomainError, DomainResult};
use fit_core::repositories::VerificationRepository;
use fit_shared::validation::mask_email;

/// Row shape of `user_verifications`
#[derive(Debug, FromRow)]
struct VerificationRow {
    id: Uuid,
    user_id: Uuid,
    email: String,
    otp_code: String,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    verified: bool,
}

impl From<VerificationRow> for VerificationRecord {
    fn from(row: VerificationRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            email: row.email,
            otp_code: row.otp_code,
            created_at: row.created_at,
            expires_at: row.expires_at,
            verified: row.verified,
        }
    }
}

/// Verification repository backed by PostgreSQL
pub struct PostgresVerificationRepository {
    /// Database connection pool
    pool: PgPool,
}

impl PostgresVerificationRepository {
    /// Create a new repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn storage_error(operation: &str, e: sqlx::Error) -> DomainError {
        error!(operation = operation, error = %e, "Verification store query failed");
        DomainError::upstream(format!("verification store {} failed: {}", operation, e))
    }
}

#[async_trait]
impl VerificationRepository for PostgresVerificationRepository {
    async fn upsert(&self, record: VerificationRecord) -> DomainResult<VerificationRecord> {
        let query = r#"
            INSERT INTO user_verifications (
                id, user_id, email, otp_code, created_at, expires_at, verified
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (email) DO UPDATE SET
                id = EXCLUDED.id,
                user_id = EXCLUDED.user_id,
                otp_code = EXCLUDED.otp_code,
                created_at = EXCLUDED.created_at,
                expires_at = EXCLUDED.expires_at,
                verified = EXCLUDED.verified
            RETURNING id, user_id, email, otp_code, created_at, expires_at, verified
        "#;

        let row: VerificationRow = sqlx::query_as(query)
            .bind(record.id)
            .bind(record.user_id)
            .bind(&record.email)
            .bind(&record.otp_code)
            .bind(record.created_at)
            .bind(record.expires_at)
            .bind(record.verified)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| Self::storage_error("upsert", e))?;

        info!(
            email = %mask_email(&row.email),
            record_id = %row.id,
            "Stored verification record"
        );

        Ok(row.into())
    }

    async fn find_latest_by_email(&self, email: &str) -> DomainResult<Option<VerificationRecord>> {
        let query = r#"
            SELECT id, user_id, email, otp_code, created_at, expires_at, verified
            FROM user_verifications
            WHERE email = $1
            ORDER BY created_at DESC
            LIMIT 1
        "#;

        let row: Option<VerificationRow> = sqlx::query_as(query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Self::storage_error("find_latest_by_email", e))?;

        Ok(row.map(Into::into))
    }

    async fn find_latest_unverified(
        &self,
        email: &str,
    ) -> DomainResult<Option<VerificationRecord>> {
        let query = r#"
            SELECT id, user_id, email, otp_code, created_at, expires_at, verified
            FROM user_verifications
            WHERE email = $1 AND verified = FALSE
            ORDER BY created_at DESC
            LIMIT 1
        "#;

        let row: Option<VerificationRow> = sqlx::query_as(query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Self::storage_error("find_latest_unverified", e))?;

        debug!(
            email = %mask_email(email),
            found = row.is_some(),
            "Looked up unverified verification record"
        );

        Ok(row.map(Into::into))
    }

    async fn mark_verified(&self, id: Uuid) -> DomainResult<bool> {
        let result = sqlx::query(
            "UPDATE user_verifications SET verified = TRUE WHERE id = $1 AND verified = FALSE",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| Self::storage_error("mark_verified", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_expired(&self, cutoff: DateTime<Utc>) -> DomainResult<u64> {
        let result = sqlx::query(
            "DELETE FROM user_verifications WHERE verified = FALSE AND expires_at < $1",
        )
        .bind(cutoff)
        .execute(&self.pool)
        .await
        .map_err(|e| Self::storage_error("delete_expired", e))?;

        Ok(result.rows_affected())
    }
}

//! Verification record entity for email-based account confirmation.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of the verification code
pub const CODE_LENGTH: usize = 4;

/// Default expiration time for verification codes (10 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 10;

const MILLIS_PER_MINUTE: i64 = 60_000;

/// Generates a random 4-digit code in `1000..=9999`
///
/// Codes are not checked for collisions with other outstanding records.
pub fn generate_code() -> String {
    let mut rng = rand::thread_rng();
    let code: u32 = rng.gen_range(1000..=9999);
    code.to_string()
}

/// A one-time code issued to confirm the email of an identity-service account
///
/// There is at most one record per email. Issuing a new code produces a
/// fresh record that replaces the previous one in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRecord {
    /// Unique identifier for this issuance
    pub id: Uuid,

    /// Identity-service account the code confirms
    pub user_id: Uuid,

    /// Normalised email the code was sent to
    pub email: String,

    /// The numeric code
    pub otp_code: String,

    /// Timestamp when the code was issued
    pub created_at: DateTime<Utc>,

    /// Timestamp when the code stops being accepted
    pub expires_at: DateTime<Utc>,

    /// Whether the code has been successfully verified
    pub verified: bool,
}

impl VerificationRecord {
    /// Creates a new record with a random code and the default expiration
    pub fn new(user_id: Uuid, email: String) -> Self {
        Self::issued_at(user_id, email, Utc::now(), DEFAULT_EXPIRATION_MINUTES)
    }

    /// Creates a new record issued at `now` that expires after `expiration_minutes`
    ///
    /// # Arguments
    ///
    /// * `user_id` - Identity-service account id
    /// * `email` - Email the code will be sent to
    /// * `now` - Issue timestamp
    /// * `expiration_minutes` - Number of minutes until the code expires
    pub fn issued_at(
        user_id: Uuid,
        email: String,
        now: DateTime<Utc>,
        expiration_minutes: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            email,
            otp_code: generate_code(),
            created_at: now,
            expires_at: now + Duration::minutes(expiration_minutes),
            verified: false,
        }
    }

    /// A code is no longer accepted at or after `expires_at`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Unverified and not yet expired
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        !self.verified && !self.is_expired_at(now)
    }

    /// Whole minutes until expiry, rounded up; 0 once expired
    pub fn minutes_left_at(&self, now: DateTime<Utc>) -> i64 {
        let remaining_ms = (self.expires_at - now).num_milliseconds();
        if remaining_ms <= 0 {
            return 0;
        }
        (remaining_ms + MILLIS_PER_MINUTE - 1) / MILLIS_PER_MINUTE
    }

    /// Compares the submitted code against the stored one
    pub fn matches(&self, code: &str) -> bool {
        constant_time_eq(self.otp_code.as_bytes(), code.as_bytes())
    }

    /// Marks the record verified. Never reverts.
    pub fn mark_verified(&mut self) {
        self.verified = true;
    }
}

//! Mirror of an account held by the external identity service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity-service account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityUser {
    pub id: Uuid,

    pub email: String,

    /// Set once the account's email has been confirmed
    pub email_confirmed_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
}

impl IdentityUser {
    /// Creates an unconfirmed account record
    pub fn new(email: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            email_confirmed_at: None,
            created_at: Utc::now(),
        }
    }

    pub fn is_confirmed(&self) -> bool {
        self.email_confirmed_at.is_some()
    }

    pub fn confirm(&mut self) {
        if self.email_confirmed_at.is_none() {
            self.email_confirmed_at = Some(Utc::now());
        }
    }
}

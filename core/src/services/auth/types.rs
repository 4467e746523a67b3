//! Types for authentication service results

use serde::Serialize;
use uuid::Uuid;

/// Account created by a registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisteredUser {
    pub user_id: Uuid,
    pub email: String,
}

/// Account confirmed by a verified code
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifiedUser {
    pub user_id: Uuid,
    pub email: String,
}

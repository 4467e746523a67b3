use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// Fields default to empty so a missing field reaches the service and is
// reported as a required-field error rather than a JSON parse failure.

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(length(max = 254, message = "email is too long"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(max = 128, message = "password is too long"))]
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ResendRequest {
    #[serde(default)]
    #[validate(length(max = 254, message = "email is too long"))]
    pub email: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct VerifyRequest {
    #[serde(default)]
    #[validate(length(max = 254, message = "email is too long"))]
    pub email: String,

    /// 4-digit verification code
    #[serde(default)]
    #[validate(length(max = 16, message = "code is too long"))]
    pub code: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(max = 254, message = "email is too long"))]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub success: bool,
    pub message: String,
    pub user_id: Uuid,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResendResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub success: bool,
    pub message: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub email: String,
}

//! GoTrue-compatible identity service client

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use fit_core::domain::entities::IdentityUser;
use fit_core::errors::IdentityServiceError;
use fit_core::services::IdentityServiceTrait;
use fit_shared::validation::mask_email;
use fit_shared::IdentityConfig;

use crate::InfrastructureError;

const ADMIN_USERS_PATH: &str = "/auth/v1/admin/users";
const OTP_PATH: &str = "/auth/v1/otp";
const TOKEN_PATH: &str = "/auth/v1/token";
const VERIFY_PATH: &str = "/auth/v1/verify";

/// Page size when scanning the admin user listing
const USERS_PER_PAGE: u32 = 200;
/// Upper bound on listing pages scanned for one lookup
const MAX_USER_PAGES: u32 = 50;

/// Account as returned by the admin API
#[derive(Debug, Deserialize)]
pub(crate) struct RemoteUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub email_confirmed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<RemoteUser> for IdentityUser {
    fn from(user: RemoteUser) -> Self {
        Self {
            id: user.id,
            email: user.email.unwrap_or_default(),
            email_confirmed_at: user.email_confirmed_at,
            created_at: user.created_at.unwrap_or_else(Utc::now),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserPage {
    #[serde(default)]
    pub users: Vec<RemoteUser>,
}

/// Error body shapes used by the identity service across versions
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RemoteError {
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl RemoteError {
    pub fn message(&self) -> String {
        self.msg
            .clone()
            .or_else(|| self.message.clone())
            .or_else(|| self.error_description.clone())
            .or_else(|| self.error.clone())
            .unwrap_or_else(|| "unknown error".to_string())
    }
}

#[derive(Debug, Serialize)]
struct CreateUserBody<'a> {
    email: &'a str,
    password: &'a str,
    email_confirm: bool,
    user_metadata: serde_json::Value,
}

/// Map a non-success response to an identity error
pub(crate) fn classify_error(status: StatusCode, body: &str) -> IdentityServiceError {
    let remote: RemoteError = serde_json::from_str(body).unwrap_or_default();
    let message = remote.message();
    let duplicate = remote.error_code.as_deref() == Some("email_exists")
        || remote.error_code.as_deref() == Some("user_already_exists")
        || message.to_lowercase().contains("already been registered")
        || message.to_lowercase().contains("already registered");

    match status {
        _ if duplicate => IdentityServiceError::AlreadyExists,
        StatusCode::NOT_FOUND => IdentityServiceError::NotFound,
        s if s.is_server_error() => IdentityServiceError::Unavailable(format!("{}: {}", s, message)),
        s => IdentityServiceError::Rejected(format!("{}: {}", s, message)),
    }
}

/// Identity service client over the GoTrue REST API
pub struct HttpIdentityService {
    client: Client,
    base_url: Option<String>,
    anon_key: Option<String>,
    service_role_key: Option<String>,
}

impl HttpIdentityService {
    /// Create a client; missing credentials are reported per call
    pub fn new(config: &IdentityConfig) -> Result<Self, InfrastructureError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        if !config.has_admin_access() {
            warn!("Identity service admin credentials missing; registration endpoints will return 503");
        }
        if !config.has_public_access() {
            warn!("Identity service public credentials missing; login endpoints will return 503");
        }

        Ok(Self {
            client,
            base_url: config.base_url().map(str::to_string),
            anon_key: config.anon_key.clone(),
            service_role_key: config.service_role_key.clone(),
        })
    }

    fn url(&self, path: &str) -> Result<String, IdentityServiceError> {
        self.base_url
            .as_deref()
            .map(|base| format!("{}{}", base, path))
            .ok_or(IdentityServiceError::NotConfigured)
    }

    fn authorize(builder: RequestBuilder, key: &str) -> RequestBuilder {
        builder
            .header("apikey", key)
            .header("Authorization", format!("Bearer {}", key))
    }

    fn admin(
        &self,
        builder: impl FnOnce(&Client, String) -> RequestBuilder,
        path: &str,
    ) -> Result<RequestBuilder, IdentityServiceError> {
        let key = self
            .service_role_key
            .as_deref()
            .ok_or(IdentityServiceError::NotConfigured)?;
        let url = self.url(path)?;
        Ok(Self::authorize(builder(&self.client, url), key))
    }

    fn public(
        &self,
        builder: impl FnOnce(&Client, String) -> RequestBuilder,
        path: &str,
    ) -> Result<RequestBuilder, IdentityServiceError> {
        let key = self
            .anon_key
            .as_deref()
            .ok_or(IdentityServiceError::NotConfigured)?;
        let url = self.url(path)?;
        Ok(Self::authorize(builder(&self.client, url), key))
    }

    /// Send a request and turn non-2xx statuses into identity errors
    async fn send(request: RequestBuilder, operation: &str) -> Result<Response, IdentityServiceError> {
        let response = request.send().await.map_err(|e| {
            error!(operation = operation, error = %e, "Identity service request failed");
            IdentityServiceError::Unavailable(e.to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            debug!(operation = operation, status = %status, "Identity service request succeeded");
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = classify_error(status, &body);
        warn!(operation = operation, status = %status, error = %err, "Identity service returned an error");
        Err(err)
    }

    async fn parse<T: for<'de> Deserialize<'de>>(response: Response) -> Result<T, IdentityServiceError> {
        response
            .json::<T>()
            .await
            .map_err(|e| IdentityServiceError::Unavailable(format!("invalid response body: {}", e)))
    }
}

#[async_trait]
impl IdentityServiceTrait for HttpIdentityService {
    fn has_admin_access(&self) -> bool {
        self.base_url.is_some() && self.service_role_key.is_some()
    }

    fn has_public_access(&self) -> bool {
        self.base_url.is_some() && self.anon_key.is_some()
    }

    async fn create_user(
        &self,
        email: &str,
        password: &str,
    ) -> Result<IdentityUser, IdentityServiceError> {
        let body = CreateUserBody {
            email,
            password,
            email_confirm: false,
            user_metadata: json!({ "email": email }),
        };
        let request = self.admin(|c, url| c.post(url), ADMIN_USERS_PATH)?.json(&body);
        let response = Self::send(request, "create_user").await?;
        let user: RemoteUser = Self::parse(response).await?;

        info!(email = %mask_email(email), user_id = %user.id, "Identity account created");
        Ok(user.into())
    }

    async fn find_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<IdentityUser>, IdentityServiceError> {
        for page in 1..=MAX_USER_PAGES {
            let request = self
                .admin(|c, url| c.get(url), ADMIN_USERS_PATH)?
                .query(&[("page", page), ("per_page", USERS_PER_PAGE)]);
            let response = Self::send(request, "list_users").await?;
            let listing: UserPage = Self::parse(response).await?;
            let count = listing.users.len();

            if let Some(user) = listing.users.into_iter().find(|u| {
                u.email
                    .as_deref()
                    .is_some_and(|candidate| candidate.eq_ignore_ascii_case(email))
            }) {
                return Ok(Some(user.into()));
            }

            if count < USERS_PER_PAGE as usize {
                return Ok(None);
            }
        }

        warn!(
            email = %mask_email(email),
            pages = MAX_USER_PAGES,
            "Stopped scanning identity users before reaching the last page"
        );
        Ok(None)
    }

    async fn delete_user(&self, id: Uuid) -> Result<(), IdentityServiceError> {
        let path = format!("{}/{}", ADMIN_USERS_PATH, id);
        let request = self.admin(|c, url| c.delete(url), &path)?;
        Self::send(request, "delete_user").await?;
        info!(user_id = %id, "Identity account deleted");
        Ok(())
    }

    async fn confirm_email(&self, id: Uuid) -> Result<(), IdentityServiceError> {
        let path = format!("{}/{}", ADMIN_USERS_PATH, id);
        let request = self
            .admin(|c, url| c.put(url), &path)?
            .json(&json!({ "email_confirm": true }));
        Self::send(request, "confirm_email").await?;
        Ok(())
    }

    async fn send_login_code(&self, email: &str) -> Result<(), IdentityServiceError> {
        let request = self
            .public(|c, url| c.post(url), OTP_PATH)?
            .json(&json!({ "email": email, "create_user": true }));
        Self::send(request, "send_login_code").await?;
        Ok(())
    }

    async fn exchange_code_for_session(
        &self,
        code: &str,
        code_verifier: Option<&str>,
    ) -> Result<(), IdentityServiceError> {
        let request = self
            .public(|c, url| c.post(url), TOKEN_PATH)?
            .query(&[("grant_type", "pkce")])
            .json(&json!({ "auth_code": code, "code_verifier": code_verifier }));
        Self::send(request, "exchange_code").await?;
        Ok(())
    }

    async fn verify_token_hash(
        &self,
        token_hash: &str,
        kind: &str,
    ) -> Result<(), IdentityServiceError> {
        let request = self
            .public(|c, url| c.post(url), VERIFY_PATH)?
            .json(&json!({ "type": kind, "token_hash": token_hash }));
        Self::send(request, "verify_token_hash").await?;
        Ok(())
    }
}

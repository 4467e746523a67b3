//! In-memory identity service for testing

use async_trait::async_trait;
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

use crate::domain::entities::IdentityUser;
use crate::errors::IdentityServiceError;

use super::traits::IdentityServiceTrait;

#[derive(Default)]
struct MockState {
    users: HashMap<String, IdentityUser>,
    login_codes_sent: Vec<String>,
    auth_codes: HashSet<String>,
    token_hashes: HashSet<String>,
}

/// Mock identity service
///
/// Every async call is counted so tests can assert that validation
/// failures never reach the identity service.
#[derive(Clone)]
pub struct MockIdentityService {
    state: Arc<Mutex<MockState>>,
    admin_access: bool,
    public_access: bool,
    unavailable: Arc<AtomicBool>,
    calls: Arc<AtomicUsize>,
}

impl MockIdentityService {
    /// Fully configured mock
    pub fn new() -> Self {
        Self::with_access(true, true)
    }

    /// Mock with selected credentials missing
    pub fn with_access(admin_access: bool, public_access: bool) -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState::default())),
            admin_access,
            public_access,
            unavailable: Arc::new(AtomicBool::new(false)),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Make every subsequent call fail as if the service were down
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of remote calls made so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Add an existing account
    pub fn insert_user(&self, email: &str, confirmed: bool) -> IdentityUser {
        let mut user = IdentityUser::new(email.to_string());
        if confirmed {
            user.email_confirmed_at = Some(Utc::now());
        }
        self.lock().users.insert(email.to_string(), user.clone());
        user
    }

    pub fn user(&self, email: &str) -> Option<IdentityUser> {
        self.lock().users.get(email).cloned()
    }

    pub fn user_count(&self) -> usize {
        self.lock().users.len()
    }

    pub fn login_codes_sent(&self) -> Vec<String> {
        self.lock().login_codes_sent.clone()
    }

    /// Register an authorization code the exchange will accept
    pub fn accept_auth_code(&self, code: &str) {
        self.lock().auth_codes.insert(code.to_string());
    }

    /// Register a token hash the verify call will accept
    pub fn accept_token_hash(&self, token_hash: &str) {
        self.lock().token_hashes.insert(token_hash.to_string());
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn begin_call(&self) -> Result<(), IdentityServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(IdentityServiceError::Unavailable(
                "mock identity service down".to_string(),
            ));
        }
        Ok(())
    }

    fn require_admin(&self) -> Result<(), IdentityServiceError> {
        if self.admin_access {
            Ok(())
        } else {
            Err(IdentityServiceError::NotConfigured)
        }
    }

    fn require_public(&self) -> Result<(), IdentityServiceError> {
        if self.public_access {
            Ok(())
        } else {
            Err(IdentityServiceError::NotConfigured)
        }
    }
}

impl Default for MockIdentityService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityServiceTrait for MockIdentityService {
    fn has_admin_access(&self) -> bool {
        self.admin_access
    }

    fn has_public_access(&self) -> bool {
        self.public_access
    }

    async fn create_user(
        &self,
        email: &str,
        _password: &str,
    ) -> Result<IdentityUser, IdentityServiceError> {
        self.require_admin()?;
        self.begin_call()?;
        let mut state = self.lock();
        if state.users.contains_key(email) {
            return Err(IdentityServiceError::AlreadyExists);
        }
        let user = IdentityUser::new(email.to_string());
        state.users.insert(email.to_string(), user.clone());
        Ok(user)
    }

    async fn find_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<IdentityUser>, IdentityServiceError> {
        self.require_admin()?;
        self.begin_call()?;
        Ok(self.lock().users.get(email).cloned())
    }

    async fn delete_user(&self, id: Uuid) -> Result<(), IdentityServiceError> {
        self.require_admin()?;
        self.begin_call()?;
        let mut state = self.lock();
        let before = state.users.len();
        state.users.retain(|_, user| user.id != id);
        if state.users.len() == before {
            return Err(IdentityServiceError::NotFound);
        }
        Ok(())
    }

    async fn confirm_email(&self, id: Uuid) -> Result<(), IdentityServiceError> {
        self.require_admin()?;
        self.begin_call()?;
        let mut state = self.lock();
        match state.users.values_mut().find(|user| user.id == id) {
            Some(user) => {
                user.confirm();
                Ok(())
            }
            None => Err(IdentityServiceError::NotFound),
        }
    }

    async fn send_login_code(&self, email: &str) -> Result<(), IdentityServiceError> {
        self.require_public()?;
        self.begin_call()?;
        let mut state = self.lock();
        state
            .users
            .entry(email.to_string())
            .or_insert_with(|| IdentityUser::new(email.to_string()));
        state.login_codes_sent.push(email.to_string());
        Ok(())
    }

    async fn exchange_code_for_session(
        &self,
        code: &str,
        _code_verifier: Option<&str>,
    ) -> Result<(), IdentityServiceError> {
        self.require_public()?;
        self.begin_call()?;
        if self.lock().auth_codes.remove(code) {
            Ok(())
        } else {
            Err(IdentityServiceError::Rejected("invalid auth code".to_string()))
        }
    }

    async fn verify_token_hash(
        &self,
        token_hash: &str,
        _kind: &str,
    ) -> Result<(), IdentityServiceError> {
        self.require_public()?;
        self.begin_call()?;
        if self.lock().token_hashes.remove(token_hash) {
            Ok(())
        } else {
            Err(IdentityServiceError::Rejected("invalid token hash".to_string()))
        }
    }
}

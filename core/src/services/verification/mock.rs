//! Mock email service for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use super::traits::EmailServiceTrait;

/// Records every code it is asked to send
#[derive(Clone, Default)]
pub struct MockEmailService {
    sent: Arc<Mutex<HashMap<String, Vec<String>>>>,
    should_fail: Arc<AtomicBool>,
}

impl MockEmailService {
    pub fn new(should_fail: bool) -> Self {
        Self {
            sent: Arc::new(Mutex::new(HashMap::new())),
            should_fail: Arc::new(AtomicBool::new(should_fail)),
        }
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    /// Last code sent to an email
    pub fn last_code(&self, email: &str) -> Option<String> {
        self.sent
            .lock()
            .ok()
            .and_then(|sent| sent.get(email).and_then(|codes| codes.last().cloned()))
    }

    /// Number of emails sent to an address
    pub fn sent_count(&self, email: &str) -> usize {
        self.sent
            .lock()
            .map(|sent| sent.get(email).map_or(0, Vec::len))
            .unwrap_or(0)
    }
}

#[async_trait]
impl EmailServiceTrait for MockEmailService {
    async fn send_verification_code(&self, email: &str, code: &str) -> Result<String, String> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err("Email service error".to_string());
        }
        self.sent
            .lock()
            .map_err(|e| e.to_string())?
            .entry(email.to_string())
            .or_default()
            .push(code.to_string());
        Ok(format!("mock-msg-{}", uuid::Uuid::new_v4()))
    }

    fn is_enabled(&self) -> bool {
        true
    }
}

//! Email-confirmation callback parameters and redirect targets.

use serde::{Deserialize, Serialize};

pub const LOGIN_PATH: &str = "/login";

/// Query parameters of the confirmation callback, plus the PKCE verifier
/// read from the request cookie
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub token_hash: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub next: Option<String>,
    #[serde(skip)]
    pub code_verifier: Option<String>,
}

impl CallbackParams {
    pub fn code(&self) -> Option<&str> {
        non_empty(&self.code)
    }

    pub fn token_hash(&self) -> Option<&str> {
        non_empty(&self.token_hash)
    }

    pub fn kind(&self) -> Option<&str> {
        non_empty(&self.kind)
    }

    pub fn code_verifier(&self) -> Option<&str> {
        non_empty(&self.code_verifier)
    }

    /// `signup` and `email` callbacks land on the login page with a
    /// confirmation banner
    pub fn is_email_confirmation(&self) -> bool {
        matches!(self.kind(), Some("signup") | Some("email"))
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Where the callback sends the browser
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackRedirect {
    Confirmed,
    ConfirmationFailed,
    /// Sanitised `next` path
    Next(String),
    Login,
}

impl CallbackRedirect {
    pub fn location(&self) -> String {
        match self {
            CallbackRedirect::Confirmed => format!("{}?confirmed=true", LOGIN_PATH),
            CallbackRedirect::ConfirmationFailed => {
                format!("{}?error=confirmation_failed", LOGIN_PATH)
            }
            CallbackRedirect::Next(path) => path.clone(),
            CallbackRedirect::Login => LOGIN_PATH.to_string(),
        }
    }
}

/// Only same-origin relative paths are followed; anything else becomes `/`
pub fn sanitize_next(next: Option<&str>) -> String {
    match next.map(str::trim) {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && is_plain_path(path) => {
            path.to_string()
        }
        _ => "/".to_string(),
    }
}

// Browsers drop tabs and newlines from URLs, so `/\t/host` would become `//host`
fn is_plain_path(path: &str) -> bool {
    !path
        .chars()
        .any(|c| c == '\\' || c.is_control() || c.is_whitespace())
}

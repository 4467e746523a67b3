//! Input validation shared by the HTTP layer and the core services

use once_cell::sync::Lazy;
use regex::Regex;

/// Minimum accepted password length, in UTF-16 code units
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Something, an `@`, something, a dot, something; no whitespace anywhere
pub static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Basic email shape check
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Password length check, counted in UTF-16 code units like the web client
///
/// Characters outside the Basic Multilingual Plane count as two.
pub fn is_valid_password(password: &str) -> bool {
    password.encode_utf16().count() >= MIN_PASSWORD_LENGTH
}

/// Exactly `length` ASCII digits
pub fn is_numeric_code(code: &str, length: usize) -> bool {
    code.len() == length && code.chars().all(|c| c.is_ascii_digit())
}

/// Canonical form used for lookups and storage
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Mask an email for logging: `jane@example.com` -> `j***@example.com`
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let first = local.chars().next().map(String::from).unwrap_or_default();
            format!("{}***@{}", first, domain)
        }
        None => "***".to_string(),
    }
}

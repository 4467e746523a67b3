//! Localised message catalog
//!
//! Messages are loaded from `i18n/error_messages.toml` when that file exists
//! next to the working directory, otherwise from the copy embedded at build
//! time.

use fit_shared::Language;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub en: String,
    pub pt: String,
    pub code: String,
    pub http_status: u16,
}

/// Text of a success message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalizedText {
    pub en: String,
    pub pt: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorMessages {
    #[serde(default)]
    pub auth: HashMap<String, ErrorMessage>,
    #[serde(default)]
    pub validation: HashMap<String, ErrorMessage>,
    #[serde(default)]
    pub general: HashMap<String, ErrorMessage>,
    #[serde(default)]
    pub messages: HashMap<String, LocalizedText>,
}

pub static ERROR_MESSAGES: Lazy<ErrorMessages> = Lazy::new(|| match load_error_messages() {
    Ok(messages) => messages,
    Err(e) => {
        log::error!("Failed to load error messages, falling back to built-in text: {}", e);
        ErrorMessages::default()
    }
});

const DEFAULT_CATALOG: &str = include_str!("../../i18n/error_messages.toml");

fn load_error_messages() -> Result<ErrorMessages, Box<dyn std::error::Error>> {
    let config_path = Path::new("i18n/error_messages.toml");

    if config_path.exists() {
        let content = fs::read_to_string(config_path)?;
        Ok(toml::from_str(&content)?)
    } else {
        load_default_messages()
    }
}

fn load_default_messages() -> Result<ErrorMessages, Box<dyn std::error::Error>> {
    Ok(toml::from_str(DEFAULT_CATALOG)?)
}

fn pick<'a>(lang: Language, en: &'a str, pt: &'a str) -> &'a str {
    match lang {
        Language::English => en,
        Language::Portuguese => pt,
    }
}

/// Look up an error entry; returns `(code, text, http_status)`
pub fn get_error_message(category: &str, key: &str, lang: Language) -> Option<(String, String, u16)> {
    let messages = &*ERROR_MESSAGES;

    let category_map = match category {
        "auth" => &messages.auth,
        "validation" => &messages.validation,
        "general" => &messages.general,
        _ => return None,
    };

    category_map.get(key).map(|msg| {
        (
            msg.code.clone(),
            pick(lang, &msg.en, &msg.pt).to_string(),
            msg.http_status,
        )
    })
}

/// Look up a success message, falling back to the key itself
pub fn get_message(key: &str, lang: Language) -> String {
    ERROR_MESSAGES
        .messages
        .get(key)
        .map(|text| pick(lang, &text.en, &text.pt).to_string())
        .unwrap_or_else(|| key.to_string())
}

pub fn format_message(template: &str, params: &HashMap<&str, String>) -> String {
    let mut result = template.to_string();
    for (key, value) in params {
        let placeholder = format!("{{{}}}", key);
        result = result.replace(&placeholder, value);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_catalog_parses() {
        let messages = load_default_messages().unwrap();
        assert!(messages.auth.contains_key("active_code_exists"));
        assert!(messages.validation.contains_key("invalid_email"));
        assert!(messages.general.contains_key("service_unavailable"));
        assert!(messages.messages.contains_key("registered"));
    }

    #[test]
    fn test_every_entry_is_translated() {
        let messages = load_default_messages().unwrap();
        for category in [&messages.auth, &messages.validation, &messages.general] {
            for (key, msg) in category {
                assert!(!msg.en.is_empty(), "{} missing English text", key);
                assert!(!msg.pt.is_empty(), "{} missing Portuguese text", key);
                assert!(!msg.code.is_empty(), "{} missing code", key);
            }
        }
    }

    #[test]
    fn test_lookup_by_language() {
        let (code, en, status) =
            get_error_message("auth", "user_not_found", Language::English).unwrap();
        assert_eq!(code, "user_not_found");
        assert_eq!(en, "User not found");
        assert_eq!(status, 404);

        let (_, pt, _) = get_error_message("auth", "user_not_found", Language::Portuguese).unwrap();
        assert_eq!(pt, "Usuário não encontrado");

        assert!(get_error_message("token", "expired", Language::English).is_none());
    }

    #[test]
    fn test_format_message() {
        let mut params = HashMap::new();
        params.insert("minutes", "7".to_string());
        assert_eq!(format_message("Wait {minutes} minutes", &params), "Wait 7 minutes");
    }

    #[test]
    fn test_unknown_message_falls_back_to_key() {
        assert_eq!(get_message("no_such_message", Language::English), "no_such_message");
        assert_eq!(
            get_message("email_verified", Language::Portuguese),
            "Email confirmado com sucesso"
        );
    }
}

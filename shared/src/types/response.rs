//! API error envelope

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Error body returned by every failing endpoint
///
/// `error` carries the localised, human-readable message so clients can show
/// it directly; `code` is the stable machine-readable identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minutes_left: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<HashMap<String, Vec<String>>>,
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
            minutes_left: None,
            fields: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_minutes_left(mut self, minutes: i64) -> Self {
        self.minutes_left = Some(minutes);
        self
    }

    pub fn with_fields(mut self, fields: HashMap<String, Vec<String>>) -> Self {
        self.fields = Some(fields);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_serialization() {
        let body = ErrorResponse::new("active_code_exists", "Wait 3 minutes").with_minutes_left(3);
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["error"], "Wait 3 minutes");
        assert_eq!(json["code"], "active_code_exists");
        assert_eq!(json["minutesLeft"], 3);
        assert!(json.get("fields").is_none());
    }
}

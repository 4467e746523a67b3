//! Type definitions shared across crates
//!
//! - `language` - Language negotiation for localised messages
//! - `response` - Error envelope returned by the HTTP layer

pub mod language;
pub mod response;

pub use language::Language;
pub use response::ErrorResponse;

//! Identity service module
//!
//! HTTP client for a GoTrue-compatible identity service. Admin endpoints are
//! called with the service-role key, public endpoints with the anonymous key.

pub mod http;


pub use http::HttpIdentityService;

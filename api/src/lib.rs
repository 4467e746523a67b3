//! # FitAI API
//!
//! HTTP layer of the FitAI Pro authentication back end: routes, request and
//! response types, localised error mapping and middleware.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod i18n;
pub mod middleware;
pub mod routes;

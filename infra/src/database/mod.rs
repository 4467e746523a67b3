//! Database module - PostgreSQL implementations using SQLx
//!
//! This module provides database access layer implementations including:
//! - Connection pool management
//! - Embedded migrations
//! - The verification record store

pub mod connection;
pub mod verification_repository;


// Re-export commonly used types
pub use connection::DatabasePool;
pub use verification_repository::PostgresVerificationRepository;

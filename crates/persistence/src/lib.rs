//! Persistence layer for the TipWedding backend.
//!
//! This crate contains:
//! - Database connection management
//! - Entity definitions (database row mappings)
//! - Repository implementations, including the transactional invitation
//!   lifecycle and vendor registration

pub mod db;
pub mod entities;
pub mod metrics;
pub mod repositories;

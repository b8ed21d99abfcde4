//! Shared utilities and common types for the TipWedding backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Common validation logic (amounts, handles, service figures)
//! - Offset pagination helpers
//! - Wedding slug generation

pub mod pagination;
pub mod slug;
pub mod validation;

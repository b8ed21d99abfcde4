//! Domain layer for the TipWedding backend.
//!
//! This crate contains:
//! - Domain models (Vendor, VendorInvitation, Wedding, WeddingVendor, Tip)
//! - Pure business services (tip recommendations, payment method resolution)

pub mod models;
pub mod services;

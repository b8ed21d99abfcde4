//! API route handlers.

pub mod coordinators;
pub mod health;
pub mod invitations;
pub mod roster;
pub mod tips;
pub mod vendors;
pub mod weddings;

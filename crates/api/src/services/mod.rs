//! External-facing services: email delivery and card checkout.

pub mod checkout;
pub mod email;

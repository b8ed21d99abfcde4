//! Pure business services.

pub mod payment_methods;
pub mod tip_recommendation;

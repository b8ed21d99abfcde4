//! Wedding-vendor engagement models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use shared::validation::{validate_service_hours, validate_service_rate, validate_tip_amount};

/// One vendor's participation in one wedding, with per-engagement
/// overrides. At most one row per (wedding, vendor) pair. Never mutated
/// after creation; removed only when its wedding is deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct WeddingVendor {
    pub id: Uuid,
    pub wedding_id: Uuid,
    pub vendor_id: Uuid,
    pub service_hours: Option<f64>,
    pub service_rate: Option<f64>,
    /// Explicit tip override; collapses the recommendation to this value.
    pub custom_tip_amount: Option<f64>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Request to add a vendor to a wedding's roster.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct AddToRosterRequest {
    pub wedding_id: Uuid,
    pub vendor_id: Uuid,

    #[validate(custom(function = "validate_service_hours"))]
    pub service_hours: Option<f64>,

    #[validate(custom(function = "validate_service_rate"))]
    pub service_rate: Option<f64>,

    #[validate(custom(function = "validate_tip_amount"))]
    pub custom_tip_amount: Option<f64>,

    #[validate(length(max = 1000, message = "Notes must be at most 1000 characters"))]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_to_roster_validation() {
        let valid = AddToRosterRequest {
            wedding_id: Uuid::new_v4(),
            vendor_id: Uuid::new_v4(),
            service_hours: Some(8.0),
            service_rate: Some(25.0),
            custom_tip_amount: None,
            notes: None,
        };
        assert!(valid.validate().is_ok());

        let invalid = AddToRosterRequest {
            wedding_id: Uuid::new_v4(),
            vendor_id: Uuid::new_v4(),
            service_hours: Some(-2.0),
            service_rate: None,
            custom_tip_amount: None,
            notes: None,
        };
        assert!(invalid.validate().is_err());
    }
}

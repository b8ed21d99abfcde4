//! Tip domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use shared::validation::validate_tip_amount;

use super::payment::PaymentChannel;

/// Settlement status of a recorded tip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TipStatus {
    Pending,
    Completed,
    Failed,
}

/// A tip from the couple (or a guest) to a vendor for one wedding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Tip {
    pub id: Uuid,
    pub wedding_id: Uuid,
    pub vendor_id: Uuid,
    /// Dollars.
    pub amount: f64,
    pub payment_method: PaymentChannel,
    pub status: TipStatus,
    pub guest_name: Option<String>,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Three-tier tip suggestion, in whole dollars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TipRecommendation {
    pub low: i64,
    pub medium: i64,
    pub high: i64,
}

/// Request to record a tip.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct RecordTipRequest {
    pub wedding_id: Uuid,
    pub vendor_id: Uuid,

    #[validate(custom(function = "validate_tip_amount"))]
    pub amount: f64,

    pub payment_method: PaymentChannel,

    #[validate(length(max = 100, message = "Guest name must be at most 100 characters"))]
    pub guest_name: Option<String>,

    #[validate(length(max = 500, message = "Message must be at most 500 characters"))]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_tip_validation() {
        let valid = RecordTipRequest {
            wedding_id: Uuid::new_v4(),
            vendor_id: Uuid::new_v4(),
            amount: 40.0,
            payment_method: PaymentChannel::Venmo,
            guest_name: None,
            message: Some("Thank you!".to_string()),
        };
        assert!(valid.validate().is_ok());

        let invalid = RecordTipRequest {
            wedding_id: Uuid::new_v4(),
            vendor_id: Uuid::new_v4(),
            amount: -10.0,
            payment_method: PaymentChannel::Stripe,
            guest_name: None,
            message: None,
        };
        assert!(invalid.validate().is_err());
    }

    #[test]
    fn test_tip_status_serialization() {
        assert_eq!(
            serde_json::to_string(&TipStatus::Completed).unwrap(),
            "\"COMPLETED\""
        );
    }
}

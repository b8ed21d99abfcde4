//! Vendor invitation domain models.
//!
//! An invitation is a one-time onboarding grant: issued by a coordinator,
//! consumed at most once by the invited vendor, kept forever as an audit
//! trail. Expiry is derived from `expires_at` at read time; there is no
//! stored EXPIRED state and no background sweeper.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::vendor::VendorRole;

/// Invitation expiry window, fixed at 7 days from creation.
pub const INVITATION_EXPIRY_DAYS: i64 = 7;

/// Stored invitation status. `Expired` never appears in storage; it is a
/// read-time view of a `Sent` invitation past its expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvitationStatus {
    Sent,
    Accepted,
    Expired,
}

/// A vendor invitation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct VendorInvitation {
    pub id: Uuid,
    /// Opaque unguessable token identifying this grant.
    pub token: String,
    pub email: String,
    pub vendor_name: String,
    pub role: VendorRole,
    pub message: Option<String>,
    pub status: InvitationStatus,
    pub wedding_id: Uuid,
    pub coordinator_id: Uuid,
    /// Set once the invitation has been accepted.
    pub vendor_id: Option<Uuid>,
    pub expires_at: DateTime<Utc>,
    pub accepted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Compute the expiry timestamp for an invitation created now.
pub fn invitation_expiry() -> DateTime<Utc> {
    Utc::now() + Duration::days(INVITATION_EXPIRY_DAYS)
}

/// Request to invite a vendor to a wedding.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateInvitationRequest {
    #[validate(email(message = "Invalid email address"))]
    #[validate(length(max = 255, message = "Email must be at most 255 characters"))]
    pub email: String,

    #[validate(length(
        min = 1,
        max = 100,
        message = "Vendor name must be between 1 and 100 characters"
    ))]
    pub vendor_name: String,

    pub role: VendorRole,

    pub wedding_id: Uuid,

    /// Issuing coordinator, passed explicitly.
    pub coordinator_id: Uuid,

    #[validate(length(max = 1000, message = "Message must be at most 1000 characters"))]
    pub message: Option<String>,
}

/// Query parameters for listing a coordinator's invitations.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ListInvitationsQuery {
    pub coordinator_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invitation_expiry_window() {
        let expires = invitation_expiry();
        let diff = expires - Utc::now();
        assert!(diff.num_days() >= 6 && diff.num_days() <= 7);
    }

    #[test]
    fn test_create_invitation_request_validation() {
        let valid = CreateInvitationRequest {
            email: "vendor@example.com".to_string(),
            vendor_name: "Golden Hour Photo".to_string(),
            role: VendorRole::Photographer,
            wedding_id: Uuid::new_v4(),
            coordinator_id: Uuid::new_v4(),
            message: Some("Would love to have you!".to_string()),
        };
        assert!(valid.validate().is_ok());
    }

    #[test]
    fn test_create_invitation_rejects_bad_email() {
        let invalid = CreateInvitationRequest {
            email: "not-an-email".to_string(),
            vendor_name: "Golden Hour Photo".to_string(),
            role: VendorRole::Photographer,
            wedding_id: Uuid::new_v4(),
            coordinator_id: Uuid::new_v4(),
            message: None,
        };
        assert!(invalid.validate().is_err());
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&InvitationStatus::Sent).unwrap(),
            "\"SENT\""
        );
        assert_eq!(
            serde_json::to_string(&InvitationStatus::Accepted).unwrap(),
            "\"ACCEPTED\""
        );
    }
}

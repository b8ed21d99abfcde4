//! Vendor invitation entity (database row mapping).
//!
//! Invitations are never hard-deleted; accepted and expired rows remain as
//! an audit trail. Expiry is evaluated lazily at read time.

use chrono::{DateTime, Utc};
use domain::models::invitation::InvitationStatus;
use sqlx::FromRow;
use uuid::Uuid;

use super::vendor::VendorRoleDb;

/// Database enum for invitation_status. Only SENT and ACCEPTED are stored;
/// EXPIRED is derived from `expires_at` at read time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "invitation_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvitationStatusDb {
    Sent,
    Accepted,
}

/// Database row mapping for the vendor_invitations table.
#[derive(Debug, Clone, FromRow)]
pub struct VendorInvitationEntity {
    pub id: Uuid,
    pub token: String,
    pub email: String,
    pub vendor_name: String,
    pub role: VendorRoleDb,
    pub message: Option<String>,
    pub status: InvitationStatusDb,
    pub wedding_id: Uuid,
    pub coordinator_id: Uuid,
    pub vendor_id: Option<Uuid>,
    pub expires_at: DateTime<Utc>,
    pub accepted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl VendorInvitationEntity {
    /// Whether this invitation is past its expiry window.
    pub fn is_expired(&self) -> bool {
        self.expires_at < Utc::now()
    }

    /// Whether this invitation can still be accepted.
    pub fn is_acceptable(&self) -> bool {
        self.status == InvitationStatusDb::Sent && !self.is_expired()
    }

    /// Read-time status: a SENT invitation past expiry reads as EXPIRED.
    pub fn derived_status(&self) -> InvitationStatus {
        match self.status {
            InvitationStatusDb::Accepted => InvitationStatus::Accepted,
            InvitationStatusDb::Sent if self.is_expired() => InvitationStatus::Expired,
            InvitationStatusDb::Sent => InvitationStatus::Sent,
        }
    }
}

impl From<VendorInvitationEntity> for domain::models::VendorInvitation {
    fn from(entity: VendorInvitationEntity) -> Self {
        let status = entity.derived_status();
        Self {
            id: entity.id,
            token: entity.token,
            email: entity.email,
            vendor_name: entity.vendor_name,
            role: entity.role.into(),
            message: entity.message,
            status,
            wedding_id: entity.wedding_id,
            coordinator_id: entity.coordinator_id,
            vendor_id: entity.vendor_id,
            expires_at: entity.expires_at,
            accepted_at: entity.accepted_at,
            created_at: entity.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn invitation(
        status: InvitationStatusDb,
        expires_at: DateTime<Utc>,
    ) -> VendorInvitationEntity {
        VendorInvitationEntity {
            id: Uuid::new_v4(),
            token: "tok_abc123".to_string(),
            email: "vendor@example.com".to_string(),
            vendor_name: "Golden Hour Photo".to_string(),
            role: VendorRoleDb::Photographer,
            message: None,
            status,
            wedding_id: Uuid::new_v4(),
            coordinator_id: Uuid::new_v4(),
            vendor_id: None,
            expires_at,
            accepted_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_sent_and_unexpired_is_acceptable() {
        let inv = invitation(InvitationStatusDb::Sent, Utc::now() + Duration::days(7));
        assert!(inv.is_acceptable());
        assert_eq!(inv.derived_status(), InvitationStatus::Sent);
    }

    #[test]
    fn test_expired_sent_reads_as_expired() {
        let inv = invitation(InvitationStatusDb::Sent, Utc::now() - Duration::days(1));
        assert!(!inv.is_acceptable());
        assert_eq!(inv.derived_status(), InvitationStatus::Expired);
    }

    #[test]
    fn test_accepted_is_terminal_even_past_expiry() {
        let inv = invitation(InvitationStatusDb::Accepted, Utc::now() - Duration::days(1));
        assert!(!inv.is_acceptable());
        assert_eq!(inv.derived_status(), InvitationStatus::Accepted);
    }
}

//! Vendor entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::payment::ChannelSettings;
use domain::models::vendor::{VendorRole, VendorStatus};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for vendor_role that maps to the PostgreSQL enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "vendor_role", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VendorRoleDb {
    Officiant,
    Coordinator,
    SetupAttendant,
    Photographer,
}

impl From<VendorRoleDb> for VendorRole {
    fn from(db_role: VendorRoleDb) -> Self {
        match db_role {
            VendorRoleDb::Officiant => VendorRole::Officiant,
            VendorRoleDb::Coordinator => VendorRole::Coordinator,
            VendorRoleDb::SetupAttendant => VendorRole::SetupAttendant,
            VendorRoleDb::Photographer => VendorRole::Photographer,
        }
    }
}

impl From<VendorRole> for VendorRoleDb {
    fn from(role: VendorRole) -> Self {
        match role {
            VendorRole::Officiant => VendorRoleDb::Officiant,
            VendorRole::Coordinator => VendorRoleDb::Coordinator,
            VendorRole::SetupAttendant => VendorRoleDb::SetupAttendant,
            VendorRole::Photographer => VendorRoleDb::Photographer,
        }
    }
}

/// Database enum for vendor_status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "vendor_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VendorStatusDb {
    Pending,
    Active,
    Suspended,
}

impl From<VendorStatusDb> for VendorStatus {
    fn from(db_status: VendorStatusDb) -> Self {
        match db_status {
            VendorStatusDb::Pending => VendorStatus::Pending,
            VendorStatusDb::Active => VendorStatus::Active,
            VendorStatusDb::Suspended => VendorStatus::Suspended,
        }
    }
}

impl From<VendorStatus> for VendorStatusDb {
    fn from(status: VendorStatus) -> Self {
        match status {
            VendorStatus::Pending => VendorStatusDb::Pending,
            VendorStatus::Active => VendorStatusDb::Active,
            VendorStatus::Suspended => VendorStatusDb::Suspended,
        }
    }
}

/// Database row mapping for the vendors table.
#[derive(Debug, Clone, FromRow)]
pub struct VendorEntity {
    pub id: Uuid,
    pub email: Option<String>,
    pub name: String,
    pub phone: Option<String>,
    pub role: VendorRoleDb,
    pub status: VendorStatusDb,
    pub bio: Option<String>,
    pub website: Option<String>,
    pub service_area: Option<String>,
    pub is_profile_complete: bool,
    pub accepts_stripe: bool,
    pub accepts_venmo: bool,
    pub accepts_cash_app: bool,
    pub accepts_zelle: bool,
    pub stripe_account_id: Option<String>,
    pub venmo_handle: Option<String>,
    pub cash_app_handle: Option<String>,
    pub zelle_contact: Option<String>,
    pub invited_by: Option<Uuid>,
    pub registered_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl VendorEntity {
    /// The vendor's channel settings snapshot for the resolver.
    pub fn channel_settings(&self) -> ChannelSettings {
        ChannelSettings {
            accepts_stripe: self.accepts_stripe,
            accepts_venmo: self.accepts_venmo,
            accepts_cash_app: self.accepts_cash_app,
            accepts_zelle: self.accepts_zelle,
            stripe_account_id: self.stripe_account_id.clone(),
            venmo_handle: self.venmo_handle.clone(),
            cash_app_handle: self.cash_app_handle.clone(),
            zelle_contact: self.zelle_contact.clone(),
        }
    }
}

impl From<VendorEntity> for domain::models::Vendor {
    fn from(entity: VendorEntity) -> Self {
        let channels = entity.channel_settings();
        Self {
            id: entity.id,
            email: entity.email,
            name: entity.name,
            phone: entity.phone,
            role: entity.role.into(),
            status: entity.status.into(),
            bio: entity.bio,
            website: entity.website,
            service_area: entity.service_area,
            is_profile_complete: entity.is_profile_complete,
            channels,
            invited_by: entity.invited_by,
            registered_at: entity.registered_at,
            created_at: entity.created_at,
        }
    }
}

/// Vendor row joined with engagement statistics, for coordinator listings.
#[derive(Debug, Clone, FromRow)]
pub struct VendorWithStatsEntity {
    #[sqlx(flatten)]
    pub vendor: VendorEntity,
    pub wedding_count: i64,
    pub completed_tip_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::services::payment_methods;

    fn vendor_entity() -> VendorEntity {
        VendorEntity {
            id: Uuid::new_v4(),
            email: Some("vendor@example.com".to_string()),
            name: "Golden Hour Photo".to_string(),
            phone: Some("555-0100".to_string()),
            role: VendorRoleDb::Photographer,
            status: VendorStatusDb::Active,
            bio: None,
            website: None,
            service_area: None,
            is_profile_complete: true,
            accepts_stripe: true,
            accepts_venmo: false,
            accepts_cash_app: false,
            accepts_zelle: false,
            stripe_account_id: Some("acct_123".to_string()),
            venmo_handle: None,
            cash_app_handle: None,
            zelle_contact: None,
            invited_by: None,
            registered_at: Some(Utc::now()),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_channel_settings_snapshot_feeds_resolver() {
        let entity = vendor_entity();
        let settings = entity.channel_settings();
        assert_eq!(
            payment_methods::resolve_preferred(&settings),
            Some(domain::models::PaymentChannel::Stripe)
        );
    }

    #[test]
    fn test_entity_to_domain_conversion() {
        let entity = vendor_entity();
        let id = entity.id;
        let vendor: domain::models::Vendor = entity.into();
        assert_eq!(vendor.id, id);
        assert_eq!(vendor.role, VendorRole::Photographer);
        assert_eq!(vendor.status, VendorStatus::Active);
        assert!(vendor.channels.accepts_stripe);
    }
}

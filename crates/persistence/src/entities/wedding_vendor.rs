//! Wedding-vendor engagement entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the wedding_vendors table.
#[derive(Debug, Clone, FromRow)]
pub struct WeddingVendorEntity {
    pub id: Uuid,
    pub wedding_id: Uuid,
    pub vendor_id: Uuid,
    pub service_hours: Option<f64>,
    pub service_rate: Option<f64>,
    pub custom_tip_amount: Option<f64>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<WeddingVendorEntity> for domain::models::WeddingVendor {
    fn from(entity: WeddingVendorEntity) -> Self {
        Self {
            id: entity.id,
            wedding_id: entity.wedding_id,
            vendor_id: entity.vendor_id,
            service_hours: entity.service_hours,
            service_rate: entity.service_rate,
            custom_tip_amount: entity.custom_tip_amount,
            notes: entity.notes,
            created_at: entity.created_at,
        }
    }
}

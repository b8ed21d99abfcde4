//! Wedding entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the weddings table.
#[derive(Debug, Clone, FromRow)]
pub struct WeddingEntity {
    pub id: Uuid,
    pub slug: String,
    pub couple_name: String,
    pub wedding_date: DateTime<Utc>,
    pub venue: Option<String>,
    pub notes: Option<String>,
    pub coordinator_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<WeddingEntity> for domain::models::Wedding {
    fn from(entity: WeddingEntity) -> Self {
        Self {
            id: entity.id,
            slug: entity.slug,
            couple_name: entity.couple_name,
            wedding_date: entity.wedding_date,
            venue: entity.venue,
            notes: entity.notes,
            coordinator_id: entity.coordinator_id,
            created_at: entity.created_at,
        }
    }
}

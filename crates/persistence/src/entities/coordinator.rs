//! Coordinator entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the coordinators table.
#[derive(Debug, Clone, FromRow)]
pub struct CoordinatorEntity {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<CoordinatorEntity> for domain::models::Coordinator {
    fn from(entity: CoordinatorEntity) -> Self {
        Self {
            id: entity.id,
            email: entity.email,
            name: entity.name,
            company: entity.company,
            phone: entity.phone,
            created_at: entity.created_at,
        }
    }
}

//! Wedding domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A wedding: the container invitations and roster entries operate against.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Wedding {
    pub id: Uuid,
    /// URL slug for the public couple page.
    pub slug: String,
    pub couple_name: String,
    pub wedding_date: DateTime<Utc>,
    pub venue: Option<String>,
    pub notes: Option<String>,
    pub coordinator_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Request to create a wedding.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateWeddingRequest {
    #[validate(length(
        min = 1,
        max = 200,
        message = "Couple name must be between 1 and 200 characters"
    ))]
    pub couple_name: String,

    pub wedding_date: DateTime<Utc>,

    #[validate(length(max = 200, message = "Venue must be at most 200 characters"))]
    pub venue: Option<String>,

    #[validate(length(max = 2000, message = "Notes must be at most 2000 characters"))]
    pub notes: Option<String>,

    pub coordinator_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_wedding_request_validation() {
        let valid = CreateWeddingRequest {
            couple_name: "Sarah & James".to_string(),
            wedding_date: Utc::now(),
            venue: Some("Rosewood Barn".to_string()),
            notes: None,
            coordinator_id: Uuid::new_v4(),
        };
        assert!(valid.validate().is_ok());

        let invalid = CreateWeddingRequest {
            couple_name: "".to_string(),
            wedding_date: Utc::now(),
            venue: None,
            notes: None,
            coordinator_id: Uuid::new_v4(),
        };
        assert!(invalid.validate().is_err());
    }
}

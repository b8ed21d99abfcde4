//! Coordinator domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A wedding coordinator identity.
///
/// Coordinator identity is passed explicitly into every operation that
/// needs it; there is no implicit "current coordinator" context.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Coordinator {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Login / find-or-create request for a coordinator.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CoordinatorLoginRequest {
    #[validate(email(message = "Invalid email address"))]
    #[validate(length(max = 255, message = "Email must be at most 255 characters"))]
    pub email: String,

    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 100, message = "Company must be at most 100 characters"))]
    pub company: Option<String>,
}

impl CoordinatorLoginRequest {
    /// Display name to use when auto-creating the account: the explicit
    /// name if given, otherwise derived from the email local part.
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self
                .email
                .split('@')
                .next()
                .unwrap_or(&self.email)
                .replace(['.', '_', '-'], " "),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_validation() {
        let valid = CoordinatorLoginRequest {
            email: "casey@weddings.example".to_string(),
            name: Some("Casey Park".to_string()),
            company: None,
        };
        assert!(valid.validate().is_ok());

        let invalid = CoordinatorLoginRequest {
            email: "not-an-email".to_string(),
            name: None,
            company: None,
        };
        assert!(invalid.validate().is_err());
    }

    #[test]
    fn test_display_name_from_email() {
        let request = CoordinatorLoginRequest {
            email: "casey.park@weddings.example".to_string(),
            name: None,
            company: None,
        };
        assert_eq!(request.display_name(), "casey park");
    }

    #[test]
    fn test_display_name_explicit_wins() {
        let request = CoordinatorLoginRequest {
            email: "casey.park@weddings.example".to_string(),
            name: Some("Casey Park".to_string()),
            company: None,
        };
        assert_eq!(request.display_name(), "Casey Park");
    }
}

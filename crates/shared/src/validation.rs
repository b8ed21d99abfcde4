//! Common validation utilities.

use validator::ValidationError;

/// Maximum tip amount accepted by the platform, in dollars.
const MAX_TIP_AMOUNT: f64 = 10_000.0;

/// Maximum service hours for a single engagement.
const MAX_SERVICE_HOURS: f64 = 168.0;

/// Validates that a tip amount is positive and within platform limits.
pub fn validate_tip_amount(amount: f64) -> Result<(), ValidationError> {
    if amount > 0.0 && amount <= MAX_TIP_AMOUNT {
        Ok(())
    } else {
        let mut err = ValidationError::new("tip_amount_range");
        err.message = Some("Tip amount must be between $0 and $10,000".into());
        Err(err)
    }
}

/// Validates that service hours are non-negative and plausible.
pub fn validate_service_hours(hours: f64) -> Result<(), ValidationError> {
    if (0.0..=MAX_SERVICE_HOURS).contains(&hours) {
        Ok(())
    } else {
        let mut err = ValidationError::new("service_hours_range");
        err.message = Some("Service hours must be between 0 and 168".into());
        Err(err)
    }
}

/// Validates that a service rate is non-negative.
pub fn validate_service_rate(rate: f64) -> Result<(), ValidationError> {
    if rate >= 0.0 {
        Ok(())
    } else {
        let mut err = ValidationError::new("service_rate_range");
        err.message = Some("Service rate must be non-negative".into());
        Err(err)
    }
}

lazy_static::lazy_static! {
    static ref P2P_HANDLE_REGEX: regex::Regex =
        regex::Regex::new(r"^\$?[A-Za-z0-9][A-Za-z0-9._-]{1,49}$").unwrap();
}

/// Validates a Venmo / Cash App style payment handle.
///
/// Accepts an optional leading `$` (Cash App cashtags), then 2-50
/// alphanumeric/./_/- characters.
pub fn validate_payment_handle(handle: &str) -> Result<(), ValidationError> {
    if P2P_HANDLE_REGEX.is_match(handle) {
        Ok(())
    } else {
        let mut err = ValidationError::new("payment_handle_format");
        err.message = Some("Payment handle contains invalid characters".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_tip_amount_valid() {
        assert!(validate_tip_amount(25.0).is_ok());
        assert!(validate_tip_amount(0.5).is_ok());
        assert!(validate_tip_amount(10_000.0).is_ok());
    }

    #[test]
    fn test_validate_tip_amount_invalid() {
        assert!(validate_tip_amount(0.0).is_err());
        assert!(validate_tip_amount(-5.0).is_err());
        assert!(validate_tip_amount(10_000.01).is_err());
    }

    #[test]
    fn test_validate_service_hours() {
        assert!(validate_service_hours(0.0).is_ok());
        assert!(validate_service_hours(8.5).is_ok());
        assert!(validate_service_hours(168.0).is_ok());
        assert!(validate_service_hours(-1.0).is_err());
        assert!(validate_service_hours(200.0).is_err());
    }

    #[test]
    fn test_validate_service_rate() {
        assert!(validate_service_rate(0.0).is_ok());
        assert!(validate_service_rate(125.0).is_ok());
        assert!(validate_service_rate(-0.01).is_err());
    }

    #[test]
    fn test_validate_payment_handle_valid() {
        assert!(validate_payment_handle("jane-doe").is_ok());
        assert!(validate_payment_handle("$janedoe").is_ok());
        assert!(validate_payment_handle("jane.doe_99").is_ok());
    }

    #[test]
    fn test_validate_payment_handle_invalid() {
        assert!(validate_payment_handle("").is_err());
        assert!(validate_payment_handle("j").is_err());
        assert!(validate_payment_handle("jane doe").is_err());
        assert!(validate_payment_handle("jane@doe").is_err());
    }
}

//! Payment channel model.
//!
//! A vendor may accept tips over several rails at once. The enablement
//! booleans are the stored truth; the old single `preferred_payment` enum
//! survives only as a deprecated input format normalized at the API boundary.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A payment rail a vendor can receive tips through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentChannel {
    #[serde(rename = "STRIPE")]
    Stripe,
    #[serde(rename = "VENMO")]
    Venmo,
    #[serde(rename = "CASHAPP")]
    CashApp,
    #[serde(rename = "ZELLE")]
    Zelle,
}

impl PaymentChannel {
    /// Fixed preference order: most-common / most-frictionless rail first.
    /// This is policy, not alphabetical or insertion order.
    pub const PREFERENCE_ORDER: [PaymentChannel; 4] = [
        PaymentChannel::Stripe,
        PaymentChannel::Venmo,
        PaymentChannel::CashApp,
        PaymentChannel::Zelle,
    ];

    /// Human-readable channel name.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentChannel::Stripe => "Credit/Debit Card",
            PaymentChannel::Venmo => "Venmo",
            PaymentChannel::CashApp => "Cash App",
            PaymentChannel::Zelle => "Zelle",
        }
    }
}

impl std::fmt::Display for PaymentChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentChannel::Stripe => write!(f, "STRIPE"),
            PaymentChannel::Venmo => write!(f, "VENMO"),
            PaymentChannel::CashApp => write!(f, "CASHAPP"),
            PaymentChannel::Zelle => write!(f, "ZELLE"),
        }
    }
}

/// A vendor's per-channel enablement flags and credentials.
///
/// An enabled channel whose credential is missing is not usable; the
/// resolver treats it as absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ChannelSettings {
    #[serde(default)]
    pub accepts_stripe: bool,
    #[serde(default)]
    pub accepts_venmo: bool,
    #[serde(default)]
    pub accepts_cash_app: bool,
    #[serde(default)]
    pub accepts_zelle: bool,

    pub stripe_account_id: Option<String>,
    pub venmo_handle: Option<String>,
    pub cash_app_handle: Option<String>,
    pub zelle_contact: Option<String>,
}

impl ChannelSettings {
    /// Whether any channel is enabled at all, credentialed or not.
    pub fn any_enabled(&self) -> bool {
        self.accepts_stripe || self.accepts_venmo || self.accepts_cash_app || self.accepts_zelle
    }

    /// Credential for a channel, if present and non-empty.
    pub fn credential(&self, channel: PaymentChannel) -> Option<&str> {
        let value = match channel {
            PaymentChannel::Stripe => self.stripe_account_id.as_deref(),
            PaymentChannel::Venmo => self.venmo_handle.as_deref(),
            PaymentChannel::CashApp => self.cash_app_handle.as_deref(),
            PaymentChannel::Zelle => self.zelle_contact.as_deref(),
        };
        value.filter(|v| !v.trim().is_empty())
    }

    /// Whether the enablement flag for a channel is set.
    pub fn is_enabled(&self, channel: PaymentChannel) -> bool {
        match channel {
            PaymentChannel::Stripe => self.accepts_stripe,
            PaymentChannel::Venmo => self.accepts_venmo,
            PaymentChannel::CashApp => self.accepts_cash_app,
            PaymentChannel::Zelle => self.accepts_zelle,
        }
    }

    /// Normalize the deprecated single `preferred_payment` enum into
    /// enablement flags. Only applies when no boolean flag was given.
    pub fn from_legacy_preferred(preferred: PaymentChannel) -> Self {
        let mut settings = ChannelSettings {
            accepts_stripe: false,
            ..Default::default()
        };
        match preferred {
            PaymentChannel::Stripe => settings.accepts_stripe = true,
            PaymentChannel::Venmo => settings.accepts_venmo = true,
            PaymentChannel::CashApp => settings.accepts_cash_app = true,
            PaymentChannel::Zelle => settings.accepts_zelle = true,
        }
        settings
    }
}

/// A usable channel offered for selection in the tipping UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PaymentOption {
    pub channel: PaymentChannel,
    /// What the guest sees: the handle for P2P rails, "Credit/Debit Card"
    /// for Stripe.
    pub display_handle: String,
}

/// Validation failures for a vendor's payment profile.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelValidationError {
    #[error("At least one payment method must be enabled")]
    NoPaymentChannel,

    #[error("{} is enabled but its credential is missing", .0.label())]
    MissingChannelCredential(PaymentChannel),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_serde_wire_names() {
        assert_eq!(
            serde_json::to_string(&PaymentChannel::CashApp).unwrap(),
            "\"CASHAPP\""
        );
        let parsed: PaymentChannel = serde_json::from_str("\"ZELLE\"").unwrap();
        assert_eq!(parsed, PaymentChannel::Zelle);
    }

    #[test]
    fn test_any_enabled() {
        let none = ChannelSettings::default();
        assert!(!none.any_enabled());

        let one = ChannelSettings {
            accepts_zelle: true,
            ..Default::default()
        };
        assert!(one.any_enabled());
    }

    #[test]
    fn test_credential_empty_string_is_absent() {
        let settings = ChannelSettings {
            accepts_venmo: true,
            venmo_handle: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(settings.credential(PaymentChannel::Venmo), None);
    }

    #[test]
    fn test_from_legacy_preferred() {
        let settings = ChannelSettings::from_legacy_preferred(PaymentChannel::Venmo);
        assert!(settings.accepts_venmo);
        assert!(!settings.accepts_stripe);
        assert!(!settings.accepts_cash_app);
        assert!(!settings.accepts_zelle);
    }
}

//! Vendor domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use shared::validation::validate_payment_handle;

use super::payment::{ChannelSettings, ChannelValidationError, PaymentChannel};

/// Service role a vendor performs at a wedding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VendorRole {
    Officiant,
    Coordinator,
    SetupAttendant,
    Photographer,
}

impl VendorRole {
    /// Parse a role string from the wire, `None` for unknown values.
    ///
    /// Callers that need a lenient fallback (the tip calculator) default to
    /// `Coordinator`; callers creating records must reject unknown roles.
    pub fn parse(s: &str) -> Option<VendorRole> {
        match s {
            "OFFICIANT" => Some(VendorRole::Officiant),
            "COORDINATOR" => Some(VendorRole::Coordinator),
            "SETUP_ATTENDANT" => Some(VendorRole::SetupAttendant),
            "PHOTOGRAPHER" => Some(VendorRole::Photographer),
            _ => None,
        }
    }
}

impl std::fmt::Display for VendorRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VendorRole::Officiant => write!(f, "OFFICIANT"),
            VendorRole::Coordinator => write!(f, "COORDINATOR"),
            VendorRole::SetupAttendant => write!(f, "SETUP_ATTENDANT"),
            VendorRole::Photographer => write!(f, "PHOTOGRAPHER"),
        }
    }
}

/// Lifecycle status of a vendor record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VendorStatus {
    Pending,
    Active,
    Suspended,
}

/// A vendor identity record.
///
/// Created either directly by a coordinator (pre-activated) or through
/// invitation acceptance (activated on acceptance).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Vendor {
    pub id: Uuid,
    /// Nullable but unique when present.
    pub email: Option<String>,
    pub name: String,
    pub phone: Option<String>,
    pub role: VendorRole,
    pub status: VendorStatus,
    pub bio: Option<String>,
    pub website: Option<String>,
    pub service_area: Option<String>,
    pub is_profile_complete: bool,
    #[serde(flatten)]
    pub channels: ChannelSettings,
    /// Coordinator who first brought this vendor onto the platform.
    pub invited_by: Option<Uuid>,
    pub registered_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Request to create a vendor directly (coordinator's book).
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateVendorRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,

    pub phone: Option<String>,

    pub role: VendorRole,

    pub website: Option<String>,
    pub service_area: Option<String>,

    /// Coordinator identity, passed explicitly with every request.
    pub coordinator_id: Uuid,

    pub accepts_stripe: Option<bool>,
    pub accepts_venmo: Option<bool>,
    pub accepts_cash_app: Option<bool>,
    pub accepts_zelle: Option<bool>,

    pub stripe_account_id: Option<String>,
    #[validate(custom(function = "validate_payment_handle"))]
    pub venmo_handle: Option<String>,
    #[validate(custom(function = "validate_payment_handle"))]
    pub cash_app_handle: Option<String>,
    pub zelle_contact: Option<String>,

    /// Deprecated single-channel input; normalized into the enablement
    /// booleans when none of the `accepts_*` flags are given.
    pub preferred_payment: Option<PaymentChannel>,
}

impl CreateVendorRequest {
    /// Resolve the request into channel settings, applying the legacy
    /// `preferred_payment` normalization.
    pub fn channel_settings(&self) -> ChannelSettings {
        let no_flags = self.accepts_stripe.is_none()
            && self.accepts_venmo.is_none()
            && self.accepts_cash_app.is_none()
            && self.accepts_zelle.is_none();

        let mut settings = match (no_flags, self.preferred_payment) {
            (true, Some(preferred)) => ChannelSettings::from_legacy_preferred(preferred),
            (true, None) => ChannelSettings {
                // Direct creation without payment info defaults to card
                // checkout, matching historical behavior.
                accepts_stripe: true,
                ..Default::default()
            },
            _ => ChannelSettings {
                accepts_stripe: self.accepts_stripe.unwrap_or(false),
                accepts_venmo: self.accepts_venmo.unwrap_or(false),
                accepts_cash_app: self.accepts_cash_app.unwrap_or(false),
                accepts_zelle: self.accepts_zelle.unwrap_or(false),
                ..Default::default()
            },
        };

        settings.stripe_account_id = self.stripe_account_id.clone();
        settings.venmo_handle = self.venmo_handle.clone();
        settings.cash_app_handle = self.cash_app_handle.clone();
        settings.zelle_contact = self.zelle_contact.clone();
        settings
    }
}

/// Request to update a vendor. All fields optional; absent fields keep
/// their stored values.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateVendorRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: Option<String>,

    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,

    pub phone: Option<String>,
    pub role: Option<VendorRole>,
    pub bio: Option<String>,
    pub website: Option<String>,
    pub service_area: Option<String>,
    pub status: Option<VendorStatus>,

    pub accepts_stripe: Option<bool>,
    pub accepts_venmo: Option<bool>,
    pub accepts_cash_app: Option<bool>,
    pub accepts_zelle: Option<bool>,

    pub stripe_account_id: Option<String>,
    #[validate(custom(function = "validate_payment_handle"))]
    pub venmo_handle: Option<String>,
    #[validate(custom(function = "validate_payment_handle"))]
    pub cash_app_handle: Option<String>,
    pub zelle_contact: Option<String>,
}

/// Profile data a vendor submits when accepting an invitation.
///
/// The role is deliberately absent: it is taken from the invitation, never
/// from user input, so an invitee cannot claim a role they were not
/// invited for.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct RegisterVendorRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 1, max = 30, message = "Phone must be between 1 and 30 characters"))]
    pub phone: String,

    pub bio: Option<String>,
    pub website: Option<String>,
    pub service_area: Option<String>,

    pub accepts_stripe: Option<bool>,
    pub accepts_venmo: Option<bool>,
    pub accepts_cash_app: Option<bool>,
    pub accepts_zelle: Option<bool>,

    pub stripe_account_id: Option<String>,
    #[validate(custom(function = "validate_payment_handle"))]
    pub venmo_handle: Option<String>,
    #[validate(custom(function = "validate_payment_handle"))]
    pub cash_app_handle: Option<String>,
    pub zelle_contact: Option<String>,
}

impl RegisterVendorRequest {
    /// Channel settings from the submitted profile. Card checkout defaults
    /// to enabled, the P2P rails to disabled.
    pub fn channel_settings(&self) -> ChannelSettings {
        ChannelSettings {
            accepts_stripe: self.accepts_stripe.unwrap_or(true),
            accepts_venmo: self.accepts_venmo.unwrap_or(false),
            accepts_cash_app: self.accepts_cash_app.unwrap_or(false),
            accepts_zelle: self.accepts_zelle.unwrap_or(false),
            stripe_account_id: self.stripe_account_id.clone(),
            venmo_handle: self.venmo_handle.clone(),
            cash_app_handle: self.cash_app_handle.clone(),
            zelle_contact: self.zelle_contact.clone(),
        }
    }

    /// Payment-profile validation for registration: at least one channel
    /// enabled, and every enabled P2P channel carries its credential.
    ///
    /// Stripe is exempt from the credential requirement here: without a
    /// connected account id it still accepts card tips through platform
    /// checkout, it just has no payout destination.
    pub fn validate_channels(&self) -> Result<(), ChannelValidationError> {
        let settings = self.channel_settings();

        if !settings.any_enabled() {
            return Err(ChannelValidationError::NoPaymentChannel);
        }

        for channel in [
            PaymentChannel::Venmo,
            PaymentChannel::CashApp,
            PaymentChannel::Zelle,
        ] {
            if settings.is_enabled(channel) && settings.credential(channel).is_none() {
                return Err(ChannelValidationError::MissingChannelCredential(channel));
            }
        }

        Ok(())
    }
}

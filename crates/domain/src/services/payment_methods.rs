//! Payment method resolution.
//!
//! Reconciles a vendor's enabled-channel set into a single preferred rail
//! per transaction, and lists the usable channels for UI selection. Pure
//! over a channel-settings snapshot.

use crate::models::payment::{ChannelSettings, PaymentChannel, PaymentOption};

/// Whether a channel is usable for receiving a tip: enabled AND its
/// credential is present. For Stripe the credential is the connected
/// account id; enabled-without-account-id means "accepts card via platform
/// checkout" but has no payout destination, so it is not usable here.
pub fn is_usable(settings: &ChannelSettings, channel: PaymentChannel) -> bool {
    settings.is_enabled(channel) && settings.credential(channel).is_some()
}

/// Whether the vendor can take card tips through platform checkout at all.
/// True as soon as Stripe is enabled, connected payout account or not.
pub fn accepts_card_checkout(settings: &ChannelSettings) -> bool {
    settings.accepts_stripe
}

/// Resolve the preferred channel for a transaction.
///
/// Returns the first usable channel in the fixed policy order
/// Stripe > Venmo > CashApp > Zelle, or `None` when nothing is usable —
/// in which case the caller must refuse to initiate a tip.
pub fn resolve_preferred(settings: &ChannelSettings) -> Option<PaymentChannel> {
    PaymentChannel::PREFERENCE_ORDER
        .into_iter()
        .find(|&channel| is_usable(settings, channel))
}

/// List usable channels in preference order for UI selection.
pub fn list_available(settings: &ChannelSettings) -> Vec<PaymentOption> {
    PaymentChannel::PREFERENCE_ORDER
        .into_iter()
        .filter(|&channel| is_usable(settings, channel))
        .map(|channel| PaymentOption {
            channel,
            display_handle: match channel {
                // Card checkout shows a generic label, never the account id.
                PaymentChannel::Stripe => channel.label().to_string(),
                _ => settings
                    .credential(channel)
                    .unwrap_or_default()
                    .to_string(),
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_channels() -> ChannelSettings {
        ChannelSettings {
            accepts_stripe: true,
            accepts_venmo: true,
            accepts_cash_app: true,
            accepts_zelle: true,
            stripe_account_id: Some("acct_123".to_string()),
            venmo_handle: Some("jane-doe".to_string()),
            cash_app_handle: Some("$janedoe".to_string()),
            zelle_contact: Some("jane@example.com".to_string()),
        }
    }

    #[test]
    fn test_no_credentials_resolves_to_none() {
        let settings = ChannelSettings {
            accepts_stripe: true,
            accepts_venmo: true,
            accepts_cash_app: true,
            accepts_zelle: true,
            ..Default::default()
        };
        assert_eq!(resolve_preferred(&settings), None);
        assert!(list_available(&settings).is_empty());
    }

    #[test]
    fn test_policy_order_prefers_stripe() {
        assert_eq!(
            resolve_preferred(&all_channels()),
            Some(PaymentChannel::Stripe)
        );
    }

    #[test]
    fn test_zelle_wins_over_uncredentialed_stripe() {
        let settings = ChannelSettings {
            accepts_stripe: true, // enabled, but no connected account
            accepts_zelle: true,
            zelle_contact: Some("jane@example.com".to_string()),
            ..Default::default()
        };
        assert_eq!(resolve_preferred(&settings), Some(PaymentChannel::Zelle));
        // Card checkout is still accepted, just not a payout destination.
        assert!(accepts_card_checkout(&settings));
    }

    #[test]
    fn test_venmo_beats_cash_app_and_zelle() {
        let mut settings = all_channels();
        settings.accepts_stripe = false;
        assert_eq!(resolve_preferred(&settings), Some(PaymentChannel::Venmo));
    }

    #[test]
    fn test_disabled_channel_is_not_usable_despite_credential() {
        let settings = ChannelSettings {
            accepts_venmo: false,
            venmo_handle: Some("jane-doe".to_string()),
            ..Default::default()
        };
        assert_eq!(resolve_preferred(&settings), None);
    }

    #[test]
    fn test_list_available_order_and_handles() {
        let options = list_available(&all_channels());
        let channels: Vec<_> = options.iter().map(|o| o.channel).collect();
        assert_eq!(
            channels,
            vec![
                PaymentChannel::Stripe,
                PaymentChannel::Venmo,
                PaymentChannel::CashApp,
                PaymentChannel::Zelle
            ]
        );
        assert_eq!(options[0].display_handle, "Credit/Debit Card");
        assert_eq!(options[1].display_handle, "jane-doe");
        assert_eq!(options[3].display_handle, "jane@example.com");
    }

    #[test]
    fn test_list_available_filters_unusable() {
        let settings = ChannelSettings {
            accepts_stripe: true, // no account id -> filtered out
            accepts_cash_app: true,
            cash_app_handle: Some("$janedoe".to_string()),
            ..Default::default()
        };
        let options = list_available(&settings);
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].channel, PaymentChannel::CashApp);
    }
}

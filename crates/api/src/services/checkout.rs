//! Stripe Connect checkout sessions for card tips.
//!
//! Card tips run through platform checkout: the guest pays by card, the
//! platform keeps a percentage fee, and the remainder is transferred to the
//! vendor's connected account when one exists. Amounts are converted to
//! cents at this boundary; everything upstream works in dollars.

use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::config::StripeConfig;

const CHECKOUT_SESSIONS_URL: &str = "https://api.stripe.com/v1/checkout/sessions";

/// Errors from creating a checkout session.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Card checkout is not configured")]
    NotConfigured,

    #[error("Checkout request failed: {0}")]
    RequestFailed(String),

    #[error("Stripe error: {0}")]
    Stripe(String),
}

/// A created checkout session the client should redirect to.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    error: StripeErrorDetail,
}

#[derive(Debug, Deserialize)]
struct StripeErrorDetail {
    message: String,
}

/// Thin client over the Stripe checkout-session API.
#[derive(Clone)]
pub struct CheckoutService {
    config: Arc<StripeConfig>,
    client: reqwest::Client,
}

impl CheckoutService {
    pub fn new(config: StripeConfig) -> Self {
        Self {
            config: Arc::new(config),
            client: reqwest::Client::new(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    /// Converts a dollar amount to cents for the wire.
    pub fn to_cents(amount: f64) -> i64 {
        (amount * 100.0).round() as i64
    }

    /// Creates a checkout session for a card tip.
    ///
    /// When the vendor has a connected account, the session carries a
    /// destination transfer and the platform application fee. Without one
    /// the payment settles to the platform account for manual payout.
    pub async fn create_tip_session(
        &self,
        vendor_name: &str,
        amount: f64,
        destination_account: Option<&str>,
        success_url: &str,
        cancel_url: &str,
    ) -> Result<CheckoutSession, CheckoutError> {
        if !self.is_configured() {
            return Err(CheckoutError::NotConfigured);
        }

        let amount_cents = Self::to_cents(amount);
        let application_fee_cents =
            amount_cents * i64::from(self.config.application_fee_percent) / 100;
        let product_name = format!("Tip for {}", vendor_name);

        let mut form: Vec<(String, String)> = vec![
            ("mode".into(), "payment".into()),
            ("success_url".into(), success_url.into()),
            ("cancel_url".into(), cancel_url.into()),
            ("line_items[0][quantity]".into(), "1".into()),
            (
                "line_items[0][price_data][currency]".into(),
                "usd".into(),
            ),
            (
                "line_items[0][price_data][unit_amount]".into(),
                amount_cents.to_string(),
            ),
            (
                "line_items[0][price_data][product_data][name]".into(),
                product_name,
            ),
        ];

        if let Some(account) = destination_account {
            form.push((
                "payment_intent_data[transfer_data][destination]".into(),
                account.into(),
            ));
            form.push((
                "payment_intent_data[application_fee_amount]".into(),
                application_fee_cents.to_string(),
            ));
        }

        let response = self
            .client
            .post(CHECKOUT_SESSIONS_URL)
            .bearer_auth(&self.config.secret_key)
            .form(&form)
            .send()
            .await
            .map_err(|e| CheckoutError::RequestFailed(e.to_string()))?;

        if response.status().is_success() {
            let session: CheckoutSession = response
                .json()
                .await
                .map_err(|e| CheckoutError::RequestFailed(e.to_string()))?;
            info!(session_id = %session.id, amount_cents, "Checkout session created");
            Ok(session)
        } else {
            let status = response.status();
            let message = response
                .json::<StripeErrorBody>()
                .await
                .map(|b| b.error.message)
                .unwrap_or_else(|_| format!("HTTP {}", status));
            Err(CheckoutError::Stripe(message))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_cents_rounds() {
        assert_eq!(CheckoutService::to_cents(40.0), 4000);
        assert_eq!(CheckoutService::to_cents(25.5), 2550);
        assert_eq!(CheckoutService::to_cents(0.004), 0);
    }

    #[tokio::test]
    async fn test_unconfigured_service_refuses() {
        let service = CheckoutService::new(StripeConfig::default());
        let result = service
            .create_tip_session(
                "Golden Hour Photo",
                40.0,
                Some("acct_123"),
                "https://tipwedding.example/success",
                "https://tipwedding.example/cancel",
            )
            .await;
        assert!(matches!(result, Err(CheckoutError::NotConfigured)));
    }
}

//! Email service for invitation delivery.
//!
//! Supported providers:
//! - `console`: logs emails instead of sending (development)
//! - `resend`: sends via the Resend HTTP API
//!
//! Delivery failures are surfaced to the caller but are never meant to roll
//! back the operation that triggered the email; an invitation whose email
//! bounced still exists and can be re-sent.

use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::config::EmailConfig;

/// Errors that can occur during email operations.
#[derive(Debug, Error)]
pub enum EmailError {
    #[error("Email service not configured")]
    NotConfigured,

    #[error("Failed to send email: {0}")]
    SendFailed(String),

    #[error("Provider error: {0}")]
    ProviderError(String),
}

/// Email message to be sent.
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body_text: String,
    pub body_html: String,
}

/// Email service for sending transactional emails.
#[derive(Clone)]
pub struct EmailService {
    config: Arc<EmailConfig>,
    client: reqwest::Client,
}

impl EmailService {
    /// Creates a new EmailService with the given configuration.
    pub fn new(config: EmailConfig) -> Self {
        Self {
            config: Arc::new(config),
            client: reqwest::Client::new(),
        }
    }

    /// Check if email sending is enabled.
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Send an email message.
    pub async fn send(&self, message: EmailMessage) -> Result<(), EmailError> {
        if !self.config.enabled {
            debug!(
                to = %message.to,
                subject = %message.subject,
                "Email service disabled, skipping send"
            );
            return Ok(());
        }

        match self.config.provider.as_str() {
            "console" => self.send_console(message),
            "resend" => self.send_resend(message).await,
            provider => {
                error!(provider = %provider, "Unknown email provider");
                Err(EmailError::NotConfigured)
            }
        }
    }

    /// Send a vendor invitation email with the registration link.
    pub async fn send_vendor_invitation(
        &self,
        to_email: &str,
        vendor_name: &str,
        coordinator_name: &str,
        couple_name: &str,
        personal_message: Option<&str>,
        invite_url: &str,
    ) -> Result<(), EmailError> {
        let subject = format!("{} invited you to join TipWedding", coordinator_name);

        let message_block = personal_message
            .map(|m| format!("\n\"{}\"\n", m))
            .unwrap_or_default();

        let body_text = format!(
            r#"Hi {vendor_name},

{coordinator_name} has invited you to join TipWedding as a vendor for {couple_name}'s wedding.
{message_block}
TipWedding lets couples and guests send you tips digitally. Complete your profile to get started:

{invite_url}

This invitation expires in 7 days.

Best regards,
The TipWedding Team"#
        );

        let html_message_block = personal_message
            .map(|m| format!(r#"<blockquote style="color: #555; border-left: 3px solid #e8b4b8; padding-left: 12px; margin: 16px 0;">{}</blockquote>"#, m))
            .unwrap_or_default();

        let body_html = format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>You're invited to TipWedding</title>
</head>
<body style="font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Helvetica, Arial, sans-serif; line-height: 1.6; color: #333; max-width: 600px; margin: 0 auto; padding: 20px;">
    <div style="background: linear-gradient(135deg, #e8b4b8 0%, #a57c82 100%); padding: 30px; border-radius: 10px 10px 0 0;">
        <h1 style="color: white; margin: 0; font-size: 24px;">TipWedding</h1>
    </div>
    <div style="background: #f9f9f9; padding: 30px; border-radius: 0 0 10px 10px;">
        <h2 style="color: #333; margin-top: 0;">You're invited</h2>
        <p>Hi {vendor_name},</p>
        <p>{coordinator_name} has invited you to join TipWedding as a vendor for <strong>{couple_name}</strong>'s wedding.</p>
        {html_message_block}
        <p>TipWedding lets couples and guests send you tips digitally. Complete your profile to get started:</p>
        <div style="text-align: center; margin: 30px 0;">
            <a href="{invite_url}" style="background: linear-gradient(135deg, #e8b4b8 0%, #a57c82 100%); color: white; padding: 14px 28px; text-decoration: none; border-radius: 6px; font-weight: bold; display: inline-block;">Complete Your Profile</a>
        </div>
        <p style="color: #666; font-size: 14px;">This invitation expires in 7 days.</p>
        <hr style="border: none; border-top: 1px solid #ddd; margin: 30px 0;">
        <p style="color: #999; font-size: 12px;">Or copy and paste this link into your browser:<br><a href="{invite_url}" style="color: #a57c82;">{invite_url}</a></p>
    </div>
</body>
</html>"#
        );

        self.send(EmailMessage {
            to: to_email.to_string(),
            subject,
            body_text,
            body_html,
        })
        .await
    }

    fn send_console(&self, message: EmailMessage) -> Result<(), EmailError> {
        info!(
            to = %message.to,
            subject = %message.subject,
            body = %message.body_text,
            "Email (console provider)"
        );
        Ok(())
    }

    async fn send_resend(&self, message: EmailMessage) -> Result<(), EmailError> {
        let payload = json!({
            "from": format!("{} <{}>", self.config.sender_name, self.config.sender_email),
            "to": [message.to],
            "subject": message.subject,
            "text": message.body_text,
            "html": message.body_html,
        });

        let response = self
            .client
            .post("https://api.resend.com/emails")
            .bearer_auth(&self.config.resend_api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| EmailError::SendFailed(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(EmailError::ProviderError(format!(
                "Resend returned {}: {}",
                status, body
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(enabled: bool, provider: &str) -> EmailService {
        EmailService::new(EmailConfig {
            enabled,
            provider: provider.to_string(),
            resend_api_key: String::new(),
            sender_email: "noreply@tipwedding.app".to_string(),
            sender_name: "TipWedding".to_string(),
        })
    }

    #[tokio::test]
    async fn test_disabled_service_skips_send() {
        let service = service(false, "resend");
        let result = service
            .send_vendor_invitation(
                "vendor@example.com",
                "Golden Hour Photo",
                "Casey Park",
                "Sarah & James",
                None,
                "https://tipwedding.example/vendor/register/abc",
            )
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_console_provider_succeeds() {
        let service = service(true, "console");
        let result = service
            .send_vendor_invitation(
                "vendor@example.com",
                "Golden Hour Photo",
                "Casey Park",
                "Sarah & James",
                Some("Would love to work with you again."),
                "https://tipwedding.example/vendor/register/abc",
            )
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_unknown_provider_errors() {
        let service = service(true, "pigeon");
        let result = service
            .send(EmailMessage {
                to: "vendor@example.com".to_string(),
                subject: "test".to_string(),
                body_text: "test".to_string(),
                body_html: "<p>test</p>".to_string(),
            })
            .await;
        assert!(matches!(result, Err(EmailError::NotConfigured)));
    }
}

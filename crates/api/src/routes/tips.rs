//! Tip routes: recommendations, etiquette, checkout, and recording.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use domain::models::payment::PaymentChannel;
use domain::models::tip::{RecordTipRequest, Tip, TipRecommendation};
use domain::models::vendor::VendorRole;
use domain::services::{payment_methods, tip_recommendation};
use persistence::entities::{PaymentChannelDb, TipStatusDb};
use persistence::repositories::{TipRepository, VendorRepository, WeddingRepository};
use serde::{Deserialize, Serialize};
use shared::validation::validate_tip_amount;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::services::checkout::CheckoutError;

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub role: Option<String>,
    pub hours: Option<f64>,
    pub rate: Option<f64>,
    pub custom: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RecommendationResponse {
    pub role: VendorRole,
    pub recommendation: TipRecommendation,
    pub etiquette: Vec<String>,
}

/// Request to start a tip payment on the public couple page.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CheckoutTipRequest {
    pub wedding_id: Uuid,
    pub vendor_id: Uuid,

    #[validate(custom(function = "validate_tip_amount"))]
    pub amount: f64,

    #[validate(length(max = 100, message = "Guest name must be at most 100 characters"))]
    pub guest_name: Option<String>,

    #[validate(length(max = 500, message = "Message must be at most 500 characters"))]
    pub message: Option<String>,
}

/// How the guest should complete the tip: card checkout redirect, or
/// direct-payment instructions for a P2P rail.
#[derive(Debug, Serialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum CheckoutTipResponse {
    Card {
        checkout_url: String,
        session_id: String,
        tip: Tip,
    },
    DirectPayment {
        channel: PaymentChannel,
        label: String,
        handle: String,
        tip: Tip,
    },
}

/// Parse a role string leniently: unknown or missing roles fall back to
/// `Coordinator` so the calculator always answers.
fn role_or_default(raw: Option<&str>) -> VendorRole {
    raw.and_then(VendorRole::parse)
        .unwrap_or(VendorRole::Coordinator)
}

/// Tip recommendation for a role with optional engagement figures.
///
/// GET /api/v1/tips/recommendations?role=...&hours=...&rate=...&custom=...
pub async fn recommendations(
    Query(query): Query<RecommendationQuery>,
) -> Json<RecommendationResponse> {
    let role = role_or_default(query.role.as_deref());
    let recommendation =
        tip_recommendation::recommend(role, query.hours, query.rate, query.custom);

    Json(RecommendationResponse {
        role,
        recommendation,
        etiquette: tip_recommendation::etiquette(role)
            .iter()
            .map(|s| s.to_string())
            .collect(),
    })
}

/// Tipping etiquette copy for a role.
///
/// GET /api/v1/tips/etiquette/:role
pub async fn etiquette(Path(role): Path<String>) -> Json<Vec<String>> {
    let role = role_or_default(Some(&role));
    Json(
        tip_recommendation::etiquette(role)
            .iter()
            .map(|s| s.to_string())
            .collect(),
    )
}

/// Start a tip payment.
///
/// POST /api/v1/tips/checkout
///
/// Resolves the vendor's preferred payment rail. Card tips get a Stripe
/// checkout session; P2P rails get the vendor's handle for the guest to pay
/// directly. A vendor with no usable channel is refused.
pub async fn checkout_tip(
    State(state): State<AppState>,
    Json(request): Json<CheckoutTipRequest>,
) -> Result<(StatusCode, Json<CheckoutTipResponse>), ApiError> {
    request.validate()?;

    let wedding_repo = WeddingRepository::new(state.pool.clone());
    let vendor_repo = VendorRepository::new(state.pool.clone());
    let tip_repo = TipRepository::new(state.pool.clone());

    let wedding = wedding_repo
        .find_by_id(request.wedding_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Wedding not found".to_string()))?;

    let vendor = vendor_repo
        .find_by_id(request.vendor_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Vendor not found".to_string()))?;

    let settings = vendor.channel_settings();
    let preferred = payment_methods::resolve_preferred(&settings);

    // Card checkout also covers Stripe-enabled vendors without a connected
    // payout account; the platform settles manually in that case.
    let card_fallback =
        preferred.is_none() && payment_methods::accepts_card_checkout(&settings);

    let channel = match preferred {
        Some(channel) => channel,
        None if card_fallback => PaymentChannel::Stripe,
        None => {
            return Err(ApiError::Validation(
                "This vendor has no usable payment channel".to_string(),
            ))
        }
    };

    match channel {
        PaymentChannel::Stripe => {
            if !state.checkout.is_configured() {
                return Err(ApiError::ServiceUnavailable(
                    "Card checkout is not available".to_string(),
                ));
            }

            let success_url = format!(
                "{}/couple/{}?tip=success",
                state.config.app.base_url, wedding.slug
            );
            let cancel_url = format!(
                "{}/couple/{}?tip=cancelled",
                state.config.app.base_url, wedding.slug
            );

            let session = state
                .checkout
                .create_tip_session(
                    &vendor.name,
                    request.amount,
                    settings.stripe_account_id.as_deref(),
                    &success_url,
                    &cancel_url,
                )
                .await
                .map_err(|err| match err {
                    CheckoutError::NotConfigured => {
                        ApiError::ServiceUnavailable("Card checkout is not available".to_string())
                    }
                    other => ApiError::ServiceUnavailable(other.to_string()),
                })?;

            let tip = tip_repo
                .record(
                    request.wedding_id,
                    request.vendor_id,
                    request.amount,
                    PaymentChannelDb::Stripe,
                    TipStatusDb::Pending,
                    request.guest_name.as_deref(),
                    request.message.as_deref(),
                )
                .await?;

            info!(tip_id = %tip.id, session_id = %session.id, "Card tip checkout started");

            Ok((
                StatusCode::CREATED,
                Json(CheckoutTipResponse::Card {
                    checkout_url: session.url,
                    session_id: session.id,
                    tip: tip.into(),
                }),
            ))
        }
        p2p => {
            let handle = settings
                .credential(p2p)
                .map(str::to_string)
                .ok_or_else(|| {
                    ApiError::Internal("Resolved channel lost its credential".to_string())
                })?;

            let tip = tip_repo
                .record(
                    request.wedding_id,
                    request.vendor_id,
                    request.amount,
                    PaymentChannelDb::from(p2p),
                    TipStatusDb::Pending,
                    request.guest_name.as_deref(),
                    request.message.as_deref(),
                )
                .await?;

            info!(tip_id = %tip.id, channel = %p2p, "Direct-payment tip initiated");

            Ok((
                StatusCode::CREATED,
                Json(CheckoutTipResponse::DirectPayment {
                    channel: p2p,
                    label: p2p.label().to_string(),
                    handle,
                    tip: tip.into(),
                }),
            ))
        }
    }
}

/// Record a completed tip.
///
/// POST /api/v1/tips
///
/// Used when the guest confirms a direct payment went through; card tips
/// are settled by checkout instead.
pub async fn record_tip(
    State(state): State<AppState>,
    Json(request): Json<RecordTipRequest>,
) -> Result<(StatusCode, Json<Tip>), ApiError> {
    request.validate()?;

    let vendor_repo = VendorRepository::new(state.pool.clone());
    if vendor_repo.find_by_id(request.vendor_id).await?.is_none() {
        return Err(ApiError::NotFound("Vendor not found".to_string()));
    }

    let tip_repo = TipRepository::new(state.pool.clone());
    let tip = tip_repo
        .record(
            request.wedding_id,
            request.vendor_id,
            request.amount,
            PaymentChannelDb::from(request.payment_method),
            TipStatusDb::Completed,
            request.guest_name.as_deref(),
            request.message.as_deref(),
        )
        .await?;

    info!(tip_id = %tip.id, amount = tip.amount, "Tip recorded");

    Ok((StatusCode::CREATED, Json(tip.into())))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct WeddingTipsResponse {
    pub data: Vec<Tip>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct VendorTipsResponse {
    pub data: Vec<Tip>,
    /// Sum of COMPLETED tips, in dollars.
    pub completed_total: f64,
}

/// List tips given at a wedding, newest first.
///
/// GET /api/v1/weddings/:wedding_id/tips
pub async fn list_wedding_tips(
    State(state): State<AppState>,
    Path(wedding_id): Path<Uuid>,
) -> Result<Json<WeddingTipsResponse>, ApiError> {
    let wedding_repo = WeddingRepository::new(state.pool.clone());
    if wedding_repo.find_by_id(wedding_id).await?.is_none() {
        return Err(ApiError::NotFound("Wedding not found".to_string()));
    }

    let tip_repo = TipRepository::new(state.pool.clone());
    let tips = tip_repo.list_by_wedding(wedding_id).await?;

    Ok(Json(WeddingTipsResponse {
        data: tips.into_iter().map(Into::into).collect(),
    }))
}

/// A vendor's tip history with their completed total.
///
/// GET /api/v1/vendors/:vendor_id/tips
pub async fn list_vendor_tips(
    State(state): State<AppState>,
    Path(vendor_id): Path<Uuid>,
) -> Result<Json<VendorTipsResponse>, ApiError> {
    let vendor_repo = VendorRepository::new(state.pool.clone());
    if vendor_repo.find_by_id(vendor_id).await?.is_none() {
        return Err(ApiError::NotFound("Vendor not found".to_string()));
    }

    let tip_repo = TipRepository::new(state.pool.clone());
    let tips = tip_repo.list_by_vendor(vendor_id).await?;
    let completed_total = tip_repo.completed_total_for_vendor(vendor_id).await?;

    Ok(Json(VendorTipsResponse {
        data: tips.into_iter().map(Into::into).collect(),
        completed_total,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_fallback_to_coordinator() {
        assert_eq!(role_or_default(None), VendorRole::Coordinator);
        assert_eq!(role_or_default(Some("dj")), VendorRole::Coordinator);
        assert_eq!(role_or_default(Some("OFFICIANT")), VendorRole::Officiant);
    }

    #[test]
    fn test_checkout_request_rejects_bad_amount() {
        let request = CheckoutTipRequest {
            wedding_id: Uuid::new_v4(),
            vendor_id: Uuid::new_v4(),
            amount: -5.0,
            guest_name: None,
            message: None,
        };
        assert!(request.validate().is_err());
    }
}

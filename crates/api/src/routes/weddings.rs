//! Wedding routes, including the public couple page.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use domain::models::payment::{PaymentChannel, PaymentOption};
use domain::models::tip::TipRecommendation;
use domain::models::vendor::VendorRole;
use domain::models::wedding::{CreateWeddingRequest, Wedding};
use domain::services::{payment_methods, tip_recommendation};
use persistence::repositories::{VendorRepository, WeddingRepository, WeddingVendorRepository};
use serde::{Deserialize, Serialize};
use shared::slug::generate_wedding_slug;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct ListWeddingsQuery {
    pub coordinator_id: Uuid,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListWeddingsResponse {
    pub data: Vec<Wedding>,
}

/// One vendor on the public couple page: identity, tipping suggestion, and
/// the payment rails a guest can actually use.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CouplePageVendor {
    pub vendor_id: Uuid,
    pub name: String,
    pub role: VendorRole,
    pub bio: Option<String>,
    pub recommendation: TipRecommendation,
    pub etiquette: Vec<String>,
    pub preferred_channel: Option<PaymentChannel>,
    pub payment_options: Vec<PaymentOption>,
    /// Card tips possible even without a listed payout channel.
    pub accepts_card_checkout: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CouplePageResponse {
    pub couple_name: String,
    pub wedding_date: chrono::DateTime<chrono::Utc>,
    pub venue: Option<String>,
    pub vendors: Vec<CouplePageVendor>,
}

/// Create a wedding.
///
/// POST /api/v1/weddings
pub async fn create_wedding(
    State(state): State<AppState>,
    Json(request): Json<CreateWeddingRequest>,
) -> Result<(StatusCode, Json<Wedding>), ApiError> {
    request.validate()?;

    let repo = WeddingRepository::new(state.pool.clone());
    let slug = generate_wedding_slug(&request.couple_name);

    let wedding = repo
        .create(
            &slug,
            &request.couple_name,
            request.wedding_date,
            request.venue.as_deref(),
            request.notes.as_deref(),
            request.coordinator_id,
        )
        .await?;

    info!(wedding_id = %wedding.id, slug = %wedding.slug, "Wedding created");

    Ok((StatusCode::CREATED, Json(wedding.into())))
}

/// List a coordinator's weddings.
///
/// GET /api/v1/weddings?coordinator_id=...
pub async fn list_weddings(
    State(state): State<AppState>,
    Query(query): Query<ListWeddingsQuery>,
) -> Result<Json<ListWeddingsResponse>, ApiError> {
    let repo = WeddingRepository::new(state.pool.clone());
    let weddings = repo.list_by_coordinator(query.coordinator_id).await?;

    Ok(Json(ListWeddingsResponse {
        data: weddings.into_iter().map(Into::into).collect(),
    }))
}

/// Get a wedding by id.
///
/// GET /api/v1/weddings/:wedding_id
pub async fn get_wedding(
    State(state): State<AppState>,
    Path(wedding_id): Path<Uuid>,
) -> Result<Json<Wedding>, ApiError> {
    let repo = WeddingRepository::new(state.pool.clone());
    let wedding = repo
        .find_by_id(wedding_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Wedding not found".to_string()))?;

    Ok(Json(wedding.into()))
}

/// Delete a wedding. Roster entries and tips cascade.
///
/// DELETE /api/v1/weddings/:wedding_id
pub async fn delete_wedding(
    State(state): State<AppState>,
    Path(wedding_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = WeddingRepository::new(state.pool.clone());
    if !repo.delete(wedding_id).await? {
        return Err(ApiError::NotFound("Wedding not found".to_string()));
    }

    info!(wedding_id = %wedding_id, "Wedding deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Public couple page: the wedding's roster with per-vendor tip
/// suggestions and usable payment channels.
///
/// GET /api/v1/couple/:slug
pub async fn couple_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<CouplePageResponse>, ApiError> {
    let wedding_repo = WeddingRepository::new(state.pool.clone());
    let roster_repo = WeddingVendorRepository::new(state.pool.clone());
    let vendor_repo = VendorRepository::new(state.pool.clone());

    let wedding = wedding_repo
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| ApiError::NotFound("Wedding not found".to_string()))?;

    let roster = roster_repo.list_by_wedding(wedding.id).await?;

    let mut vendors = Vec::with_capacity(roster.len());
    for engagement in roster {
        let Some(vendor) = vendor_repo.find_by_id(engagement.vendor_id).await? else {
            continue;
        };

        let role: VendorRole = vendor.role.into();
        let settings = vendor.channel_settings();
        let recommendation = tip_recommendation::recommend(
            role,
            engagement.service_hours,
            engagement.service_rate,
            engagement.custom_tip_amount,
        );

        vendors.push(CouplePageVendor {
            vendor_id: vendor.id,
            name: vendor.name.clone(),
            role,
            bio: vendor.bio.clone(),
            recommendation,
            etiquette: tip_recommendation::etiquette(role)
                .iter()
                .map(|s| s.to_string())
                .collect(),
            preferred_channel: payment_methods::resolve_preferred(&settings),
            payment_options: payment_methods::list_available(&settings),
            accepts_card_checkout: payment_methods::accepts_card_checkout(&settings),
        });
    }

    Ok(Json(CouplePageResponse {
        couple_name: wedding.couple_name,
        wedding_date: wedding.wedding_date,
        venue: wedding.venue,
        vendors,
    }))
}

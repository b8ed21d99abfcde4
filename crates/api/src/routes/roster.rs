//! Wedding roster routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::tip::TipRecommendation;
use domain::models::vendor::{Vendor, VendorRole};
use domain::models::wedding_vendor::{AddToRosterRequest, WeddingVendor};
use domain::services::tip_recommendation;
use persistence::repositories::{VendorRepository, WeddingRepository, WeddingVendorRepository};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;

/// A roster entry joined with its vendor and the resulting suggestion.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RosterEntry {
    pub engagement: WeddingVendor,
    pub vendor: Vendor,
    pub recommendation: TipRecommendation,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RosterResponse {
    pub data: Vec<RosterEntry>,
}

/// Add a vendor to a wedding's roster.
///
/// POST /api/v1/roster
pub async fn add_to_roster(
    State(state): State<AppState>,
    Json(request): Json<AddToRosterRequest>,
) -> Result<(StatusCode, Json<WeddingVendor>), ApiError> {
    request.validate()?;

    let wedding_repo = WeddingRepository::new(state.pool.clone());
    let vendor_repo = VendorRepository::new(state.pool.clone());
    let roster_repo = WeddingVendorRepository::new(state.pool.clone());

    if wedding_repo.find_by_id(request.wedding_id).await?.is_none() {
        return Err(ApiError::NotFound("Wedding not found".to_string()));
    }
    if vendor_repo.find_by_id(request.vendor_id).await?.is_none() {
        return Err(ApiError::NotFound("Vendor not found".to_string()));
    }

    let engagement = roster_repo.add(&request).await?;

    info!(
        wedding_id = %engagement.wedding_id,
        vendor_id = %engagement.vendor_id,
        "Vendor added to roster"
    );

    Ok((StatusCode::CREATED, Json(engagement.into())))
}

/// List a wedding's roster with vendor details and tip suggestions.
///
/// GET /api/v1/weddings/:wedding_id/roster
pub async fn list_roster(
    State(state): State<AppState>,
    Path(wedding_id): Path<Uuid>,
) -> Result<Json<RosterResponse>, ApiError> {
    let wedding_repo = WeddingRepository::new(state.pool.clone());
    let vendor_repo = VendorRepository::new(state.pool.clone());
    let roster_repo = WeddingVendorRepository::new(state.pool.clone());

    if wedding_repo.find_by_id(wedding_id).await?.is_none() {
        return Err(ApiError::NotFound("Wedding not found".to_string()));
    }

    let roster = roster_repo.list_by_wedding(wedding_id).await?;

    let mut entries = Vec::with_capacity(roster.len());
    for engagement in roster {
        let Some(vendor) = vendor_repo.find_by_id(engagement.vendor_id).await? else {
            continue;
        };

        let role: VendorRole = vendor.role.into();
        let recommendation = tip_recommendation::recommend(
            role,
            engagement.service_hours,
            engagement.service_rate,
            engagement.custom_tip_amount,
        );

        entries.push(RosterEntry {
            engagement: engagement.into(),
            vendor: vendor.into(),
            recommendation,
        });
    }

    Ok(Json(RosterResponse { data: entries }))
}

//! Vendor book routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use domain::models::vendor::{CreateVendorRequest, UpdateVendorRequest, Vendor, VendorRole};
use persistence::entities::VendorRoleDb;
use persistence::repositories::{VendorRemoval, VendorRepository};
use serde::{Deserialize, Serialize};
use shared::pagination::{PageInfo, PageParams};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct ListVendorsQuery {
    pub coordinator_id: Uuid,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct SearchVendorsQuery {
    pub q: Option<String>,
    pub role: Option<String>,
}

/// A vendor in the coordinator's book with engagement statistics.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct VendorSummary {
    #[serde(flatten)]
    pub vendor: Vendor,
    pub wedding_count: i64,
    pub completed_tip_count: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListVendorsResponse {
    pub data: Vec<VendorSummary>,
    pub pagination: PageInfo,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SearchVendorsResponse {
    pub data: Vec<Vendor>,
}

/// Outcome of a vendor removal: vendors with history are suspended, not
/// deleted, so past tips stay attributable.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RemoveVendorResponse {
    pub outcome: &'static str,
}

/// List the coordinator's vendor book with per-vendor statistics.
///
/// GET /api/v1/vendors?coordinator_id=...&page=...&per_page=...
pub async fn list_vendors(
    State(state): State<AppState>,
    Query(query): Query<ListVendorsQuery>,
) -> Result<Json<ListVendorsResponse>, ApiError> {
    let params = PageParams {
        page: query.page,
        per_page: query.per_page,
    };

    let repo = VendorRepository::new(state.pool.clone());
    let total = repo.count_for_coordinator(query.coordinator_id).await?;
    let vendors = repo
        .list_for_coordinator(query.coordinator_id, params.per_page(), params.offset())
        .await?;

    Ok(Json(ListVendorsResponse {
        data: vendors
            .into_iter()
            .map(|v| VendorSummary {
                wedding_count: v.wedding_count,
                completed_tip_count: v.completed_tip_count,
                vendor: v.vendor.into(),
            })
            .collect(),
        pagination: PageInfo::new(params.page(), params.per_page(), total),
    }))
}

/// Create a vendor directly in the coordinator's book.
///
/// POST /api/v1/vendors
pub async fn create_vendor(
    State(state): State<AppState>,
    Json(request): Json<CreateVendorRequest>,
) -> Result<(StatusCode, Json<Vendor>), ApiError> {
    request.validate()?;

    let repo = VendorRepository::new(state.pool.clone());

    if let Some(email) = &request.email {
        if repo.find_by_email(email).await?.is_some() {
            return Err(ApiError::Conflict(
                "A vendor with this email already exists".to_string(),
            ));
        }
    }

    let settings = request.channel_settings();
    let vendor = repo.create(&request, &settings).await?;

    info!(vendor_id = %vendor.id, role = ?vendor.role, "Vendor created");

    Ok((StatusCode::CREATED, Json(vendor.into())))
}

/// Search active, profile-complete vendors by text and role.
///
/// GET /api/v1/vendors/search?q=...&role=...
pub async fn search_vendors(
    State(state): State<AppState>,
    Query(query): Query<SearchVendorsQuery>,
) -> Result<Json<SearchVendorsResponse>, ApiError> {
    let role = match query.role.as_deref() {
        Some(raw) => Some(
            VendorRole::parse(raw)
                .map(VendorRoleDb::from)
                .ok_or_else(|| ApiError::Validation(format!("Unknown vendor role: {}", raw)))?,
        ),
        None => None,
    };

    let text = query.q.as_deref().map(str::trim).filter(|q| !q.is_empty());

    let repo = VendorRepository::new(state.pool.clone());
    let vendors = repo.search(text, role).await?;

    Ok(Json(SearchVendorsResponse {
        data: vendors.into_iter().map(Into::into).collect(),
    }))
}

/// Get a vendor by id.
///
/// GET /api/v1/vendors/:vendor_id
pub async fn get_vendor(
    State(state): State<AppState>,
    Path(vendor_id): Path<Uuid>,
) -> Result<Json<Vendor>, ApiError> {
    let repo = VendorRepository::new(state.pool.clone());
    let vendor = repo
        .find_by_id(vendor_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Vendor not found".to_string()))?;

    Ok(Json(vendor.into()))
}

/// Update a vendor. Absent fields keep their stored values.
///
/// PUT /api/v1/vendors/:vendor_id
pub async fn update_vendor(
    State(state): State<AppState>,
    Path(vendor_id): Path<Uuid>,
    Json(request): Json<UpdateVendorRequest>,
) -> Result<Json<Vendor>, ApiError> {
    request.validate()?;

    let repo = VendorRepository::new(state.pool.clone());

    if let Some(email) = &request.email {
        if let Some(other) = repo.find_by_email(email).await? {
            if other.id != vendor_id {
                return Err(ApiError::Conflict(
                    "A vendor with this email already exists".to_string(),
                ));
            }
        }
    }

    let vendor = repo
        .update(vendor_id, &request)
        .await?
        .ok_or_else(|| ApiError::NotFound("Vendor not found".to_string()))?;

    info!(vendor_id = %vendor.id, "Vendor updated");

    Ok(Json(vendor.into()))
}

/// Remove a vendor from the book.
///
/// DELETE /api/v1/vendors/:vendor_id
pub async fn remove_vendor(
    State(state): State<AppState>,
    Path(vendor_id): Path<Uuid>,
) -> Result<Json<RemoveVendorResponse>, ApiError> {
    let repo = VendorRepository::new(state.pool.clone());

    let removal = repo
        .remove(vendor_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Vendor not found".to_string()))?;

    let outcome = match removal {
        VendorRemoval::Suspended => "suspended",
        VendorRemoval::Deleted => "deleted",
    };

    info!(vendor_id = %vendor_id, outcome, "Vendor removed");

    Ok(Json(RemoveVendorResponse { outcome }))
}

//! Vendor invitation routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use domain::models::invitation::{
    CreateInvitationRequest, InvitationStatus, ListInvitationsQuery, VendorInvitation,
};
use domain::models::vendor::{RegisterVendorRequest, Vendor, VendorRole};
use domain::models::wedding_vendor::WeddingVendor;
use persistence::repositories::{
    CoordinatorRepository, InvitationOutcome, VendorInvitationRepository, WeddingRepository,
};
use serde::Serialize;
use tracing::{info, warn};
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;

/// Response to issuing an invitation. Issuing can short-circuit: inviting
/// an email that already belongs to an active vendor attaches that vendor
/// to the roster instead of sending anything.
#[derive(Debug, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum CreateInvitationResponse {
    InvitationSent {
        invitation: VendorInvitation,
        invite_url: String,
        /// False when the invitation exists but delivery failed; it can
        /// still be accepted through the link.
        email_sent: bool,
    },
    ExistingVendorAdded {
        vendor: Vendor,
        engagement: WeddingVendor,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListInvitationsResponse {
    pub data: Vec<VendorInvitation>,
}

/// What the registration page needs to render an invitation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct InvitationDetails {
    pub vendor_name: String,
    pub email: String,
    pub role: VendorRole,
    pub status: InvitationStatus,
    pub message: Option<String>,
    pub couple_name: Option<String>,
    pub coordinator_name: Option<String>,
    pub expires_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct AcceptInvitationResponse {
    pub invitation: VendorInvitation,
    pub vendor: Vendor,
}

/// Invite a vendor to a wedding.
///
/// POST /api/v1/invitations
pub async fn create_invitation(
    State(state): State<AppState>,
    Json(request): Json<CreateInvitationRequest>,
) -> Result<(StatusCode, Json<CreateInvitationResponse>), ApiError> {
    request.validate()?;

    let wedding_repo = WeddingRepository::new(state.pool.clone());
    let coordinator_repo = CoordinatorRepository::new(state.pool.clone());
    let invitation_repo = VendorInvitationRepository::new(state.pool.clone());

    let wedding = wedding_repo
        .find_by_id(request.wedding_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Wedding not found".to_string()))?;

    let coordinator = coordinator_repo
        .find_by_id(request.coordinator_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Coordinator not found".to_string()))?;

    match invitation_repo.create(&request).await? {
        InvitationOutcome::Sent(invitation) => {
            let invite_url = format!(
                "{}/vendor/register/{}",
                state.config.app.base_url, invitation.token
            );

            // Delivery failure does not invalidate the invitation; the
            // coordinator can share the link out of band.
            let email_sent = match state
                .email
                .send_vendor_invitation(
                    &invitation.email,
                    &invitation.vendor_name,
                    &coordinator.name,
                    &wedding.couple_name,
                    invitation.message.as_deref(),
                    &invite_url,
                )
                .await
            {
                Ok(()) => true,
                Err(err) => {
                    warn!(
                        invitation_id = %invitation.id,
                        error = %err,
                        "Invitation email delivery failed"
                    );
                    false
                }
            };

            info!(invitation_id = %invitation.id, wedding_id = %wedding.id, "Invitation sent");

            Ok((
                StatusCode::CREATED,
                Json(CreateInvitationResponse::InvitationSent {
                    invitation: invitation.into(),
                    invite_url,
                    email_sent,
                }),
            ))
        }
        InvitationOutcome::ExistingVendorAttached { vendor, engagement } => Ok((
            StatusCode::CREATED,
            Json(CreateInvitationResponse::ExistingVendorAdded {
                vendor: vendor.into(),
                engagement: engagement.into(),
            }),
        )),
    }
}

/// List a coordinator's invitations, newest first.
///
/// GET /api/v1/invitations?coordinator_id=...
pub async fn list_invitations(
    State(state): State<AppState>,
    Query(query): Query<ListInvitationsQuery>,
) -> Result<Json<ListInvitationsResponse>, ApiError> {
    let repo = VendorInvitationRepository::new(state.pool.clone());
    let invitations = repo.list_by_coordinator(query.coordinator_id).await?;

    Ok(Json(ListInvitationsResponse {
        data: invitations.into_iter().map(Into::into).collect(),
    }))
}

/// Fetch an invitation by token for the registration page.
///
/// GET /api/v1/invitations/:token
pub async fn get_invitation(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<InvitationDetails>, ApiError> {
    let invitation_repo = VendorInvitationRepository::new(state.pool.clone());
    let wedding_repo = WeddingRepository::new(state.pool.clone());
    let coordinator_repo = CoordinatorRepository::new(state.pool.clone());

    let invitation = invitation_repo
        .find_by_token(&token)
        .await?
        .ok_or_else(|| ApiError::NotFound("Invitation not found".to_string()))?;

    let couple_name = wedding_repo
        .find_by_id(invitation.wedding_id)
        .await?
        .map(|w| w.couple_name);
    let coordinator_name = coordinator_repo
        .find_by_id(invitation.coordinator_id)
        .await?
        .map(|c| c.name);

    Ok(Json(InvitationDetails {
        vendor_name: invitation.vendor_name.clone(),
        email: invitation.email.clone(),
        role: invitation.role.into(),
        status: invitation.derived_status(),
        message: invitation.message.clone(),
        couple_name,
        coordinator_name,
        expires_at: invitation.expires_at,
    }))
}

/// Accept an invitation, registering the vendor with the submitted profile.
///
/// POST /api/v1/invitations/:token/accept
pub async fn accept_invitation(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(profile): Json<RegisterVendorRequest>,
) -> Result<Json<AcceptInvitationResponse>, ApiError> {
    profile.validate()?;

    let repo = VendorInvitationRepository::new(state.pool.clone());
    let accepted = repo.accept(&token, &profile).await?;

    info!(
        invitation_id = %accepted.invitation.id,
        vendor_id = %accepted.vendor.id,
        "Invitation accepted, vendor registered"
    );

    Ok(Json(AcceptInvitationResponse {
        invitation: accepted.invitation.into(),
        vendor: accepted.vendor.into(),
    }))
}

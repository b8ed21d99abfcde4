//! Coordinator routes.

use axum::{extract::State, http::StatusCode, Json};
use domain::models::coordinator::{Coordinator, CoordinatorLoginRequest};
use persistence::repositories::CoordinatorRepository;
use serde::Serialize;
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LoginResponse {
    pub coordinator: Coordinator,
    /// Whether this login created the account.
    pub created: bool,
}

/// Log in a coordinator, creating the account on first login.
///
/// POST /api/v1/coordinators/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<CoordinatorLoginRequest>,
) -> Result<(StatusCode, Json<LoginResponse>), ApiError> {
    request.validate()?;

    let repo = CoordinatorRepository::new(state.pool.clone());

    if let Some(existing) = repo.find_by_email(&request.email).await? {
        info!(coordinator_id = %existing.id, "Coordinator logged in");
        return Ok((
            StatusCode::OK,
            Json(LoginResponse {
                coordinator: existing.into(),
                created: false,
            }),
        ));
    }

    let name = request.display_name();
    let created = repo
        .create(&request.email, &name, request.company.as_deref())
        .await?;

    info!(coordinator_id = %created.id, "Coordinator account created on first login");

    Ok((
        StatusCode::CREATED,
        Json(LoginResponse {
            coordinator: created.into(),
            created: true,
        }),
    ))
}

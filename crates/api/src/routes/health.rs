//! Health and probe endpoints.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use sqlx::PgPool;
use std::time::Instant;

use crate::app::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub database: DatabaseHealth,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DatabaseHealth {
    pub connected: bool,
    pub latency_ms: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct ProbeResponse {
    pub status: &'static str,
}

/// Round-trips the database and reports the latency when it answers.
async fn ping_database(pool: &PgPool) -> Option<u64> {
    let started = Instant::now();
    if sqlx::query("SELECT 1").execute(pool).await.is_ok() {
        Some(started.elapsed().as_millis() as u64)
    } else {
        None
    }
}

/// `GET /api/health` — version plus database connectivity and ping latency.
/// 503 when the database does not answer.
pub async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, StatusCode> {
    let latency_ms = ping_database(&state.pool).await;
    let connected = latency_ms.is_some();

    let response = HealthResponse {
        status: if connected { "healthy" } else { "unhealthy" },
        version: env!("CARGO_PKG_VERSION"),
        database: DatabaseHealth {
            connected,
            latency_ms,
        },
    };

    if connected {
        Ok(Json(response))
    } else {
        Err(StatusCode::SERVICE_UNAVAILABLE)
    }
}

/// `GET /api/health/live` — 200 while the process runs.
pub async fn live() -> Json<ProbeResponse> {
    Json(ProbeResponse { status: "ok" })
}

/// `GET /api/health/ready` — 200 once the database answers.
pub async fn ready(State(state): State<AppState>) -> Result<Json<ProbeResponse>, StatusCode> {
    match ping_database(&state.pool).await {
        Some(_) => Ok(Json(ProbeResponse { status: "ready" })),
        None => Err(StatusCode::SERVICE_UNAVAILABLE),
    }
}

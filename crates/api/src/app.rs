use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::routes::{coordinators, health, invitations, roster, tips, vendors, weddings};
use crate::services::checkout::CheckoutService;
use crate::services::email::EmailService;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub email: EmailService,
    pub checkout: CheckoutService,
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let email = EmailService::new(config.email.clone());
    let checkout = CheckoutService::new(config.stripe.clone());
    let config = Arc::new(config);

    let state = AppState {
        pool,
        config: config.clone(),
        email,
        checkout,
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Coordinator-facing routes
    let coordinator_routes = Router::new()
        .route("/api/v1/coordinators/login", post(coordinators::login))
        .route(
            "/api/v1/weddings",
            post(weddings::create_wedding).get(weddings::list_weddings),
        )
        .route(
            "/api/v1/weddings/:wedding_id",
            get(weddings::get_wedding).delete(weddings::delete_wedding),
        )
        .route("/api/v1/weddings/:wedding_id/roster", get(roster::list_roster))
        .route("/api/v1/weddings/:wedding_id/tips", get(tips::list_wedding_tips))
        .route("/api/v1/vendors/:vendor_id/tips", get(tips::list_vendor_tips))
        .route(
            "/api/v1/vendors",
            get(vendors::list_vendors).post(vendors::create_vendor),
        )
        .route("/api/v1/vendors/search", get(vendors::search_vendors))
        .route("/api/v1/vendors/:vendor_id", get(vendors::get_vendor))
        .route("/api/v1/vendors/:vendor_id", put(vendors::update_vendor))
        .route("/api/v1/vendors/:vendor_id", delete(vendors::remove_vendor))
        .route(
            "/api/v1/invitations",
            post(invitations::create_invitation).get(invitations::list_invitations),
        )
        .route("/api/v1/roster", post(roster::add_to_roster));

    // Public routes: the couple page, invitation registration, and tipping
    let public_routes = Router::new()
        .route("/api/v1/couple/:slug", get(weddings::couple_page))
        .route("/api/v1/invitations/:token", get(invitations::get_invitation))
        .route(
            "/api/v1/invitations/:token/accept",
            post(invitations::accept_invitation),
        )
        .route("/api/v1/tips/recommendations", get(tips::recommendations))
        .route("/api/v1/tips/etiquette/:role", get(tips::etiquette))
        .route("/api/v1/tips/checkout", post(tips::checkout_tip))
        .route("/api/v1/tips", post(tips::record_tip));

    let health_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live));

    Router::new()
        .merge(health_routes)
        .merge(coordinator_routes)
        .merge(public_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

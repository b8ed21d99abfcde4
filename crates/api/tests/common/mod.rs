//! Common utilities for integration tests.
//!
//! These tests run against a real PostgreSQL instance. Set the
//! `TEST_DATABASE_URL` environment variable to enable them; without it
//! every test returns early, so the suite still passes on machines with
//! no database.

// Shared across test binaries; not every binary uses every helper.
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request},
    Router,
};
use fake::{faker::name::en::Name, Fake};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use tip_wedding_api::app::create_app;
use tip_wedding_api::config::{
    AppConfig, Config, EmailConfig, LoggingConfig, SecurityConfig, ServerConfig, StripeConfig,
};
use uuid::Uuid;

/// Connect to the test database, or `None` when `TEST_DATABASE_URL` is
/// not set.
pub async fn try_test_pool() -> Option<PgPool> {
    let database_url = std::env::var("TEST_DATABASE_URL").ok()?;

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(30))
        .connect(&database_url)
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!("../persistence/src/migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations on test database");

    Some(pool)
}

pub fn test_config(pool_url: &str) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            request_timeout_secs: 30,
        },
        database: persistence::db::DatabaseConfig {
            url: pool_url.to_string(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout_secs: 10,
            idle_timeout_secs: 600,
        },
        logging: LoggingConfig {
            level: "warn".to_string(),
            format: "pretty".to_string(),
        },
        security: SecurityConfig::default(),
        app: AppConfig {
            base_url: "https://tipwedding.test".to_string(),
        },
        email: EmailConfig::default(),
        stripe: StripeConfig::default(),
    }
}

pub fn create_test_app(pool: PgPool) -> Router {
    create_app(test_config("postgres://unused"), pool)
}

/// Unique email under the integration-test domain.
pub fn unique_email(prefix: &str) -> String {
    format!(
        "{}-{}@it.tipwedding.test",
        prefix,
        &Uuid::new_v4().simple().to_string()[..8]
    )
}

pub fn json_request(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn parse_response_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    serde_json::from_slice(&bytes).expect("Response body is not valid JSON")
}

/// Insert a coordinator directly.
pub async fn create_test_coordinator(pool: &PgPool) -> Uuid {
    let name: String = Name().fake();
    let (id,): (Uuid,) =
        sqlx::query_as("INSERT INTO coordinators (email, name) VALUES ($1, $2) RETURNING id")
            .bind(unique_email("coordinator"))
            .bind(&name)
            .fetch_one(pool)
            .await
            .expect("Failed to create test coordinator");
    id
}

/// Insert a wedding directly.
pub async fn create_test_wedding(pool: &PgPool, coordinator_id: Uuid) -> Uuid {
    let couple = format!("{} & {}", Name().fake::<String>(), Name().fake::<String>());
    let slug = format!("it-{}", &Uuid::new_v4().simple().to_string()[..12]);
    let (id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO weddings (slug, couple_name, wedding_date, coordinator_id)
        VALUES ($1, $2, NOW() + INTERVAL '30 days', $3)
        RETURNING id
        "#,
    )
    .bind(&slug)
    .bind(&couple)
    .bind(coordinator_id)
    .fetch_one(pool)
    .await
    .expect("Failed to create test wedding");
    id
}

/// Insert an ACTIVE, profile-complete vendor directly.
pub async fn create_active_vendor(pool: &PgPool, email: &str) -> Uuid {
    let name: String = Name().fake();
    let (id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO vendors
            (email, name, role, status, is_profile_complete, accepts_stripe, registered_at)
        VALUES ($1, $2, 'PHOTOGRAPHER'::vendor_role, 'ACTIVE'::vendor_status, TRUE, TRUE, NOW())
        RETURNING id
        "#,
    )
    .bind(email)
    .bind(&name)
    .fetch_one(pool)
    .await
    .expect("Failed to create test vendor");
    id
}

/// Insert a SENT invitation directly, returning its token. `expired`
/// backdates the expiry.
pub async fn insert_invitation(
    pool: &PgPool,
    wedding_id: Uuid,
    coordinator_id: Uuid,
    email: &str,
    expired: bool,
) -> String {
    let token = format!("it{}", Uuid::new_v4().simple());
    let query = if expired {
        r#"
        INSERT INTO vendor_invitations
            (token, email, vendor_name, role, wedding_id, coordinator_id, expires_at)
        VALUES ($1, $2, $3, 'PHOTOGRAPHER'::vendor_role, $4, $5, NOW() - INTERVAL '1 day')
        "#
    } else {
        r#"
        INSERT INTO vendor_invitations
            (token, email, vendor_name, role, wedding_id, coordinator_id, expires_at)
        VALUES ($1, $2, $3, 'PHOTOGRAPHER'::vendor_role, $4, $5, NOW() + INTERVAL '7 days')
        "#
    };
    let name: String = Name().fake();
    sqlx::query(query)
        .bind(&token)
        .bind(email)
        .bind(&name)
        .bind(wedding_id)
        .bind(coordinator_id)
        .execute(pool)
        .await
        .expect("Failed to create test invitation");
    token
}

/// Count invitations for an email, optionally restricted to SENT.
pub async fn count_invitations(pool: &PgPool, email: &str, sent_only: bool) -> i64 {
    let query = if sent_only {
        "SELECT COUNT(*) FROM vendor_invitations \
         WHERE LOWER(email) = LOWER($1) AND status = 'SENT'"
    } else {
        "SELECT COUNT(*) FROM vendor_invitations WHERE LOWER(email) = LOWER($1)"
    };
    let (count,): (i64,) = sqlx::query_as(query)
        .bind(email)
        .fetch_one(pool)
        .await
        .expect("Failed to count invitations");
    count
}

pub async fn count_vendors(pool: &PgPool, email: &str) -> i64 {
    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM vendors WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_one(pool)
            .await
            .expect("Failed to count vendors");
    count
}

pub async fn count_roster_rows(pool: &PgPool, wedding_id: Uuid) -> i64 {
    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM wedding_vendors WHERE wedding_id = $1")
            .bind(wedding_id)
            .fetch_one(pool)
            .await
            .expect("Failed to count roster rows");
    count
}

//! Repository for wedding roster (wedding-vendor engagement) operations.

use domain::models::wedding_vendor::AddToRosterRequest;
use sqlx::{PgConnection, PgPool};
use thiserror::Error;
use uuid::Uuid;

use crate::entities::WeddingVendorEntity;
use crate::metrics::QueryTimer;

const ENGAGEMENT_COLUMNS: &str = "id, wedding_id, vendor_id, service_hours, service_rate, \
     custom_tip_amount, notes, created_at";

/// Errors from roster operations.
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("vendor is already on this wedding's roster")]
    AlreadyOnRoster,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Inserts an engagement row if one does not already exist for the pair.
/// Runs on a caller-supplied connection so it can participate in a larger
/// transaction. Returns the row when a new engagement was created.
pub async fn ensure_engagement(
    conn: &mut PgConnection,
    wedding_id: Uuid,
    vendor_id: Uuid,
) -> Result<Option<WeddingVendorEntity>, sqlx::Error> {
    let query = format!(
        r#"
        INSERT INTO wedding_vendors (wedding_id, vendor_id)
        VALUES ($1, $2)
        ON CONFLICT (wedding_id, vendor_id) DO NOTHING
        RETURNING {ENGAGEMENT_COLUMNS}
        "#
    );
    sqlx::query_as::<_, WeddingVendorEntity>(&query)
        .bind(wedding_id)
        .bind(vendor_id)
        .fetch_optional(conn)
        .await
}

/// Repository for wedding roster operations.
#[derive(Clone)]
pub struct WeddingVendorRepository {
    pool: PgPool,
}

impl WeddingVendorRepository {
    /// Creates a new wedding roster repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Adds a vendor to a wedding's roster with engagement details.
    /// Duplicate additions are rejected rather than silently merged so the
    /// caller can report the conflict.
    pub async fn add(
        &self,
        request: &AddToRosterRequest,
    ) -> Result<WeddingVendorEntity, RosterError> {
        let timer = QueryTimer::new("add_to_roster");

        let mut tx = self.pool.begin().await.map_err(RosterError::Database)?;

        let existing: Option<(Uuid,)> = sqlx::query_as(
            "SELECT id FROM wedding_vendors WHERE wedding_id = $1 AND vendor_id = $2",
        )
        .bind(request.wedding_id)
        .bind(request.vendor_id)
        .fetch_optional(&mut *tx)
        .await?;
        if existing.is_some() {
            timer.record();
            return Err(RosterError::AlreadyOnRoster);
        }

        let query = format!(
            r#"
            INSERT INTO wedding_vendors (wedding_id, vendor_id, service_hours, service_rate,
                                         custom_tip_amount, notes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {ENGAGEMENT_COLUMNS}
            "#
        );
        let entity = sqlx::query_as::<_, WeddingVendorEntity>(&query)
            .bind(request.wedding_id)
            .bind(request.vendor_id)
            .bind(request.service_hours)
            .bind(request.service_rate)
            .bind(request.custom_tip_amount)
            .bind(&request.notes)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await.map_err(RosterError::Database)?;
        timer.record();
        Ok(entity)
    }

    /// Lists a wedding's roster in the order vendors were added.
    pub async fn list_by_wedding(
        &self,
        wedding_id: Uuid,
    ) -> Result<Vec<WeddingVendorEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_roster_by_wedding");
        let query = format!(
            r#"
            SELECT {ENGAGEMENT_COLUMNS}
            FROM wedding_vendors
            WHERE wedding_id = $1
            ORDER BY created_at ASC
            "#
        );
        let result = sqlx::query_as::<_, WeddingVendorEntity>(&query)
            .bind(wedding_id)
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result
    }
}

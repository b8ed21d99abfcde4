//! Repository for tip database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{PaymentChannelDb, TipEntity, TipStatusDb};
use crate::metrics::QueryTimer;

const TIP_COLUMNS: &str =
    "id, wedding_id, vendor_id, amount, payment_method, status, guest_name, message, created_at";

/// Repository for tip operations.
#[derive(Clone)]
pub struct TipRepository {
    pool: PgPool,
}

impl TipRepository {
    /// Creates a new tip repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Records a tip.
    #[allow(clippy::too_many_arguments)]
    pub async fn record(
        &self,
        wedding_id: Uuid,
        vendor_id: Uuid,
        amount: f64,
        payment_method: PaymentChannelDb,
        status: TipStatusDb,
        guest_name: Option<&str>,
        message: Option<&str>,
    ) -> Result<TipEntity, sqlx::Error> {
        let timer = QueryTimer::new("record_tip");
        let query = format!(
            r#"
            INSERT INTO tips (wedding_id, vendor_id, amount, payment_method, status,
                              guest_name, message)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {TIP_COLUMNS}
            "#
        );
        let result = sqlx::query_as::<_, TipEntity>(&query)
            .bind(wedding_id)
            .bind(vendor_id)
            .bind(amount)
            .bind(payment_method)
            .bind(status)
            .bind(guest_name)
            .bind(message)
            .fetch_one(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Lists tips for a vendor, newest first.
    pub async fn list_by_vendor(&self, vendor_id: Uuid) -> Result<Vec<TipEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_tips_by_vendor");
        let query = format!(
            "SELECT {TIP_COLUMNS} FROM tips WHERE vendor_id = $1 ORDER BY created_at DESC"
        );
        let result = sqlx::query_as::<_, TipEntity>(&query)
            .bind(vendor_id)
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Lists tips for a wedding, newest first.
    pub async fn list_by_wedding(&self, wedding_id: Uuid) -> Result<Vec<TipEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_tips_by_wedding");
        let query = format!(
            "SELECT {TIP_COLUMNS} FROM tips WHERE wedding_id = $1 ORDER BY created_at DESC"
        );
        let result = sqlx::query_as::<_, TipEntity>(&query)
            .bind(wedding_id)
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Sum of completed tips received by a vendor.
    pub async fn completed_total_for_vendor(&self, vendor_id: Uuid) -> Result<f64, sqlx::Error> {
        let timer = QueryTimer::new("completed_tip_total");
        let (total,): (f64,) = sqlx::query_as(
            r#"
            SELECT COALESCE(SUM(amount), 0)::double precision
            FROM tips
            WHERE vendor_id = $1 AND status = 'COMPLETED'
            "#,
        )
        .bind(vendor_id)
        .fetch_one(&self.pool)
        .await?;
        timer.record();
        Ok(total)
    }
}

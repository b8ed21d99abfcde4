//! Repository for wedding database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::WeddingEntity;
use crate::metrics::QueryTimer;

/// Repository for wedding operations.
#[derive(Clone)]
pub struct WeddingRepository {
    pool: PgPool,
}

impl WeddingRepository {
    /// Creates a new wedding repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a wedding.
    pub async fn create(
        &self,
        slug: &str,
        couple_name: &str,
        wedding_date: DateTime<Utc>,
        venue: Option<&str>,
        notes: Option<&str>,
        coordinator_id: Uuid,
    ) -> Result<WeddingEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_wedding");
        let result = sqlx::query_as::<_, WeddingEntity>(
            r#"
            INSERT INTO weddings (slug, couple_name, wedding_date, venue, notes, coordinator_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, slug, couple_name, wedding_date, venue, notes, coordinator_id, created_at
            "#,
        )
        .bind(slug)
        .bind(couple_name)
        .bind(wedding_date)
        .bind(venue)
        .bind(notes)
        .bind(coordinator_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Finds a wedding by id.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<WeddingEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_wedding_by_id");
        let result = sqlx::query_as::<_, WeddingEntity>(
            r#"
            SELECT id, slug, couple_name, wedding_date, venue, notes, coordinator_id, created_at
            FROM weddings
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Finds a wedding by its public slug.
    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<WeddingEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_wedding_by_slug");
        let result = sqlx::query_as::<_, WeddingEntity>(
            r#"
            SELECT id, slug, couple_name, wedding_date, venue, notes, coordinator_id, created_at
            FROM weddings
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Lists a coordinator's weddings, most recent wedding date first.
    pub async fn list_by_coordinator(
        &self,
        coordinator_id: Uuid,
    ) -> Result<Vec<WeddingEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_weddings_by_coordinator");
        let result = sqlx::query_as::<_, WeddingEntity>(
            r#"
            SELECT id, slug, couple_name, wedding_date, venue, notes, coordinator_id, created_at
            FROM weddings
            WHERE coordinator_id = $1
            ORDER BY wedding_date DESC
            "#,
        )
        .bind(coordinator_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Deletes a wedding. Roster rows and tips cascade at the database
    /// level. Returns true if a wedding was deleted.
    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_wedding");
        let result = sqlx::query("DELETE FROM weddings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected() > 0)
    }
}

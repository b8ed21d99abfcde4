//! Repository for coordinator database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::CoordinatorEntity;
use crate::metrics::QueryTimer;

/// Repository for coordinator operations.
#[derive(Clone)]
pub struct CoordinatorRepository {
    pool: PgPool,
}

impl CoordinatorRepository {
    /// Creates a new coordinator repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Finds a coordinator by id.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<CoordinatorEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_coordinator_by_id");
        let result = sqlx::query_as::<_, CoordinatorEntity>(
            r#"
            SELECT id, email, name, company, phone, created_at
            FROM coordinators
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Finds a coordinator by email (case-insensitive).
    pub async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<CoordinatorEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_coordinator_by_email");
        let result = sqlx::query_as::<_, CoordinatorEntity>(
            r#"
            SELECT id, email, name, company, phone, created_at
            FROM coordinators
            WHERE LOWER(email) = LOWER($1)
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Creates a coordinator account.
    pub async fn create(
        &self,
        email: &str,
        name: &str,
        company: Option<&str>,
    ) -> Result<CoordinatorEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_coordinator");
        let result = sqlx::query_as::<_, CoordinatorEntity>(
            r#"
            INSERT INTO coordinators (email, name, company)
            VALUES ($1, $2, $3)
            RETURNING id, email, name, company, phone, created_at
            "#,
        )
        .bind(email)
        .bind(name)
        .bind(company)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }
}

//! Repository for vendor database operations.

use domain::models::payment::ChannelSettings;
use domain::models::vendor::{CreateVendorRequest, UpdateVendorRequest};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{VendorEntity, VendorRoleDb, VendorStatusDb, VendorWithStatsEntity};
use crate::metrics::QueryTimer;

/// All vendor columns, in entity order.
pub(crate) const VENDOR_COLUMNS: &str = "id, email, name, phone, role, status, bio, website, service_area, \
     is_profile_complete, accepts_stripe, accepts_venmo, accepts_cash_app, accepts_zelle, \
     stripe_account_id, venmo_handle, cash_app_handle, zelle_contact, invited_by, \
     registered_at, created_at";

/// Outcome of removing a vendor from a coordinator's book.
///
/// A vendor with roster or tip history is suspended rather than deleted to
/// keep historical tip records referentially intact; only history-free
/// vendors are hard-deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VendorRemoval {
    Suspended,
    Deleted,
}

/// Repository for vendor operations.
#[derive(Clone)]
pub struct VendorRepository {
    pool: PgPool,
}

impl VendorRepository {
    /// Creates a new vendor repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a vendor directly from a coordinator's book.
    /// Manually added vendors are immediately active and profile-complete.
    pub async fn create(
        &self,
        request: &CreateVendorRequest,
        settings: &ChannelSettings,
    ) -> Result<VendorEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_vendor");
        let query = format!(
            r#"
            INSERT INTO vendors (email, name, phone, role, status, website, service_area,
                                 is_profile_complete, accepts_stripe, accepts_venmo,
                                 accepts_cash_app, accepts_zelle, stripe_account_id,
                                 venmo_handle, cash_app_handle, zelle_contact,
                                 invited_by, registered_at)
            VALUES ($1, $2, $3, $4, 'ACTIVE', $5, $6, TRUE, $7, $8, $9, $10, $11, $12, $13, $14, $15, NOW())
            RETURNING {VENDOR_COLUMNS}
            "#
        );
        let result = sqlx::query_as::<_, VendorEntity>(&query)
            .bind(&request.email)
            .bind(&request.name)
            .bind(&request.phone)
            .bind(VendorRoleDb::from(request.role))
            .bind(&request.website)
            .bind(&request.service_area)
            .bind(settings.accepts_stripe)
            .bind(settings.accepts_venmo)
            .bind(settings.accepts_cash_app)
            .bind(settings.accepts_zelle)
            .bind(&settings.stripe_account_id)
            .bind(&settings.venmo_handle)
            .bind(&settings.cash_app_handle)
            .bind(&settings.zelle_contact)
            .bind(request.coordinator_id)
            .fetch_one(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Finds a vendor by id.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<VendorEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_vendor_by_id");
        let query = format!("SELECT {VENDOR_COLUMNS} FROM vendors WHERE id = $1");
        let result = sqlx::query_as::<_, VendorEntity>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Finds a vendor by email (case-insensitive).
    pub async fn find_by_email(&self, email: &str) -> Result<Option<VendorEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_vendor_by_email");
        let query =
            format!("SELECT {VENDOR_COLUMNS} FROM vendors WHERE LOWER(email) = LOWER($1)");
        let result = sqlx::query_as::<_, VendorEntity>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Lists the vendors in a coordinator's book: vendors they brought onto
    /// the platform plus vendors who have worked their weddings, with
    /// engagement statistics. Ordered by name.
    pub async fn list_for_coordinator(
        &self,
        coordinator_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<VendorWithStatsEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_vendors_for_coordinator");
        let query = format!(
            r#"
            SELECT {VENDOR_COLUMNS},
                   (SELECT COUNT(*) FROM wedding_vendors wv WHERE wv.vendor_id = vendors.id)
                       AS wedding_count,
                   (SELECT COUNT(*) FROM tips t
                     WHERE t.vendor_id = vendors.id AND t.status = 'COMPLETED')
                       AS completed_tip_count
            FROM vendors
            WHERE invited_by = $1
               OR EXISTS (
                   SELECT 1
                   FROM wedding_vendors wv
                   JOIN weddings w ON w.id = wv.wedding_id
                   WHERE wv.vendor_id = vendors.id AND w.coordinator_id = $1
               )
            ORDER BY name ASC
            LIMIT $2 OFFSET $3
            "#
        );
        let result = sqlx::query_as::<_, VendorWithStatsEntity>(&query)
            .bind(coordinator_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Counts the vendors in a coordinator's book.
    pub async fn count_for_coordinator(&self, coordinator_id: Uuid) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_vendors_for_coordinator");
        let result: Result<(i64,), sqlx::Error> = sqlx::query_as(
            r#"
            SELECT COUNT(*)
            FROM vendors
            WHERE invited_by = $1
               OR EXISTS (
                   SELECT 1
                   FROM wedding_vendors wv
                   JOIN weddings w ON w.id = wv.wedding_id
                   WHERE wv.vendor_id = vendors.id AND w.coordinator_id = $1
               )
            "#,
        )
        .bind(coordinator_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result.map(|(count,)| count)
    }

    /// Searches active, profile-complete vendors by free text and optional
    /// role filter.
    pub async fn search(
        &self,
        text: Option<&str>,
        role: Option<VendorRoleDb>,
    ) -> Result<Vec<VendorEntity>, sqlx::Error> {
        let timer = QueryTimer::new("search_vendors");
        let query = format!(
            r#"
            SELECT {VENDOR_COLUMNS}
            FROM vendors
            WHERE status = 'ACTIVE'
              AND is_profile_complete = TRUE
              AND ($1::text IS NULL
                   OR name ILIKE '%' || $1 || '%'
                   OR email ILIKE '%' || $1 || '%'
                   OR service_area ILIKE '%' || $1 || '%')
              AND ($2::vendor_role IS NULL OR role = $2)
            ORDER BY name ASC
            "#
        );
        let result = sqlx::query_as::<_, VendorEntity>(&query)
            .bind(text)
            .bind(role)
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Updates a vendor. Absent fields keep their stored values.
    pub async fn update(
        &self,
        id: Uuid,
        request: &UpdateVendorRequest,
    ) -> Result<Option<VendorEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_vendor");
        let query = format!(
            r#"
            UPDATE vendors
            SET name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                role = COALESCE($5, role),
                bio = COALESCE($6, bio),
                website = COALESCE($7, website),
                service_area = COALESCE($8, service_area),
                status = COALESCE($9, status),
                accepts_stripe = COALESCE($10, accepts_stripe),
                accepts_venmo = COALESCE($11, accepts_venmo),
                accepts_cash_app = COALESCE($12, accepts_cash_app),
                accepts_zelle = COALESCE($13, accepts_zelle),
                stripe_account_id = COALESCE($14, stripe_account_id),
                venmo_handle = COALESCE($15, venmo_handle),
                cash_app_handle = COALESCE($16, cash_app_handle),
                zelle_contact = COALESCE($17, zelle_contact)
            WHERE id = $1
            RETURNING {VENDOR_COLUMNS}
            "#
        );
        let result = sqlx::query_as::<_, VendorEntity>(&query)
            .bind(id)
            .bind(&request.name)
            .bind(&request.email)
            .bind(&request.phone)
            .bind(request.role.map(VendorRoleDb::from))
            .bind(&request.bio)
            .bind(&request.website)
            .bind(&request.service_area)
            .bind(request.status.map(VendorStatusDb::from))
            .bind(request.accepts_stripe)
            .bind(request.accepts_venmo)
            .bind(request.accepts_cash_app)
            .bind(request.accepts_zelle)
            .bind(&request.stripe_account_id)
            .bind(&request.venmo_handle)
            .bind(&request.cash_app_handle)
            .bind(&request.zelle_contact)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Removes a vendor from the coordinator's book, applying the
    /// suspend-on-history policy inside one transaction.
    ///
    /// Returns `None` if the vendor does not exist.
    pub async fn remove(&self, id: Uuid) -> Result<Option<VendorRemoval>, sqlx::Error> {
        let timer = QueryTimer::new("remove_vendor");

        let mut tx = self.pool.begin().await?;

        let exists: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM vendors WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            timer.record();
            return Ok(None);
        }

        let (history,): (i64,) = sqlx::query_as(
            r#"
            SELECT (SELECT COUNT(*) FROM wedding_vendors WHERE vendor_id = $1)
                 + (SELECT COUNT(*) FROM tips WHERE vendor_id = $1)
            "#,
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        let removal = if history > 0 {
            sqlx::query("UPDATE vendors SET status = 'SUSPENDED' WHERE id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            VendorRemoval::Suspended
        } else {
            sqlx::query("DELETE FROM vendors WHERE id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            VendorRemoval::Deleted
        };

        tx.commit().await?;
        timer.record();
        Ok(Some(removal))
    }
}

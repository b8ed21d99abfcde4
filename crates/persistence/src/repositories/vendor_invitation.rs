//! Repository for vendor invitation operations.
//!
//! Creation and acceptance both run as transactions: creation so the
//! existing-vendor fast path and duplicate checks see a consistent view,
//! acceptance so a token can be consumed exactly once.

use domain::models::invitation::{invitation_expiry, CreateInvitationRequest};
use domain::models::payment::ChannelValidationError;
use domain::models::vendor::RegisterVendorRequest;
use rand::Rng;
use sqlx::{PgConnection, PgPool};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::entities::{
    VendorEntity, VendorInvitationEntity, VendorRoleDb, WeddingVendorEntity,
};
use crate::metrics::QueryTimer;

use super::vendor::VENDOR_COLUMNS;
use super::wedding_vendor::ensure_engagement;

const INVITATION_COLUMNS: &str = "id, token, email, vendor_name, role, message, status, \
     wedding_id, coordinator_id, vendor_id, expires_at, accepted_at, created_at";

/// Charset for invitation tokens. Excludes characters that read ambiguously
/// in emails (0/O, 1/l/I).
const TOKEN_CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZabcdefghjkmnpqrstuvwxyz23456789";
const TOKEN_LENGTH: usize = 32;

/// Generates an unguessable invitation token.
pub fn generate_invitation_token() -> String {
    let mut rng = rand::thread_rng();
    (0..TOKEN_LENGTH)
        .map(|_| {
            let idx = rng.gen_range(0..TOKEN_CHARSET.len());
            TOKEN_CHARSET[idx] as char
        })
        .collect()
}

/// Result of issuing an invitation.
#[derive(Debug)]
pub enum InvitationOutcome {
    /// A pending invitation was created; the token should be emailed.
    Sent(VendorInvitationEntity),
    /// The email already belongs to an active vendor, who was attached to
    /// the wedding's roster directly. No invitation row is created.
    ExistingVendorAttached {
        vendor: VendorEntity,
        engagement: WeddingVendorEntity,
    },
}

/// Errors from issuing an invitation.
#[derive(Debug, Error)]
pub enum InvitationCreateError {
    #[error("this vendor is already on the wedding's roster")]
    AlreadyOnRoster,
    #[error("an active invitation for this email and wedding already exists")]
    DuplicateActiveInvitation,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Errors from accepting an invitation.
#[derive(Debug, Error)]
pub enum AcceptInvitationError {
    #[error("invitation not found")]
    InvalidToken,
    #[error("invitation has expired")]
    Expired,
    #[error("invitation has already been accepted")]
    AlreadyAccepted,
    #[error(transparent)]
    Profile(#[from] ChannelValidationError),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// A successfully consumed invitation and the vendor it produced.
#[derive(Debug)]
pub struct AcceptedRegistration {
    pub invitation: VendorInvitationEntity,
    pub vendor: VendorEntity,
}

/// Repository for vendor invitation operations.
#[derive(Clone)]
pub struct VendorInvitationRepository {
    pool: PgPool,
}

impl VendorInvitationRepository {
    /// Creates a new invitation repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Issues an invitation for a wedding.
    ///
    /// If the email already belongs to an active vendor, that vendor is
    /// attached to the roster immediately instead of being asked to
    /// register again. An expired pending invitation does not block a
    /// fresh one.
    pub async fn create(
        &self,
        request: &CreateInvitationRequest,
    ) -> Result<InvitationOutcome, InvitationCreateError> {
        let timer = QueryTimer::new("create_invitation");

        let mut tx = self.pool.begin().await.map_err(InvitationCreateError::Database)?;

        // The duplicate check below is read-then-insert and no unique index
        // can enforce "one unexpired SENT per (email, wedding)", so issuance
        // for the same pair is serialized with a transaction-scoped advisory
        // lock. Held until commit or rollback.
        sqlx::query(
            "SELECT pg_advisory_xact_lock(hashtextextended(LOWER($1) || ':' || $2::text, 0))",
        )
        .bind(&request.email)
        .bind(request.wedding_id)
        .execute(&mut *tx)
        .await?;

        let vendor_query = format!(
            "SELECT {VENDOR_COLUMNS} FROM vendors \
             WHERE LOWER(email) = LOWER($1) AND status = 'ACTIVE'"
        );
        let existing_vendor = sqlx::query_as::<_, VendorEntity>(&vendor_query)
            .bind(&request.email)
            .fetch_optional(&mut *tx)
            .await?;

        if let Some(vendor) = existing_vendor {
            let engagement = ensure_engagement(&mut *tx, request.wedding_id, vendor.id)
                .await?
                .ok_or(InvitationCreateError::AlreadyOnRoster)?;
            tx.commit().await.map_err(InvitationCreateError::Database)?;
            timer.record();
            info!(vendor_id = %vendor.id, wedding_id = %request.wedding_id,
                  "existing vendor attached to roster in place of invitation");
            return Ok(InvitationOutcome::ExistingVendorAttached { vendor, engagement });
        }

        let duplicate: Option<(Uuid,)> = sqlx::query_as(
            r#"
            SELECT id FROM vendor_invitations
            WHERE LOWER(email) = LOWER($1)
              AND wedding_id = $2
              AND status = 'SENT'
              AND expires_at > NOW()
            "#,
        )
        .bind(&request.email)
        .bind(request.wedding_id)
        .fetch_optional(&mut *tx)
        .await?;
        if duplicate.is_some() {
            timer.record();
            return Err(InvitationCreateError::DuplicateActiveInvitation);
        }

        let token = generate_invitation_token();
        let insert_query = format!(
            r#"
            INSERT INTO vendor_invitations
                (token, email, vendor_name, role, message, status, wedding_id,
                 coordinator_id, expires_at)
            VALUES ($1, $2, $3, $4, $5, 'SENT', $6, $7, $8)
            RETURNING {INVITATION_COLUMNS}
            "#
        );
        let invitation = sqlx::query_as::<_, VendorInvitationEntity>(&insert_query)
            .bind(&token)
            .bind(&request.email)
            .bind(&request.vendor_name)
            .bind(VendorRoleDb::from(request.role))
            .bind(&request.message)
            .bind(request.wedding_id)
            .bind(request.coordinator_id)
            .bind(invitation_expiry())
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await.map_err(InvitationCreateError::Database)?;
        timer.record();
        Ok(InvitationOutcome::Sent(invitation))
    }

    /// Finds an invitation by its token.
    pub async fn find_by_token(
        &self,
        token: &str,
    ) -> Result<Option<VendorInvitationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_invitation_by_token");
        let query =
            format!("SELECT {INVITATION_COLUMNS} FROM vendor_invitations WHERE token = $1");
        let result = sqlx::query_as::<_, VendorInvitationEntity>(&query)
            .bind(token)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Lists a coordinator's invitations, newest first.
    pub async fn list_by_coordinator(
        &self,
        coordinator_id: Uuid,
    ) -> Result<Vec<VendorInvitationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_invitations_by_coordinator");
        let query = format!(
            r#"
            SELECT {INVITATION_COLUMNS}
            FROM vendor_invitations
            WHERE coordinator_id = $1
            ORDER BY created_at DESC
            "#
        );
        let result = sqlx::query_as::<_, VendorInvitationEntity>(&query)
            .bind(coordinator_id)
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Consumes an invitation: validates the token, creates or updates the
    /// vendor from the submitted profile, marks the invitation accepted,
    /// and places the vendor on the wedding's roster. One transaction; the
    /// invitation row is locked for the duration so two concurrent accepts
    /// cannot both succeed.
    pub async fn accept(
        &self,
        token: &str,
        profile: &RegisterVendorRequest,
    ) -> Result<AcceptedRegistration, AcceptInvitationError> {
        let timer = QueryTimer::new("accept_invitation");

        let mut tx = self.pool.begin().await.map_err(AcceptInvitationError::Database)?;

        let lock_query = format!(
            "SELECT {INVITATION_COLUMNS} FROM vendor_invitations WHERE token = $1 FOR UPDATE"
        );
        let invitation = sqlx::query_as::<_, VendorInvitationEntity>(&lock_query)
            .bind(token)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(AcceptInvitationError::InvalidToken)?;

        if invitation.is_expired() {
            timer.record();
            return Err(AcceptInvitationError::Expired);
        }
        if !invitation.is_acceptable() {
            timer.record();
            return Err(AcceptInvitationError::AlreadyAccepted);
        }
        if let Err(err) = profile.validate_channels() {
            timer.record();
            return Err(err.into());
        }

        let vendor = upsert_registered_vendor(&mut *tx, &invitation, profile).await?;

        // Compare-and-set on status, guarding the row lock above.
        let consumed = sqlx::query(
            r#"
            UPDATE vendor_invitations
            SET status = 'ACCEPTED', accepted_at = NOW(), vendor_id = $2
            WHERE id = $1 AND status = 'SENT'
            "#,
        )
        .bind(invitation.id)
        .bind(vendor.id)
        .execute(&mut *tx)
        .await?;
        if consumed.rows_affected() == 0 {
            timer.record();
            return Err(AcceptInvitationError::AlreadyAccepted);
        }

        ensure_engagement(&mut *tx, invitation.wedding_id, vendor.id).await?;

        tx.commit().await.map_err(AcceptInvitationError::Database)?;
        timer.record();

        info!(invitation_id = %invitation.id, vendor_id = %vendor.id,
              "invitation accepted");

        let refetched = format!(
            "SELECT {INVITATION_COLUMNS} FROM vendor_invitations WHERE id = $1"
        );
        let invitation = sqlx::query_as::<_, VendorInvitationEntity>(&refetched)
            .bind(invitation.id)
            .fetch_one(&self.pool)
            .await?;

        Ok(AcceptedRegistration { invitation, vendor })
    }
}

/// Creates the vendor record for a consumed invitation, or updates the
/// existing record that shares the invitation email. The role always comes
/// from the invitation, never from the submitted profile.
async fn upsert_registered_vendor(
    tx: &mut PgConnection,
    invitation: &VendorInvitationEntity,
    profile: &RegisterVendorRequest,
) -> Result<VendorEntity, sqlx::Error> {
    let settings = profile.channel_settings();

    let existing_query = format!(
        "SELECT {VENDOR_COLUMNS} FROM vendors WHERE LOWER(email) = LOWER($1) FOR UPDATE"
    );
    let existing = sqlx::query_as::<_, VendorEntity>(&existing_query)
        .bind(&profile.email)
        .fetch_optional(&mut *tx)
        .await?;

    let query = if existing.is_some() {
        format!(
            r#"
            UPDATE vendors
            SET name = $2, phone = $3, role = $4, status = 'ACTIVE', bio = $5,
                website = $6, service_area = $7, is_profile_complete = TRUE,
                accepts_stripe = $8, accepts_venmo = $9, accepts_cash_app = $10,
                accepts_zelle = $11, stripe_account_id = $12, venmo_handle = $13,
                cash_app_handle = $14, zelle_contact = $15,
                invited_by = COALESCE(invited_by, $16), registered_at = NOW()
            WHERE LOWER(email) = LOWER($1)
            RETURNING {VENDOR_COLUMNS}
            "#
        )
    } else {
        format!(
            r#"
            INSERT INTO vendors
                (email, name, phone, role, status, bio, website, service_area,
                 is_profile_complete, accepts_stripe, accepts_venmo, accepts_cash_app,
                 accepts_zelle, stripe_account_id, venmo_handle, cash_app_handle,
                 zelle_contact, invited_by, registered_at)
            VALUES ($1, $2, $3, $4, 'ACTIVE', $5, $6, $7, TRUE, $8, $9, $10, $11,
                    $12, $13, $14, $15, $16, NOW())
            RETURNING {VENDOR_COLUMNS}
            "#
        )
    };

    sqlx::query_as::<_, VendorEntity>(&query)
        .bind(&profile.email)
        .bind(&profile.name)
        .bind(&profile.phone)
        .bind(invitation.role)
        .bind(&profile.bio)
        .bind(&profile.website)
        .bind(&profile.service_area)
        .bind(settings.accepts_stripe)
        .bind(settings.accepts_venmo)
        .bind(settings.accepts_cash_app)
        .bind(settings.accepts_zelle)
        .bind(&settings.stripe_account_id)
        .bind(&settings.venmo_handle)
        .bind(&settings.cash_app_handle)
        .bind(&settings.zelle_contact)
        .bind(invitation.coordinator_id)
        .fetch_one(&mut *tx)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_token_length_and_charset() {
        let token = generate_invitation_token();
        assert_eq!(token.len(), TOKEN_LENGTH);
        assert!(token.bytes().all(|b| TOKEN_CHARSET.contains(&b)));
    }

    #[test]
    fn test_token_excludes_ambiguous_characters() {
        for _ in 0..50 {
            let token = generate_invitation_token();
            assert!(!token.contains('0'));
            assert!(!token.contains('O'));
            assert!(!token.contains('1'));
            assert!(!token.contains('l'));
            assert!(!token.contains('I'));
        }
    }

    #[test]
    fn test_tokens_are_unique() {
        let tokens: HashSet<String> = (0..100).map(|_| generate_invitation_token()).collect();
        assert_eq!(tokens.len(), 100);
    }
}

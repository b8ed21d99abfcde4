//! Tip entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::payment::PaymentChannel;
use domain::models::tip::TipStatus;
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for payment_channel. Wire values match the historical
/// single-enum format (CASHAPP, not CASH_APP).
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "payment_channel")]
pub enum PaymentChannelDb {
    #[sqlx(rename = "STRIPE")]
    Stripe,
    #[sqlx(rename = "VENMO")]
    Venmo,
    #[sqlx(rename = "CASHAPP")]
    CashApp,
    #[sqlx(rename = "ZELLE")]
    Zelle,
}

impl From<PaymentChannelDb> for PaymentChannel {
    fn from(db: PaymentChannelDb) -> Self {
        match db {
            PaymentChannelDb::Stripe => PaymentChannel::Stripe,
            PaymentChannelDb::Venmo => PaymentChannel::Venmo,
            PaymentChannelDb::CashApp => PaymentChannel::CashApp,
            PaymentChannelDb::Zelle => PaymentChannel::Zelle,
        }
    }
}

impl From<PaymentChannel> for PaymentChannelDb {
    fn from(channel: PaymentChannel) -> Self {
        match channel {
            PaymentChannel::Stripe => PaymentChannelDb::Stripe,
            PaymentChannel::Venmo => PaymentChannelDb::Venmo,
            PaymentChannel::CashApp => PaymentChannelDb::CashApp,
            PaymentChannel::Zelle => PaymentChannelDb::Zelle,
        }
    }
}

/// Database enum for tip_status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "tip_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TipStatusDb {
    Pending,
    Completed,
    Failed,
}

impl From<TipStatusDb> for TipStatus {
    fn from(db: TipStatusDb) -> Self {
        match db {
            TipStatusDb::Pending => TipStatus::Pending,
            TipStatusDb::Completed => TipStatus::Completed,
            TipStatusDb::Failed => TipStatus::Failed,
        }
    }
}

impl From<TipStatus> for TipStatusDb {
    fn from(status: TipStatus) -> Self {
        match status {
            TipStatus::Pending => TipStatusDb::Pending,
            TipStatus::Completed => TipStatusDb::Completed,
            TipStatus::Failed => TipStatusDb::Failed,
        }
    }
}

/// Database row mapping for the tips table.
#[derive(Debug, Clone, FromRow)]
pub struct TipEntity {
    pub id: Uuid,
    pub wedding_id: Uuid,
    pub vendor_id: Uuid,
    pub amount: f64,
    pub payment_method: PaymentChannelDb,
    pub status: TipStatusDb,
    pub guest_name: Option<String>,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<TipEntity> for domain::models::Tip {
    fn from(entity: TipEntity) -> Self {
        Self {
            id: entity.id,
            wedding_id: entity.wedding_id,
            vendor_id: entity.vendor_id,
            amount: entity.amount,
            payment_method: entity.payment_method.into(),
            status: entity.status.into(),
            guest_name: entity.guest_name,
            message: entity.message,
            created_at: entity.created_at,
        }
    }
}

//! Database entity definitions (row mappings).

pub mod coordinator;
pub mod tip;
pub mod vendor;
pub mod vendor_invitation;
pub mod wedding;
pub mod wedding_vendor;

pub use coordinator::CoordinatorEntity;
pub use tip::{PaymentChannelDb, TipEntity, TipStatusDb};
pub use vendor::{VendorEntity, VendorRoleDb, VendorStatusDb, VendorWithStatsEntity};
pub use vendor_invitation::{InvitationStatusDb, VendorInvitationEntity};
pub use wedding::WeddingEntity;
pub use wedding_vendor::WeddingVendorEntity;

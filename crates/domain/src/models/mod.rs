//! Domain models for the TipWedding backend.

pub mod coordinator;
pub mod invitation;
pub mod payment;
pub mod tip;
pub mod vendor;
pub mod wedding;
pub mod wedding_vendor;

pub use coordinator::Coordinator;
pub use invitation::VendorInvitation;
pub use payment::{ChannelSettings, PaymentChannel, PaymentOption};
pub use tip::{Tip, TipRecommendation};
pub use vendor::{Vendor, VendorRole, VendorStatus};
pub use wedding::Wedding;
pub use wedding_vendor::WeddingVendor;

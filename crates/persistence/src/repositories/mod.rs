//! Repository implementations.

pub mod coordinator;
pub mod tip;
pub mod vendor;
pub mod vendor_invitation;
pub mod wedding;
pub mod wedding_vendor;

pub use coordinator::CoordinatorRepository;
pub use tip::TipRepository;
pub use vendor::{VendorRemoval, VendorRepository};
pub use vendor_invitation::{
    generate_invitation_token, AcceptInvitationError, AcceptedRegistration,
    InvitationCreateError, InvitationOutcome, VendorInvitationRepository,
};
pub use wedding::WeddingRepository;
pub use wedding_vendor::{RosterError, WeddingVendorRepository};

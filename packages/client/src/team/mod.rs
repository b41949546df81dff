//! Team formation: slot arena, per-slot member validation, and submission.

pub mod builder;
pub mod session;
pub mod validator;

pub use builder::{
    Applied, BuilderState, PendingMember, Slot, SlotId, TeamBuilder, TeamError, ValidationRequest,
};
pub use session::{TeamCreator, TeamSession};
pub use validator::MemberValidator;

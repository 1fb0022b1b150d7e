//! Closed domain enums
//!
//! Every enum here replaces a free-form string comparison in a previous
//! iteration of the panel. Keeping them closed means role and status
//! checks are exhaustive at compile time.

pub mod role;
pub mod room;
pub mod store;

pub use role::RoleName;
pub use room::RoomStatus;
pub use store::{MovementType, PaymentMethod};

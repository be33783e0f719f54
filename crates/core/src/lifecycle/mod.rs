//! Transaction and payment state machines.
//!
//! - Transaction lifecycle: weigh-in to payment to receipt
//! - Payment method and status enums
//! - Transition rules for terminal states

pub mod payment;
pub mod status;

pub use payment::{PaymentMethod, PaymentStatus};
pub use status::{TransactionStatus, TransitionError};

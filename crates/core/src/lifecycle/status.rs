//! Transaction status state machine.
//!
//! A transaction moves `Pending -> InProgress -> Completed`; any
//! pre-payment state may move to `Cancelled`. `Completed` and
//! `Cancelled` are terminal: no transition leaves them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifecycle status of a weighbridge transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    /// Created at weigh-in, no exit weight yet.
    Pending,
    /// Exit weight recorded, awaiting payment.
    InProgress,
    /// Payment recorded.
    Completed,
    /// Cancelled before payment.
    Cancelled,
}

/// Error returned when an illegal status transition is attempted.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Cannot transition transaction from {from} to {to}")]
pub struct TransitionError {
    /// Status the transaction is currently in.
    pub from: TransactionStatus,
    /// Status the caller attempted to move to.
    pub to: TransactionStatus,
}

impl TransactionStatus {
    /// Wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Whether this status admits no further transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Whether moving from `self` to `next` is a legal transition.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        match self {
            Self::Pending => matches!(next, Self::InProgress | Self::Cancelled),
            Self::InProgress => matches!(next, Self::Completed | Self::Cancelled),
            Self::Completed | Self::Cancelled => false,
        }
    }

    /// Validates and performs a transition.
    ///
    /// # Errors
    ///
    /// Returns `TransitionError` if the transition is not permitted.
    pub fn transition_to(self, next: Self) -> Result<Self, TransitionError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(TransitionError {
                from: self,
                to: next,
            })
        }
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

//! Validation errors for weighbridge transactions.

use thiserror::Error;

/// A weighbridge business-rule violation.
///
/// These are expected, user-correctable errors: they are returned as
/// values (never panicked) and their `Display` text is shown verbatim
/// to the operator. Variants are listed in check order.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WeighingError {
    /// Truck empty weight is below the registration minimum.
    #[error("Truck empty weight too low: must be at least 2 tons")]
    EmptyWeightTooLow,

    /// Loaded truck weighed no more than its empty weight.
    #[error("Total weight must exceed the truck's empty weight")]
    TotalWeightNotAboveEmpty,

    /// Loaded truck is over the weighbridge limit.
    #[error("Total weight exceeds the maximum of 40 tons")]
    TotalWeightExceedsMaximum,

    /// Derived sand weight is below the billable minimum.
    #[error("Sand weight below the minimum of 0.5 tons")]
    SandWeightBelowMinimum,

    /// Derived sand weight is above the per-load maximum.
    #[error("Sand weight exceeds the maximum of 30 tons")]
    SandWeightExceedsMaximum,

    /// Exit timestamp precedes the entry timestamp.
    #[error("Exit time must be after entry time")]
    ExitBeforeEntry,

    /// Truck stayed on site longer than a full day.
    #[error("Transaction duration exceeds 24 hours")]
    DurationExceedsMaximum,

    /// Bank transfer recorded without a bank reference.
    #[error("Bank reference required for bank transfer payments")]
    BankReferenceRequired,
}

use chrono::NaiveDate;
use thiserror::Error;

/// Local validation failures. These are raised before any write is attempted
/// and never leave a partially-applied edit behind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field is empty: {0}")]
    MissingField(&'static str),

    #[error("A service provider must be selected")]
    MissingProvider,

    #[error("Expected return date must be set")]
    MissingReturnDate,

    #[error("Expected return {expected_return} must be after departure {departure}")]
    ReturnNotAfterDeparture {
        departure: NaiveDate,
        expected_return: NaiveDate,
    },

    #[error("Estimated duration must be at least 1 day, got {0}")]
    InvalidDuration(i64),

    #[error("{days} day(s) after {from} is outside the supported date range")]
    DateOutOfRange { from: NaiveDate, days: u32 },

    #[error("Estimated duration is not a whole number: {0:?}")]
    UnparseableDuration(String),

    #[error("Actual return date can only be set on an existing order")]
    ActualReturnOnNewOrder,

    #[error("No image at position {0}")]
    NoSuchImage(usize),
}

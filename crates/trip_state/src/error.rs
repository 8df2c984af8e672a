//! Errors raised while mutating a trip document.
//!
//! Migration never raises these: it drops what it cannot use. They only come
//! out of the explicit roster operations on [`TripState`].
//!
//!  [`TripState`]: crate::TripState
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("Invalid name: {0}")]
    InvalidName(String),
    #[error("\"{0}\" already present!")]
    DuplicateName(String),
    #[error("\"{0}\" traveler not found!")]
    UnknownTraveler(String),
    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),
}

//! The module contains the errors the engine can throw.
//!
//! The errors are:
//!
//! - [`MissingRate`] thrown when a currency used by an expense has no rate.
//! - [`InvalidRate`] thrown when a rate is zero, negative or not finite.
//!
//! Degenerate inputs (empty ranges, nobody present) are not errors: they have
//! defined zero or fallback results.
//!
//!  [`MissingRate`]: EngineError::MissingRate
//!  [`InvalidRate`]: EngineError::InvalidRate
use thiserror::Error;
use trip_state::Currency;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Missing exchange rate for {0}")]
    MissingRate(Currency),
    #[error("Invalid exchange rate for {currency}: {rate}")]
    InvalidRate { currency: Currency, rate: f64 },
}

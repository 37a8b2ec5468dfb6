//! Error types for period scoring.
//!
//! Every variant carries enough context (date, graha, period index, house
//! system) for the caller to log it and continue with the rest of a batch.

use chrono::{NaiveDate, NaiveDateTime};
use dasha_vedic_base::{Graha, VedicError};
use serde::Serialize;
use thiserror::Error;

use crate::house::HouseSystem;

/// Result type alias for scoring operations.
pub type SignalResult<T> = Result<T, SignalError>;

/// Errors and recoverable diagnostics from the scoring pipeline.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[non_exhaustive]
pub enum SignalError {
    /// A graha had no position at the requested instant. Recovered by
    /// scoring that graha as neutral (strength 5.0).
    #[error("no position for {graha} at {date} (period #{period})")]
    MissingPosition {
        date: NaiveDateTime,
        graha: Graha,
        period: usize,
    },

    /// A period record could not be turned into a scorable period. The
    /// period is skipped; the rest of the batch continues.
    #[error("malformed period #{index} starting {start}: {reason}")]
    MalformedPeriod {
        index: usize,
        start: NaiveDate,
        reason: String,
    },

    /// The house system needs data the entity does not have. Fatal for
    /// that house system only.
    #[error("cannot resolve {system} reference: {reason}")]
    ReferenceUnavailable { system: HouseSystem, reason: String },

    /// Configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration text could not be parsed.
    #[error("configuration parse error: {0}")]
    ConfigParse(String),

    /// Name lookup failure from the base crate.
    #[error(transparent)]
    Vedic(#[from] VedicError),
}

impl SignalError {
    /// True for the variants the pipeline recovers from inside a batch.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::MissingPosition { .. } | Self::MalformedPeriod { .. })
    }
}

impl From<toml::de::Error> for SignalError {
    fn from(e: toml::de::Error) -> Self {
        Self::ConfigParse(e.to_string())
    }
}

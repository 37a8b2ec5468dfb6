//! Error types for Vedic base calculations.

use serde::Serialize;
use thiserror::Error;

/// Errors from Vedic base lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[non_exhaustive]
pub enum VedicError {
    /// Planet name not recognised in either Sanskrit or English.
    #[error("unknown graha name: {0:?}")]
    UnknownGraha(String),
    /// Sign name not recognised in either Sanskrit or English.
    #[error("unknown rashi name: {0:?}")]
    UnknownRashi(String),
    /// Dasha level outside the supported depth.
    #[error("unsupported dasha depth {0} (expected 1..=3)")]
    UnsupportedDepth(usize),
}

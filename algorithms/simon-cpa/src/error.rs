//! Shared error type for the SIMON-CPA toolkit.
//!
//! All failures in this crate are programmer errors — mismatched array
//! shapes or parameters outside the documented range — and are returned at
//! the boundary of the operation that detected them. There is no retry or
//! recovery logic anywhere in the core.

use core::fmt;
#[cfg(feature = "std")]
use std::error;

/// Error kinds surfaced by the SIMON-CPA toolkit.
///
/// `DegenerateStatistic` (spec: stddev = 0 for a column) is deliberately
/// absent here: it is not an error, it is a `NaN` in the affected
/// correlation cell, consumed by the search layer as "no evidence."
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Input array dimensions violate a documented constraint.
    ShapeMismatch {
        /// What the caller was trying to do when the mismatch was found.
        context: &'static str,
        /// The shape the operation required.
        expected: String,
        /// The shape it actually received.
        actual: String,
    },
    /// A parameter fell outside its documented range (attacked round,
    /// intermediate kind, key-word count, etc).
    ParamOutOfRange {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// Human-readable description of why it is out of range.
        reason: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShapeMismatch {
                context,
                expected,
                actual,
            } => write!(
                f,
                "shape mismatch in {context}: expected {expected}, got {actual}"
            ),
            Self::ParamOutOfRange { parameter, reason } => {
                write!(f, "parameter '{parameter}' out of range: {reason}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl error::Error for Error {}

impl Error {
    /// Build a [`Error::ShapeMismatch`] from two already-formatted shape
    /// descriptions.
    pub fn shape_mismatch(
        context: &'static str,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::ShapeMismatch {
            context,
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Build a [`Error::ParamOutOfRange`].
    pub fn param_out_of_range(parameter: &'static str, reason: impl Into<String>) -> Self {
        Self::ParamOutOfRange {
            parameter,
            reason: reason.into(),
        }
    }
}

//! Typed evaluation errors.

use std::error::Error;
use std::fmt;

/// Error raised while building or evaluating a client profile.
///
/// All variants are recoverable by the caller; none is fatal to the
/// process. A required numeric field that is absent always surfaces as
/// [`EvalError::MissingField`] rather than being substituted with zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// A required input field was absent.
    MissingField {
        /// Canonical field name (e.g., `"base_tariff_per_kwh"`).
        field: String,
    },
    /// An input field was present but unusable.
    InvalidInput {
        /// Canonical field name.
        field: String,
        /// Human-readable reason.
        reason: String,
    },
    /// The inputs make one of the ROI formulas undefined.
    DegenerateInput {
        /// Human-readable reason.
        reason: String,
    },
}

impl EvalError {
    /// Stable machine-readable kind tag, used by the API error body.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "missing_field",
            Self::InvalidInput { .. } => "invalid_input",
            Self::DegenerateInput { .. } => "degenerate_input",
        }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { field } => {
                write!(f, "missing required field: {field}")
            }
            Self::InvalidInput { field, reason } => {
                write!(f, "invalid input: {field}: {reason}")
            }
            Self::DegenerateInput { reason } => {
                write!(f, "degenerate input: {reason}")
            }
        }
    }
}

impl Error for EvalError {}

//! # Error Types
//!
//! Structured error types for rcflex_core. Every variant carries enough
//! context (field, offending value, reason) to be fixed programmatically by
//! whatever is driving the calculation.
//!
//! A section that never reaches equilibrium is *not* an error: the solver
//! reports it through [`SolveStatus::NoCrossing`](crate::calculations::SolveStatus).
//!
//! ## Example
//!
//! ```rust
//! use rcflex_core::errors::{CalcError, CalcResult};
//!
//! fn validate_width(width: f64) -> CalcResult<()> {
//!     if width <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "width",
//!             width.to_string(),
//!             "Width must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for rcflex_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (non-positive, out of range, non-finite)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

/// Reject values that are not strictly positive finite numbers.
///
/// NaN fails the check as well, since every comparison with it is false.
pub(crate) fn require_positive(field: &str, value: f64) -> CalcResult<()> {
    if !(value.is_finite() && value > 0.0) {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            "Must be a positive, finite number",
        ));
    }
    Ok(())
}

/// Reject values outside the half-open interval (0, 1].
pub(crate) fn require_unit_fraction(field: &str, value: f64) -> CalcResult<()> {
    if !(value > 0.0 && value <= 1.0) {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            "Must lie in the interval (0, 1]",
        ));
    }
    Ok(())
}

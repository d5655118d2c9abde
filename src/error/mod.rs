// Error types for the wave acquisition core
//
// This module defines custom error types for acquisition and calibration operations,
// providing structured error handling with stable error codes for display collaborators.
//
// Degenerate data (too few samples, too few calibration points, zero-variance input)
// is never an error here: those states are reported as zero/None by the engines.

mod acquisition;
mod calibration;

pub use acquisition::{log_acquisition_error, AcquisitionError, AcquisitionErrorCodes};
pub use calibration::{log_calibration_error, CalibrationError, CalibrationErrorCodes};

/// Broad class of a rejected call
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A parameter supplied by the caller is invalid (rate, window, targets, ...)
    Configuration,
    /// The operation is not allowed in the current state
    InvalidTransition,
}

/// Error codes for structured error reporting
///
/// This trait provides a standard way to get error codes and messages
/// from custom error types, enabling consistent error handling across
/// display and export collaborators.
pub trait ErrorCode {
    /// Get the numeric error code
    fn code(&self) -> i32;

    /// Get the human-readable error message
    fn message(&self) -> String;

    /// Get the error class
    fn kind(&self) -> ErrorKind;
}

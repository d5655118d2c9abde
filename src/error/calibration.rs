// Calibration error types and constants

use crate::calibration::CalibrationStatus;
use crate::error::{ErrorCode, ErrorKind};
use log::error;
use std::fmt;

/// Calibration error code constants
///
/// Single source of truth for error codes reported to display collaborators.
///
/// Error code range: 2001-2007
pub struct CalibrationErrorCodes {}

impl CalibrationErrorCodes {
    /// Target height list is empty
    pub const EMPTY_TARGETS: i32 = 2001;

    /// A target height is NaN or infinite
    pub const INVALID_TARGET: i32 = 2002;

    /// A measured value is NaN or infinite
    pub const INVALID_MEASUREMENT: i32 = 2003;

    /// Calibration already in progress for this sensor
    pub const ALREADY_IN_PROGRESS: i32 = 2004;

    /// Operation requires a calibration in progress
    pub const NOT_IN_PROGRESS: i32 = 2005;

    /// Sensor has no calibration entry
    pub const UNKNOWN_SENSOR: i32 = 2006;

    /// Confirm requested before any live reading was buffered
    pub const NO_READING: i32 = 2007;
}

/// Log a calibration error with structured context
///
/// This function logs calibration errors with structured fields including:
/// - error_code: Numeric error code for programmatic handling
/// - component: The component where the error occurred
/// - message: Human-readable error message
/// - context: Additional contextual information
///
/// The logging is non-blocking and will not panic on failure.
pub fn log_calibration_error(err: &CalibrationError, context: &str) {
    error!(
        "Calibration error in {}: code={}, component=CalibrationProcedure, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Calibration-related errors
///
/// These errors cover the per-sensor point workflow: target list validation,
/// measurement validation and state transitions.
///
/// Error code ranges: 2001-2007
#[derive(Debug, Clone, PartialEq)]
pub enum CalibrationError {
    /// No target heights supplied
    EmptyTargets,

    /// Target height is not a finite number
    InvalidTarget { index: usize, value: f64 },

    /// Measured value is not a finite number
    InvalidMeasurement { value: f64 },

    /// Calibration already in progress
    AlreadyInProgress { sensor: String },

    /// Confirm/abort called outside an in-progress calibration
    NotInProgress {
        sensor: String,
        status: CalibrationStatus,
    },

    /// No calibration entry exists for the sensor
    UnknownSensor { sensor: String },

    /// No live reading to confirm
    NoReading { sensor: String },
}

impl ErrorCode for CalibrationError {
    fn code(&self) -> i32 {
        match self {
            CalibrationError::EmptyTargets => CalibrationErrorCodes::EMPTY_TARGETS,
            CalibrationError::InvalidTarget { .. } => CalibrationErrorCodes::INVALID_TARGET,
            CalibrationError::InvalidMeasurement { .. } => {
                CalibrationErrorCodes::INVALID_MEASUREMENT
            }
            CalibrationError::AlreadyInProgress { .. } => {
                CalibrationErrorCodes::ALREADY_IN_PROGRESS
            }
            CalibrationError::NotInProgress { .. } => CalibrationErrorCodes::NOT_IN_PROGRESS,
            CalibrationError::UnknownSensor { .. } => CalibrationErrorCodes::UNKNOWN_SENSOR,
            CalibrationError::NoReading { .. } => CalibrationErrorCodes::NO_READING,
        }
    }

    fn message(&self) -> String {
        match self {
            CalibrationError::EmptyTargets => {
                "Calibration needs at least one target height".to_string()
            }
            CalibrationError::InvalidTarget { index, value } => {
                format!("Target height {} is not a finite number ({})", index, value)
            }
            CalibrationError::InvalidMeasurement { value } => {
                format!("Measured value is not a finite number ({})", value)
            }
            CalibrationError::AlreadyInProgress { sensor } => {
                format!("Calibration already in progress for sensor {}", sensor)
            }
            CalibrationError::NotInProgress { sensor, status } => {
                format!(
                    "Calibration not in progress for sensor {} (status: {})",
                    sensor,
                    status.display_name()
                )
            }
            CalibrationError::UnknownSensor { sensor } => {
                format!("No calibration recorded for sensor {}", sensor)
            }
            CalibrationError::NoReading { sensor } => {
                format!("No live reading to confirm for sensor {}", sensor)
            }
        }
    }

    fn kind(&self) -> ErrorKind {
        match self {
            CalibrationError::AlreadyInProgress { .. }
            | CalibrationError::NotInProgress { .. }
            | CalibrationError::NoReading { .. } => ErrorKind::InvalidTransition,
            _ => ErrorKind::Configuration,
        }
    }
}

impl fmt::Display for CalibrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CalibrationError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for CalibrationError {}

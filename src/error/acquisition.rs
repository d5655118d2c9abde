// Acquisition error types and constants

use crate::acquisition::AcquisitionStatus;
use crate::analysis::ChannelId;
use crate::error::{ErrorCode, ErrorKind};
use log::error;
use std::fmt;

/// Acquisition error code constants
///
/// Single source of truth for error codes reported to display collaborators.
///
/// Error code range: 1001-1007
pub struct AcquisitionErrorCodes {}

impl AcquisitionErrorCodes {
    /// Sampling rate is not a positive finite number
    pub const INVALID_SAMPLING_RATE: i32 = 1001;

    /// Window size is zero
    pub const INVALID_WINDOW_SIZE: i32 = 1002;

    /// Configured duration is not a positive finite number
    pub const INVALID_DURATION: i32 = 1003;

    /// Tick delta is negative or not finite
    pub const INVALID_TICK: i32 = 1004;

    /// Sample value is NaN or infinite
    pub const NON_FINITE_SAMPLE: i32 = 1005;

    /// Session operation not allowed in the current state
    pub const INVALID_TRANSITION: i32 = 1006;

    /// Sample pushed while the session is not running
    pub const NOT_RUNNING: i32 = 1007;
}

/// Log an acquisition error with structured context
///
/// Logs the error code, component and message through the `log` facade.
/// The logging is non-blocking and will not panic on failure.
pub fn log_acquisition_error(err: &AcquisitionError, context: &str) {
    error!(
        "Acquisition error in {}: code={}, component=AcquisitionSession, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Acquisition-related errors
///
/// These errors cover session configuration and the start/pause/resume/stop
/// state machine. All of them are recoverable by the caller.
///
/// Error code ranges: 1001-1007
#[derive(Debug, Clone, PartialEq)]
pub enum AcquisitionError {
    /// Sampling rate must be > 0 and finite
    InvalidSamplingRate { rate_hz: f64 },

    /// Window must hold at least one sample
    InvalidWindowSize { size: usize },

    /// Duration must be > 0 and finite
    InvalidDuration { seconds: f64 },

    /// Tick delta must be >= 0 and finite
    InvalidTick { delta_seconds: f64 },

    /// Sample value is NaN or infinite
    NonFiniteSample { channel: ChannelId, value: f64 },

    /// Operation not allowed from the current status
    InvalidTransition {
        action: &'static str,
        status: AcquisitionStatus,
    },

    /// Samples are only accepted while running
    NotRunning { status: AcquisitionStatus },
}

impl ErrorCode for AcquisitionError {
    fn code(&self) -> i32 {
        match self {
            AcquisitionError::InvalidSamplingRate { .. } => {
                AcquisitionErrorCodes::INVALID_SAMPLING_RATE
            }
            AcquisitionError::InvalidWindowSize { .. } => AcquisitionErrorCodes::INVALID_WINDOW_SIZE,
            AcquisitionError::InvalidDuration { .. } => AcquisitionErrorCodes::INVALID_DURATION,
            AcquisitionError::InvalidTick { .. } => AcquisitionErrorCodes::INVALID_TICK,
            AcquisitionError::NonFiniteSample { .. } => AcquisitionErrorCodes::NON_FINITE_SAMPLE,
            AcquisitionError::InvalidTransition { .. } => {
                AcquisitionErrorCodes::INVALID_TRANSITION
            }
            AcquisitionError::NotRunning { .. } => AcquisitionErrorCodes::NOT_RUNNING,
        }
    }

    fn message(&self) -> String {
        match self {
            AcquisitionError::InvalidSamplingRate { rate_hz } => {
                format!("Sampling rate must be greater than 0 Hz (got {})", rate_hz)
            }
            AcquisitionError::InvalidWindowSize { size } => {
                format!("Window size must be at least 1 sample (got {})", size)
            }
            AcquisitionError::InvalidDuration { seconds } => {
                format!("Duration must be greater than 0 s (got {})", seconds)
            }
            AcquisitionError::InvalidTick { delta_seconds } => {
                format!("Tick delta must be a non-negative number (got {})", delta_seconds)
            }
            AcquisitionError::NonFiniteSample { channel, value } => {
                format!("Channel {} received a non-finite sample ({})", channel, value)
            }
            AcquisitionError::InvalidTransition { action, status } => {
                format!("Cannot {} while acquisition is {}", action, status.display_name())
            }
            AcquisitionError::NotRunning { status } => {
                format!(
                    "Acquisition not running (status: {}). Call start() first.",
                    status.display_name()
                )
            }
        }
    }

    fn kind(&self) -> ErrorKind {
        match self {
            AcquisitionError::InvalidTransition { .. } | AcquisitionError::NotRunning { .. } => {
                ErrorKind::InvalidTransition
            }
            _ => ErrorKind::Configuration,
        }
    }
}

impl fmt::Display for AcquisitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AcquisitionError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for AcquisitionError {}

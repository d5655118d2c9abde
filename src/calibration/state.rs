// Calibration data model - points, status and per-sensor snapshots
//
// A CalibrationPoint pairs a reference height (target) with the voltage the
// sensor produced at that height. Points are immutable once confirmed; the
// linear fit is always derived from the confirmed point list.

use std::time::{SystemTime, UNIX_EPOCH};

use super::fit::LinearFit;

/// Sensor identifier (e.g. "WG-01")
pub type SensorId = String;

/// Milliseconds since the Unix epoch, 0 if the clock is before the epoch
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// One reference/measurement pair
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CalibrationPoint {
    /// Reference height
    pub target_value: f64,
    /// Sensor output at the reference height (voltage)
    pub measured_value: f64,
    pub confirmed: bool,
    /// Capture time in milliseconds since the Unix epoch
    pub captured_at: u64,
}

impl CalibrationPoint {
    /// Create a confirmed point
    pub fn confirmed(target_value: f64, measured_value: f64, captured_at: u64) -> Self {
        Self {
            target_value,
            measured_value,
            confirmed: true,
            captured_at,
        }
    }

    /// Create a live candidate that has not been confirmed yet
    pub fn candidate(target_value: f64, measured_value: f64, captured_at: u64) -> Self {
        Self {
            target_value,
            measured_value,
            confirmed: false,
            captured_at,
        }
    }
}

/// Per-sensor calibration workflow status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum CalibrationStatus {
    #[default]
    Idle,
    InProgress,
    Completed,
}

impl CalibrationStatus {
    /// Get human-readable name for display
    pub fn display_name(&self) -> &'static str {
        match self {
            CalibrationStatus::Idle => "IDLE",
            CalibrationStatus::InProgress => "IN PROGRESS",
            CalibrationStatus::Completed => "COMPLETED",
        }
    }
}

/// Immutable snapshot of one sensor's calibration
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SensorCalibration {
    pub sensor_id: SensorId,
    /// Confirmed points in target-sequence order
    pub points: Vec<CalibrationPoint>,
    pub status: CalibrationStatus,
    /// Cursor into the target list of the current run
    pub current_index: usize,
    /// Number of targets in the current run
    pub target_count: usize,
    /// Fit of the last completed run, if at least two points were confirmed
    pub fit: Option<LinearFit>,
}

impl SensorCalibration {
    /// Whether the sensor has a usable transfer function
    pub fn is_calibrated(&self) -> bool {
        self.fit.is_some()
    }
}

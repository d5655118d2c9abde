//! Event types published to display and export collaborators.

use serde::{Deserialize, Serialize};

use crate::acquisition::{AcquisitionStatus, StopReason};
use crate::analysis::{ChannelId, WaveStatistics};
use crate::calibration::{CalibrationProgress, LinearFit, SensorId};
use crate::error::ErrorKind;

/// Snapshot events emitted by the console context.
///
/// Every payload is an owned copy, so subscribers on other threads never
/// observe a buffer while it is being mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ConsoleEvent {
    Statistics {
        channel: ChannelId,
        statistics: WaveStatistics,
    },
    AcquisitionStatus {
        status: AcquisitionStatus,
        elapsed_seconds: f64,
        progress_fraction: f64,
        stop_reason: Option<StopReason>,
    },
    CalibrationProgress(CalibrationProgress),
    CalibrationCompleted {
        sensor_id: SensorId,
        fit: Option<LinearFit>,
    },
    Error {
        code: i32,
        kind: ErrorKind,
        message: String,
        context: String,
    },
}

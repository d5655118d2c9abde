// Wave Acquisition Core - wave statistics and sensor calibration
// Sliding-window sea-state statistics per channel, plus linear calibration
// of wave gauges against reference heights

// Module declarations
pub mod acquisition;
pub mod analysis;
pub mod calibration;
pub mod config;
pub mod context;
pub mod error;
pub mod managers;
pub mod telemetry;

// Re-exports for convenience
pub use acquisition::{AcquisitionSession, AcquisitionSettings, AcquisitionStatus, StopReason};
pub use analysis::{ChannelId, SamplingRate, StatisticsEngine, WaveStatistics};
pub use calibration::{
    CalibrationFitEngine, CalibrationPoint, CalibrationProcedure, CalibrationProgress,
    CalibrationStatus, ConfirmOutcome, LinearFit, SensorCalibration, SensorId,
};
pub use config::AppConfig;
pub use context::ConsoleContext;
pub use error::{AcquisitionError, CalibrationError, ErrorCode, ErrorKind};
pub use telemetry::{ConsoleEvent, TelemetryCollector, TelemetrySnapshot};

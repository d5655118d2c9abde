// Managers Module
//
// Focused managers owned by ConsoleContext, one concern each:
// - AcquisitionManager: session lifecycle and the statistics engine it feeds
// - CalibrationManager: per-sensor calibration runs and the fit engine

pub mod acquisition_manager;
pub mod calibration_manager;

pub use acquisition_manager::AcquisitionManager;
pub use calibration_manager::CalibrationManager;

// Calibration module - sensor transfer-function fitting and workflow
//
// This module provides two main components:
// 1. CalibrationFitEngine: stores confirmed points per sensor and fits
//    measured = slope * target + offset by least squares
// 2. CalibrationProcedure: drives the per-sensor point workflow
//
// The calibration workflow:
// 1. Start a run with an ordered list of reference heights
// 2. For each height, read the live sensor value and confirm it
// 3. Confirming the last height computes the LinearFit and completes the run

pub mod engine;
pub mod fit;
pub mod procedure;
pub mod progress;
pub mod state;
pub mod validation;

pub use engine::CalibrationFitEngine;
pub use fit::LinearFit;
pub use procedure::{CalibrationProcedure, ConfirmOutcome};
pub use progress::CalibrationProgress;
pub use state::{CalibrationPoint, CalibrationStatus, SensorCalibration, SensorId};
pub use validation::CalibrationValidator;

// CalibrationManager: Focused manager for sensor calibration workflows
//
// Single Responsibility: one procedure per sensor plus the shared fit engine
// Extracted from ConsoleContext to keep per-sensor rules testable on their own

use std::collections::BTreeMap;

use crate::calibration::{
    CalibrationFitEngine, CalibrationProcedure, CalibrationProgress, CalibrationStatus,
    ConfirmOutcome, LinearFit, SensorCalibration, SensorId,
};
use crate::error::{log_calibration_error, CalibrationError};

/// Manages calibration workflows for any number of sensors
///
/// This manager handles:
/// - Starting/confirming/aborting calibration runs per sensor
/// - Buffering live readings before confirmation
/// - Resetting a sensor back to uncalibrated
/// - Exposing fits and progress snapshots
///
/// Sensors are independent; a run on one never touches another's points.
///
/// # Example
/// ```ignore
/// let mut manager = CalibrationManager::new();
/// manager.start("WG-01", &[0.0, 10.0, 20.0])?;
/// manager.confirm("WG-01", 1.0)?;
/// manager.confirm("WG-01", 21.0)?;
/// manager.confirm("WG-01", 41.0)?;
/// let fit = manager.fit("WG-01");
/// ```
#[derive(Debug, Default)]
pub struct CalibrationManager {
    engine: CalibrationFitEngine,
    procedures: BTreeMap<SensorId, CalibrationProcedure>,
}

impl CalibrationManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a calibration run for a sensor
    ///
    /// Unknown sensors are registered on first start.
    ///
    /// # Errors
    /// - `AlreadyInProgress` if the sensor already has an active run
    /// - `EmptyTargets` / `InvalidTarget` for a bad target list
    pub fn start(&mut self, sensor: &str, target_heights: &[f64]) -> Result<(), CalibrationError> {
        let procedure = self
            .procedures
            .entry(sensor.to_string())
            .or_insert_with(|| CalibrationProcedure::new(sensor));

        procedure
            .start(target_heights, &mut self.engine)
            .inspect_err(|err| log_calibration_error(err, "start_calibration"))
    }

    /// Buffer a live reading for the sensor's current target
    pub fn update_reading(&mut self, sensor: &str, measured_value: f64) -> Result<(), CalibrationError> {
        let procedure = Self::active(&mut self.procedures, sensor, "update_reading")?;
        procedure
            .update_reading(measured_value)
            .inspect_err(|err| log_calibration_error(err, "update_reading"))
    }

    /// Confirm an explicit measured value for the current target
    pub fn confirm(
        &mut self,
        sensor: &str,
        measured_value: f64,
    ) -> Result<ConfirmOutcome, CalibrationError> {
        let procedure = Self::active(&mut self.procedures, sensor, "confirm_point")?;
        procedure
            .confirm(measured_value, &mut self.engine)
            .inspect_err(|err| log_calibration_error(err, "confirm_point"))
    }

    /// Confirm the buffered live reading for the current target
    pub fn confirm_reading(&mut self, sensor: &str) -> Result<ConfirmOutcome, CalibrationError> {
        let procedure = Self::active(&mut self.procedures, sensor, "confirm_reading")?;
        procedure
            .confirm_reading(&mut self.engine)
            .inspect_err(|err| log_calibration_error(err, "confirm_reading"))
    }

    /// Abandon the sensor's active run, restoring its previous fit
    pub fn abort(&mut self, sensor: &str) -> Result<(), CalibrationError> {
        let procedure = Self::active(&mut self.procedures, sensor, "abort_calibration")?;
        procedure
            .abort(&mut self.engine)
            .inspect_err(|err| log_calibration_error(err, "abort_calibration"))
    }

    /// Forget a sensor's points and fit
    ///
    /// # Errors
    /// - `UnknownSensor` if the sensor was never started
    /// - `AlreadyInProgress` while a run is active (abort it first)
    pub fn reset_sensor(&mut self, sensor: &str) -> Result<(), CalibrationError> {
        let result = match self.procedures.get(sensor) {
            None => Err(CalibrationError::UnknownSensor {
                sensor: sensor.to_string(),
            }),
            Some(procedure) if procedure.status() == CalibrationStatus::InProgress => {
                Err(CalibrationError::AlreadyInProgress {
                    sensor: sensor.to_string(),
                })
            }
            Some(_) => Ok(()),
        };
        result.inspect_err(|err| log_calibration_error(err, "reset_sensor"))?;

        self.procedures.remove(sensor);
        self.engine.clear_sensor(sensor);
        tracing::info!("[CalibrationManager] {} reset", sensor);
        Ok(())
    }

    /// Status of a sensor; sensors never started are `Idle`
    pub fn status(&self, sensor: &str) -> CalibrationStatus {
        self.procedures
            .get(sensor)
            .map(CalibrationProcedure::status)
            .unwrap_or_default()
    }

    /// Fit of the sensor's last completed run, `None` while a new run is active
    pub fn fit(&self, sensor: &str) -> Option<LinearFit> {
        self.procedures.get(sensor).and_then(CalibrationProcedure::fit)
    }

    pub fn progress(&self, sensor: &str) -> Option<CalibrationProgress> {
        self.procedures.get(sensor).map(CalibrationProcedure::progress)
    }

    pub fn calibration(&self, sensor: &str) -> Option<SensorCalibration> {
        self.procedures
            .get(sensor)
            .map(|procedure| procedure.snapshot(&self.engine))
    }

    /// Snapshots of every known sensor in id order
    pub fn calibrations(&self) -> Vec<SensorCalibration> {
        self.procedures
            .values()
            .map(|procedure| procedure.snapshot(&self.engine))
            .collect()
    }

    pub fn sensors(&self) -> impl Iterator<Item = &str> + '_ {
        self.procedures.keys().map(String::as_str)
    }

    pub fn engine(&self) -> &CalibrationFitEngine {
        &self.engine
    }

    /// Look up a sensor's procedure for an in-run operation
    ///
    /// Sensors never started report `NotInProgress` with status `Idle`.
    fn active<'a>(
        procedures: &'a mut BTreeMap<SensorId, CalibrationProcedure>,
        sensor: &str,
        context: &str,
    ) -> Result<&'a mut CalibrationProcedure, CalibrationError> {
        procedures.get_mut(sensor).ok_or_else(|| {
            let err = CalibrationError::NotInProgress {
                sensor: sensor.to_string(),
                status: CalibrationStatus::Idle,
            };
            log_calibration_error(&err, context);
            err
        })
    }
}

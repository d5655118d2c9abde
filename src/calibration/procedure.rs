// CalibrationProcedure - per-sensor point collection workflow
//
// This module manages the calibration state machine of one sensor:
//
//   Idle -> InProgress -> Completed
//     ^         |            |
//     +--abort--+            +--start (re-calibration)
//
// A run walks an ordered list of target heights. For each target the operator
// sets the reference height, the live sensor reading is buffered, and on
// confirmation the point is appended to the fit engine. Confirming the last
// target computes the linear fit and completes the run.
//
// Starting a run stashes the previous run's points and fit; while the new run
// is in progress the sensor has no fit. Aborting restores both.

use super::engine::CalibrationFitEngine;
use super::fit::LinearFit;
use super::progress::CalibrationProgress;
use super::state::{now_ms, CalibrationPoint, CalibrationStatus, SensorCalibration, SensorId};
use super::validation::CalibrationValidator;
use crate::error::CalibrationError;

/// Result of a successful confirmation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfirmOutcome {
    /// Point recorded, cursor moved to the next target
    Advanced { next_index: usize, next_target: f64 },
    /// Last target confirmed, fit computed (None if fewer than two points)
    Completed { fit: Option<LinearFit> },
}

/// Calibration workflow state of a single sensor
#[derive(Debug, Clone)]
pub struct CalibrationProcedure {
    sensor_id: SensorId,
    status: CalibrationStatus,
    target_heights: Vec<f64>,
    current_index: usize,
    /// Live reading for the current target, not yet confirmed
    candidate: Option<CalibrationPoint>,
    /// Points of the last completed run, restored on abort
    previous_points: Option<Vec<CalibrationPoint>>,
    /// Fit of the last completed run, restored on abort
    previous_fit: Option<LinearFit>,
    /// Fit of the current point list; None while a run is in progress
    fit: Option<LinearFit>,
}

impl CalibrationProcedure {
    /// Create an idle procedure for a sensor
    pub fn new(sensor_id: impl Into<SensorId>) -> Self {
        Self {
            sensor_id: sensor_id.into(),
            status: CalibrationStatus::Idle,
            target_heights: Vec::new(),
            current_index: 0,
            candidate: None,
            previous_points: None,
            previous_fit: None,
            fit: None,
        }
    }

    /// Start a run over the ordered target heights
    ///
    /// Valid from `Idle` or `Completed`. The sensor's point list in the
    /// engine is emptied for the new run and the current fit is stashed, so
    /// `fit()` is `None` until the run completes or is aborted.
    ///
    /// # Errors
    /// - `AlreadyInProgress` if a run is active
    /// - `EmptyTargets` / `InvalidTarget` for a bad target list
    pub fn start(
        &mut self,
        target_heights: &[f64],
        engine: &mut CalibrationFitEngine,
    ) -> Result<(), CalibrationError> {
        if self.status == CalibrationStatus::InProgress {
            return Err(CalibrationError::AlreadyInProgress {
                sensor: self.sensor_id.clone(),
            });
        }
        CalibrationValidator::validate_targets(target_heights)?;

        let previous = engine.replace_points(
            &self.sensor_id,
            Vec::with_capacity(target_heights.len()),
        );
        self.previous_points = Some(previous);
        self.previous_fit = self.fit.take();
        self.target_heights = target_heights.to_vec();
        self.current_index = 0;
        self.candidate = None;
        self.status = CalibrationStatus::InProgress;

        tracing::info!(
            "[CalibrationProcedure] {} started with {} targets",
            self.sensor_id,
            self.target_heights.len()
        );
        Ok(())
    }

    /// Buffer a live reading for the current target
    ///
    /// Replaces any earlier unconfirmed reading.
    pub fn update_reading(&mut self, measured_value: f64) -> Result<(), CalibrationError> {
        self.require_in_progress()?;
        CalibrationValidator::validate_measurement(measured_value)?;

        self.candidate = Some(CalibrationPoint::candidate(
            self.target_heights[self.current_index],
            measured_value,
            now_ms(),
        ));
        Ok(())
    }

    /// Confirm the buffered live reading
    ///
    /// # Errors
    /// - `NotInProgress` outside a run
    /// - `NoReading` if no reading was buffered for the current target
    pub fn confirm_reading(
        &mut self,
        engine: &mut CalibrationFitEngine,
    ) -> Result<ConfirmOutcome, CalibrationError> {
        self.require_in_progress()?;
        let candidate = self.candidate.ok_or_else(|| CalibrationError::NoReading {
            sensor: self.sensor_id.clone(),
        })?;
        self.confirm_at(candidate.measured_value, candidate.captured_at, engine)
    }

    /// Confirm a measured value for the current target, captured now
    pub fn confirm(
        &mut self,
        measured_value: f64,
        engine: &mut CalibrationFitEngine,
    ) -> Result<ConfirmOutcome, CalibrationError> {
        self.confirm_at(measured_value, now_ms(), engine)
    }

    /// Confirm a measured value for the current target with an explicit capture time
    pub fn confirm_at(
        &mut self,
        measured_value: f64,
        captured_at: u64,
        engine: &mut CalibrationFitEngine,
    ) -> Result<ConfirmOutcome, CalibrationError> {
        self.require_in_progress()?;
        CalibrationValidator::validate_measurement(measured_value)?;

        let target_value = self.target_heights[self.current_index];
        engine.record(
            &self.sensor_id,
            CalibrationPoint::confirmed(target_value, measured_value, captured_at),
        );
        self.candidate = None;

        tracing::debug!(
            "[CalibrationProcedure] {} point {}/{}: target={} measured={}",
            self.sensor_id,
            self.current_index + 1,
            self.target_heights.len(),
            target_value,
            measured_value
        );

        if self.current_index + 1 == self.target_heights.len() {
            self.fit = engine.fit(&self.sensor_id);
            self.previous_points = None;
            self.previous_fit = None;
            self.status = CalibrationStatus::Completed;

            match &self.fit {
                Some(fit) => tracing::info!(
                    "[CalibrationProcedure] {} completed: slope={:.5} offset={:.5} r2={:.5} rmse={:.5}",
                    self.sensor_id,
                    fit.slope,
                    fit.offset,
                    fit.r_squared,
                    fit.rmse
                ),
                None => tracing::info!(
                    "[CalibrationProcedure] {} completed without a fit (need two distinct targets)",
                    self.sensor_id
                ),
            }

            Ok(ConfirmOutcome::Completed { fit: self.fit })
        } else {
            self.current_index += 1;
            Ok(ConfirmOutcome::Advanced {
                next_index: self.current_index,
                next_target: self.target_heights[self.current_index],
            })
        }
    }

    /// Abandon the active run
    ///
    /// Discards the points of this run and restores the previous completed
    /// run's points and fit, so the engine fit matches the preserved fit again.
    pub fn abort(&mut self, engine: &mut CalibrationFitEngine) -> Result<(), CalibrationError> {
        self.require_in_progress()?;

        match self.previous_points.take() {
            Some(previous) if !previous.is_empty() => {
                engine.replace_points(&self.sensor_id, previous);
            }
            _ => {
                engine.clear_sensor(&self.sensor_id);
            }
        }

        self.fit = self.previous_fit.take();
        self.status = CalibrationStatus::Idle;
        self.target_heights.clear();
        self.current_index = 0;
        self.candidate = None;

        tracing::info!("[CalibrationProcedure] {} aborted", self.sensor_id);
        Ok(())
    }

    /// Get current calibration progress
    pub fn progress(&self) -> CalibrationProgress {
        let (current_target, points_confirmed) = match self.status {
            CalibrationStatus::Idle => (None, 0),
            CalibrationStatus::InProgress => (
                Some(self.target_heights[self.current_index]),
                self.current_index,
            ),
            CalibrationStatus::Completed => (None, self.target_heights.len()),
        };

        CalibrationProgress {
            sensor_id: self.sensor_id.clone(),
            status: self.status,
            current_index: self.current_index,
            target_count: self.target_heights.len(),
            current_target,
            points_confirmed,
            live_reading: self.candidate.map(|c| c.measured_value),
        }
    }

    /// Immutable snapshot combining workflow state and the engine's points
    pub fn snapshot(&self, engine: &CalibrationFitEngine) -> SensorCalibration {
        SensorCalibration {
            sensor_id: self.sensor_id.clone(),
            points: engine.points(&self.sensor_id).to_vec(),
            status: self.status,
            current_index: self.current_index,
            target_count: self.target_heights.len(),
            fit: self.fit,
        }
    }

    pub fn sensor_id(&self) -> &str {
        &self.sensor_id
    }

    pub fn status(&self) -> CalibrationStatus {
        self.status
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn target_heights(&self) -> &[f64] {
        &self.target_heights
    }

    /// Reference height to measure next, `None` outside a run
    pub fn current_target(&self) -> Option<f64> {
        match self.status {
            CalibrationStatus::InProgress => Some(self.target_heights[self.current_index]),
            _ => None,
        }
    }

    /// Fit of the last completed run
    pub fn fit(&self) -> Option<LinearFit> {
        self.fit
    }

    fn require_in_progress(&self) -> Result<(), CalibrationError> {
        if self.status != CalibrationStatus::InProgress {
            return Err(CalibrationError::NotInProgress {
                sensor: self.sensor_id.clone(),
                status: self.status,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "procedure_tests.rs"]
mod tests;

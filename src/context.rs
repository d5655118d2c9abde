// ConsoleContext: owner of all console state
// Composes the acquisition and calibration managers with the event feed

use tokio::sync::broadcast;

use crate::acquisition::{AcquisitionSession, AcquisitionSettings, AcquisitionStatus};
use crate::analysis::{ChannelId, WaveStatistics};
use crate::calibration::{CalibrationProgress, ConfirmOutcome, LinearFit, SensorCalibration};
use crate::config::AppConfig;
use crate::error::{AcquisitionError, CalibrationError};
use crate::managers::{AcquisitionManager, CalibrationManager};
use crate::telemetry::{ConsoleEvent, TelemetryCollector, TelemetrySnapshot};

/// ConsoleContext: single writer for acquisition and calibration state
///
/// Every successful mutation publishes an owned snapshot event; every
/// rejected call publishes an error event carrying its code and kind.
/// Display collaborators subscribe and never touch the live buffers.
pub struct ConsoleContext {
    config: AppConfig,
    acquisition: AcquisitionManager,
    calibration: CalibrationManager,
    telemetry: TelemetryCollector,
}

impl ConsoleContext {
    pub fn new(config: AppConfig) -> Self {
        let telemetry = TelemetryCollector::new(
            config.telemetry.channel_capacity,
            config.telemetry.history_capacity,
        );
        Self {
            config,
            acquisition: AcquisitionManager::new(),
            calibration: CalibrationManager::new(),
            telemetry,
        }
    }

    /// Build from `assets/wave_config.json`, falling back to defaults
    pub fn from_default_config() -> Self {
        Self::new(AppConfig::load())
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    // ========================================================================
    // ACQUISITION
    // ========================================================================

    /// Start an acquisition with the configured settings
    pub fn start_acquisition(&mut self) -> Result<(), AcquisitionError> {
        let result = self.acquisition.start_from_config(&self.config.acquisition);
        self.after_acquisition(result, "start_acquisition")
    }

    /// Start an acquisition with explicit settings
    pub fn start_acquisition_with(
        &mut self,
        settings: AcquisitionSettings,
    ) -> Result<(), AcquisitionError> {
        let result = self.acquisition.start(settings);
        self.after_acquisition(result, "start_acquisition")
    }

    pub fn pause_acquisition(&mut self) -> Result<(), AcquisitionError> {
        let result = self.acquisition.pause();
        self.after_acquisition(result, "pause_acquisition")
    }

    pub fn resume_acquisition(&mut self) -> Result<(), AcquisitionError> {
        let result = self.acquisition.resume();
        self.after_acquisition(result, "resume_acquisition")
    }

    pub fn stop_acquisition(&mut self) -> Result<(), AcquisitionError> {
        let result = self.acquisition.stop();
        self.after_acquisition(result, "stop_acquisition")
    }

    /// Advance acquisition time, publishing the resulting status
    pub fn tick(&mut self, delta_seconds: f64) -> Result<AcquisitionStatus, AcquisitionError> {
        let result = self.acquisition.tick(delta_seconds);
        match result {
            Ok(status) => {
                self.publish_session();
                Ok(status)
            }
            Err(err) => {
                self.telemetry.record_error(&err, "tick");
                Err(err)
            }
        }
    }

    /// Feed a sample and publish the channel's updated statistics
    pub fn push_sample(
        &mut self,
        channel: ChannelId,
        value: f64,
    ) -> Result<WaveStatistics, AcquisitionError> {
        match self.acquisition.push_sample(channel, value) {
            Ok(statistics) => {
                self.telemetry.publish(ConsoleEvent::Statistics {
                    channel,
                    statistics,
                });
                Ok(statistics)
            }
            Err(err) => {
                self.telemetry.record_error(&err, "push_sample");
                Err(err)
            }
        }
    }

    pub fn acquisition_session(&self) -> AcquisitionSession {
        self.acquisition.session()
    }

    pub fn statistics(&self, channel: ChannelId) -> Option<WaveStatistics> {
        self.acquisition.statistics(channel)
    }

    pub fn all_statistics(&self) -> Vec<(ChannelId, WaveStatistics)> {
        self.acquisition.snapshot_all()
    }

    // ========================================================================
    // CALIBRATION
    // ========================================================================

    /// Start calibrating a sensor over the configured target heights
    pub fn start_calibration(&mut self, sensor: &str) -> Result<(), CalibrationError> {
        let targets = self.config.calibration.target_heights.clone();
        self.start_calibration_with(sensor, &targets)
    }

    /// Start calibrating a sensor over explicit target heights
    pub fn start_calibration_with(
        &mut self,
        sensor: &str,
        target_heights: &[f64],
    ) -> Result<(), CalibrationError> {
        let result = self.calibration.start(sensor, target_heights);
        self.after_calibration(sensor, result, "start_calibration")
    }

    pub fn update_calibration_reading(
        &mut self,
        sensor: &str,
        measured_value: f64,
    ) -> Result<(), CalibrationError> {
        let result = self.calibration.update_reading(sensor, measured_value);
        self.after_calibration(sensor, result, "update_reading")
    }

    pub fn confirm_calibration_point(
        &mut self,
        sensor: &str,
        measured_value: f64,
    ) -> Result<ConfirmOutcome, CalibrationError> {
        let result = self.calibration.confirm(sensor, measured_value);
        self.after_confirm(sensor, result, "confirm_point")
    }

    pub fn confirm_calibration_reading(
        &mut self,
        sensor: &str,
    ) -> Result<ConfirmOutcome, CalibrationError> {
        let result = self.calibration.confirm_reading(sensor);
        self.after_confirm(sensor, result, "confirm_reading")
    }

    pub fn abort_calibration(&mut self, sensor: &str) -> Result<(), CalibrationError> {
        let result = self.calibration.abort(sensor);
        self.after_calibration(sensor, result, "abort_calibration")
    }

    pub fn reset_sensor(&mut self, sensor: &str) -> Result<(), CalibrationError> {
        match self.calibration.reset_sensor(sensor) {
            Ok(()) => Ok(()),
            Err(err) => {
                self.telemetry.record_error(&err, "reset_sensor");
                Err(err)
            }
        }
    }

    pub fn sensor_calibration(&self, sensor: &str) -> Option<SensorCalibration> {
        self.calibration.calibration(sensor)
    }

    pub fn sensor_calibrations(&self) -> Vec<SensorCalibration> {
        self.calibration.calibrations()
    }

    pub fn calibration_fit(&self, sensor: &str) -> Option<LinearFit> {
        self.calibration.fit(sensor)
    }

    pub fn calibration_progress(&self, sensor: &str) -> Option<CalibrationProgress> {
        self.calibration.progress(sensor)
    }

    // ========================================================================
    // EVENT FEED
    // ========================================================================

    pub fn subscribe(&self) -> broadcast::Receiver<ConsoleEvent> {
        self.telemetry.subscribe()
    }

    pub fn telemetry_snapshot(&self) -> TelemetrySnapshot {
        self.telemetry.snapshot()
    }

    fn publish_session(&mut self) {
        let session = self.acquisition.session();
        self.telemetry.publish(ConsoleEvent::AcquisitionStatus {
            status: session.status(),
            elapsed_seconds: session.elapsed_seconds(),
            progress_fraction: session.progress_fraction(),
            stop_reason: session.stop_reason(),
        });
    }

    fn publish_progress(&mut self, sensor: &str) {
        if let Some(progress) = self.calibration.progress(sensor) {
            self.telemetry
                .publish(ConsoleEvent::CalibrationProgress(progress));
        }
    }

    fn after_acquisition(
        &mut self,
        result: Result<(), AcquisitionError>,
        context: &str,
    ) -> Result<(), AcquisitionError> {
        match result {
            Ok(()) => {
                self.publish_session();
                Ok(())
            }
            Err(err) => {
                self.telemetry.record_error(&err, context);
                Err(err)
            }
        }
    }

    fn after_calibration(
        &mut self,
        sensor: &str,
        result: Result<(), CalibrationError>,
        context: &str,
    ) -> Result<(), CalibrationError> {
        match result {
            Ok(()) => {
                self.publish_progress(sensor);
                Ok(())
            }
            Err(err) => {
                self.telemetry.record_error(&err, context);
                Err(err)
            }
        }
    }

    fn after_confirm(
        &mut self,
        sensor: &str,
        result: Result<ConfirmOutcome, CalibrationError>,
        context: &str,
    ) -> Result<ConfirmOutcome, CalibrationError> {
        match result {
            Ok(outcome) => {
                self.publish_progress(sensor);
                if let ConfirmOutcome::Completed { fit } = outcome {
                    self.telemetry.publish(ConsoleEvent::CalibrationCompleted {
                        sensor_id: sensor.to_string(),
                        fit,
                    });
                }
                Ok(outcome)
            }
            Err(err) => {
                self.telemetry.record_error(&err, context);
                Err(err)
            }
        }
    }
}

impl Default for ConsoleContext {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

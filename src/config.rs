//! Configuration management for acquisition and calibration runs
//!
//! This module provides runtime configuration loading from JSON files so the
//! console can change window sizes, sampling rates and calibration targets
//! without recompilation. Values are validated when a session starts, at the
//! call that introduces them.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::acquisition::AcquisitionSettings;
use crate::calibration::CalibrationValidator;
use crate::error::{AcquisitionError, CalibrationError};

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub acquisition: AcquisitionConfig,
    #[serde(default)]
    pub calibration: CalibrationConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Acquisition session parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcquisitionConfig {
    /// Samples kept per channel window (N)
    pub window_size: usize,
    /// Nominal sample rate of the feed in Hz
    pub sampling_rate_hz: f64,
    /// Session length in seconds
    pub duration_seconds: f64,
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            window_size: 300,
            sampling_rate_hz: 10.0,
            duration_seconds: 600.0,
        }
    }
}

impl AcquisitionConfig {
    /// Validate and convert into session settings
    pub fn validate(&self) -> Result<AcquisitionSettings, AcquisitionError> {
        AcquisitionSettings::new(self.window_size, self.sampling_rate_hz, self.duration_seconds)
    }
}

/// Calibration run parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalibrationConfig {
    /// Reference heights visited in order (cm)
    pub target_heights: Vec<f64>,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            target_heights: vec![-10.0, -5.0, 0.0, 5.0, 10.0],
        }
    }
}

impl CalibrationConfig {
    pub fn validate(&self) -> Result<(), CalibrationError> {
        CalibrationValidator::validate_targets(&self.target_heights)
    }
}

/// Event feed sizing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Broadcast channel capacity for display subscribers
    pub channel_capacity: usize,
    /// Events retained for late subscribers
    pub history_capacity: usize,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 256,
            history_capacity: 64,
        }
    }
}

impl AppConfig {
    /// Load configuration from JSON file
    ///
    /// # Arguments
    /// * `path` - Path to JSON config file
    ///
    /// # Returns
    /// The parsed configuration, or defaults if the file is missing or the
    /// JSON is invalid (a warning is logged either way)
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    log::info!("[Config] Loaded configuration from {:?}", path.as_ref());
                    config
                }
                Err(err) => {
                    log::warn!(
                        "[Config] Failed to parse JSON from {:?}: {}. Using defaults.",
                        path.as_ref(),
                        err
                    );
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!(
                    "[Config] Failed to read config file {:?}: {}. Using defaults.",
                    path.as_ref(),
                    err
                );
                Self::default()
            }
        }
    }

    /// Load configuration from the default location
    pub fn load() -> Self {
        Self::load_from_file("assets/wave_config.json")
    }
}

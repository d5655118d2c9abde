// Progress tracking for calibration workflow
//
// This module provides the progress payload sent to display collaborators
// while a sensor walks through its target heights.

use super::state::{CalibrationStatus, SensorId};

/// Progress information for the current calibration step
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CalibrationProgress {
    pub sensor_id: SensorId,
    pub status: CalibrationStatus,
    /// Index of the target currently being measured
    pub current_index: usize,
    /// Total number of targets in the run
    pub target_count: usize,
    /// Reference height to set the sensor to, `None` outside a run
    pub current_target: Option<f64>,
    /// Points confirmed so far in this run
    pub points_confirmed: usize,
    /// Latest unconfirmed live reading
    pub live_reading: Option<f64>,
}

impl CalibrationProgress {
    /// Check if the run has confirmed every target
    pub fn is_complete(&self) -> bool {
        self.status == CalibrationStatus::Completed
    }

    /// Get progress percentage (0-100)
    pub fn percentage(&self) -> u8 {
        if self.target_count == 0 {
            return 0;
        }
        ((self.points_confirmed as f32 / self.target_count as f32) * 100.0) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress(points_confirmed: usize, target_count: usize) -> CalibrationProgress {
        CalibrationProgress {
            sensor_id: "WG-01".to_string(),
            status: CalibrationStatus::InProgress,
            current_index: points_confirmed.min(target_count.saturating_sub(1)),
            target_count,
            current_target: Some(0.0),
            points_confirmed,
            live_reading: None,
        }
    }

    #[test]
    fn test_calibration_progress_percentage() {
        assert_eq!(progress(0, 4).percentage(), 0);
        assert_eq!(progress(1, 4).percentage(), 25);
        assert_eq!(progress(2, 4).percentage(), 50);
        assert_eq!(progress(4, 4).percentage(), 100);
    }

    #[test]
    fn test_calibration_progress_percentage_zero_targets() {
        assert_eq!(progress(0, 0).percentage(), 0);
    }

    #[test]
    fn test_is_complete() {
        let mut p = progress(3, 3);
        assert!(!p.is_complete());
        p.status = CalibrationStatus::Completed;
        assert!(p.is_complete());
    }
}

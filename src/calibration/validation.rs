// Input validation for calibration runs
//
// Rejects target lists and measurements that would poison the least-squares
// sums. Validation happens at the call that introduces the value.

use crate::error::CalibrationError;

/// Validator for calibration targets and readings
pub struct CalibrationValidator;

impl CalibrationValidator {
    /// Validate the ordered target heights of a run
    ///
    /// # Validation Rules
    /// * At least one target
    /// * Every target is a finite number
    pub fn validate_targets(targets: &[f64]) -> Result<(), CalibrationError> {
        if targets.is_empty() {
            return Err(CalibrationError::EmptyTargets);
        }

        if let Some((index, &value)) = targets.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(CalibrationError::InvalidTarget { index, value });
        }

        Ok(())
    }

    /// Validate a sensor reading
    pub fn validate_measurement(value: f64) -> Result<(), CalibrationError> {
        if !value.is_finite() {
            return Err(CalibrationError::InvalidMeasurement { value });
        }
        Ok(())
    }
}

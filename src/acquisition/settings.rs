// Validated acquisition settings supplied at session start

use crate::analysis::SamplingRate;
use crate::error::AcquisitionError;

/// Window size, sampling rate and duration of one acquisition
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct AcquisitionSettings {
    window_size: usize,
    sampling_rate: SamplingRate,
    duration_seconds: f64,
}

impl AcquisitionSettings {
    /// Validate raw settings
    ///
    /// # Errors
    /// - `InvalidWindowSize` for a zero window
    /// - `InvalidSamplingRate` for a non-positive or non-finite rate
    /// - `InvalidDuration` for a non-positive or non-finite duration
    pub fn new(
        window_size: usize,
        sampling_rate_hz: f64,
        duration_seconds: f64,
    ) -> Result<Self, AcquisitionError> {
        if window_size == 0 {
            return Err(AcquisitionError::InvalidWindowSize { size: window_size });
        }
        let sampling_rate = SamplingRate::new(sampling_rate_hz)?;
        if !(duration_seconds.is_finite() && duration_seconds > 0.0) {
            return Err(AcquisitionError::InvalidDuration {
                seconds: duration_seconds,
            });
        }

        Ok(Self {
            window_size,
            sampling_rate,
            duration_seconds,
        })
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn sampling_rate(&self) -> SamplingRate {
        self.sampling_rate
    }

    pub fn duration_seconds(&self) -> f64 {
        self.duration_seconds
    }
}

//! Wave statistics over a sample window
//!
//! Every field of [`WaveStatistics`] is a pure function of the window contents
//! and the sampling rate. Windows with fewer than two samples report zero for
//! the significant height and mean period instead of failing, so a live
//! display can show "not yet available" during the first ticks.
//!
//! References:
//! - Tucker, M. J. & Pitt, E. G. (2001). Waves in Ocean Engineering
//! - Holthuijsen, L. H. (2007). Waves in Oceanic and Coastal Waters

use crate::error::AcquisitionError;

/// Sampling rate in Hz, guaranteed positive and finite
///
/// Validation happens once at the boundary; the statistics engine only
/// accepts this type and is therefore infallible.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, serde::Serialize)]
#[serde(transparent)]
pub struct SamplingRate(f64);

impl SamplingRate {
    /// Validate a sampling rate in Hz
    ///
    /// # Errors
    /// `AcquisitionError::InvalidSamplingRate` for zero, negative or non-finite rates
    pub fn new(hz: f64) -> Result<Self, AcquisitionError> {
        if hz.is_finite() && hz > 0.0 {
            Ok(Self(hz))
        } else {
            Err(AcquisitionError::InvalidSamplingRate { rate_hz: hz })
        }
    }

    pub fn hz(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for SamplingRate {
    type Error = AcquisitionError;

    fn try_from(hz: f64) -> Result<Self, Self::Error> {
        Self::new(hz)
    }
}

/// Descriptive statistics of one channel window
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct WaveStatistics {
    /// Number of samples in the window
    pub sample_count: usize,
    /// Arithmetic mean of the window
    pub mean: f64,
    /// Population variance of the window
    pub variance: f64,
    pub max: f64,
    pub min: f64,
    /// H1/3: mean of the highest third of the window values
    pub significant_height: f64,
    /// Sign changes between consecutive samples (up- and down-crossings)
    pub zero_crossings: usize,
    /// Zero-crossing period estimate in seconds (0 when no crossings)
    pub mean_period: f64,
}

impl WaveStatistics {
    /// Compute a full snapshot from a window in arrival order
    pub fn from_window(samples: &[f64], rate: SamplingRate) -> Self {
        if samples.is_empty() {
            return Self::default();
        }

        let (mean, variance) = mean_and_variance(samples);
        let (min, max) = samples
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
                (lo.min(x), hi.max(x))
            });
        let crossings = zero_crossings(samples);

        Self {
            sample_count: samples.len(),
            mean,
            variance,
            max,
            min,
            significant_height: significant_height(samples),
            zero_crossings: crossings,
            mean_period: mean_period(samples.len(), crossings, rate),
        }
    }

    /// Whether the window holds enough samples for period and H1/3
    pub fn is_available(&self) -> bool {
        self.sample_count >= 2
    }
}

/// Mean and population variance (divide by k, not k - 1)
fn mean_and_variance(samples: &[f64]) -> (f64, f64) {
    let k = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / k;
    let variance = samples.iter().map(|&x| (x - mean) * (x - mean)).sum::<f64>() / k;
    (mean, variance)
}

/// Count sign changes between consecutive samples
///
/// Zero is treated as non-negative, so a pair counts when one value is
/// `>= 0` and the other is `< 0`. An exact-zero sample sitting between two
/// negative values therefore counts twice (once up, once down), while one
/// between two positive values counts zero times.
pub fn zero_crossings(samples: &[f64]) -> usize {
    samples
        .windows(2)
        .filter(|pair| {
            let (a, b) = (pair[0], pair[1]);
            (a >= 0.0 && b < 0.0) || (a < 0.0 && b >= 0.0)
        })
        .count()
}

/// H1/3: mean of the top `max(1, floor(k / 3))` values
///
/// Values are sorted descending with a stable sort so ties keep their
/// arrival order. Returns 0 for windows shorter than 2 samples.
pub fn significant_height(samples: &[f64]) -> f64 {
    if samples.len() < 2 {
        return 0.0;
    }

    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| b.total_cmp(a));

    let top = (samples.len() / 3).max(1);
    sorted[..top].iter().sum::<f64>() / top as f64
}

/// Zero-crossing period: `2k / (crossings * rate)`
///
/// Each full wave contributes two crossings, so `k / rate` seconds of data
/// divided by `crossings / 2` waves gives the mean period. Returns 0 for
/// windows shorter than 2 samples or without crossings.
pub fn mean_period(sample_count: usize, crossings: usize, rate: SamplingRate) -> f64 {
    if sample_count < 2 || crossings == 0 {
        return 0.0;
    }
    (2.0 * sample_count as f64) / (crossings as f64 * rate.hz())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rate(hz: f64) -> SamplingRate {
        SamplingRate::new(hz).unwrap()
    }

    #[test]
    fn test_sampling_rate_rejects_non_positive() {
        assert!(SamplingRate::new(0.0).is_err());
        assert!(SamplingRate::new(-10.0).is_err());
        assert!(SamplingRate::new(f64::NAN).is_err());
        assert!(SamplingRate::new(f64::INFINITY).is_err());
        assert_eq!(SamplingRate::new(50.0).unwrap().hz(), 50.0);
        assert!(SamplingRate::try_from(2.5).is_ok());
    }

    #[test]
    fn test_empty_window_is_all_zero() {
        let stats = WaveStatistics::from_window(&[], rate(1.0));
        assert_eq!(stats, WaveStatistics::default());
        assert!(!stats.is_available());
    }

    #[test]
    fn test_single_sample_window() {
        let stats = WaveStatistics::from_window(&[0.7], rate(1.0));
        assert_eq!(stats.sample_count, 1);
        assert_eq!(stats.variance, 0.0);
        assert_eq!(stats.max, 0.7);
        assert_eq!(stats.min, 0.7);
        assert_eq!(stats.significant_height, 0.0);
        assert_eq!(stats.mean_period, 0.0);
    }

    #[test]
    fn test_population_variance() {
        let stats = WaveStatistics::from_window(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0], rate(1.0));
        assert!((stats.mean - 5.0).abs() < 1e-12);
        assert!((stats.variance - 4.0).abs() < 1e-12);
        assert_eq!(stats.max, 9.0);
        assert_eq!(stats.min, 2.0);
    }

    #[test]
    fn test_significant_height_top_third() {
        assert_eq!(significant_height(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]), 5.5);
        assert_eq!(significant_height(&[6.0, 1.0, 5.0, 2.0, 4.0, 3.0]), 5.5);
    }

    #[test]
    fn test_significant_height_small_windows_use_max() {
        // floor(2/3) = 0 -> at least one value
        assert_eq!(significant_height(&[0.2, 0.9]), 0.9);
        assert_eq!(significant_height(&[0.2, 0.9, -0.4]), 0.9);
        assert_eq!(significant_height(&[3.0]), 0.0);
    }

    #[test]
    fn test_zero_crossings_alternating() {
        let samples: Vec<f64> = (0..10)
            .map(|i| if i % 2 == 0 { 1.0 } else { -1.0 })
            .collect();
        assert_eq!(zero_crossings(&samples), 9);
    }

    #[test]
    fn test_zero_crossings_zero_counts_as_non_negative() {
        assert_eq!(zero_crossings(&[1.0, 0.0, 1.0]), 0);
        assert_eq!(zero_crossings(&[-1.0, 0.0, -1.0]), 2);
        assert_eq!(zero_crossings(&[0.0, -0.5]), 1);
        assert_eq!(zero_crossings(&[-0.5, 0.0]), 1);
    }

    #[test]
    fn test_mean_period_closed_form() {
        let samples: Vec<f64> = (0..8)
            .map(|i| if i % 2 == 0 { 1.0 } else { -1.0 })
            .collect();
        let stats = WaveStatistics::from_window(&samples, rate(1.0));
        assert_eq!(stats.zero_crossings, 7);
        assert_eq!(stats.mean_period, 16.0 / 7.0);
    }

    #[test]
    fn test_mean_period_scales_with_rate() {
        assert_eq!(mean_period(100, 20, rate(10.0)), 1.0);
        assert_eq!(mean_period(100, 20, rate(5.0)), 2.0);
    }

    #[test]
    fn test_mean_period_without_crossings() {
        let stats = WaveStatistics::from_window(&[0.1, 0.2, 0.3], rate(1.0));
        assert_eq!(stats.zero_crossings, 0);
        assert_eq!(stats.mean_period, 0.0);
    }
}

//! Linear calibration fit
//!
//! Ordinary least squares of `measured = slope * target + offset` over the
//! confirmed points of one sensor, with R² and RMSE as goodness-of-fit
//! metrics. The fit is a pure function of the point list: it is recomputed in
//! full on every call and never patched incrementally.
//!
//! Degenerate inputs are not errors:
//! - fewer than two confirmed points: no fit
//! - all targets equal: no defined slope, no fit
//! - all measured values equal: the flat line through them, R² = 1.0
//!
//! Both degenerate cases are detected by exact comparison of the inputs, never
//! by a tolerance on the sums, so small-scale data fits like any other.

use super::state::CalibrationPoint;

/// Least-squares transfer function of one sensor
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LinearFit {
    /// Volts per unit of height
    pub slope: f64,
    /// Volts at zero height
    pub offset: f64,
    /// Coefficient of determination
    pub r_squared: f64,
    /// Root-mean-square residual (volts)
    pub rmse: f64,
    /// Number of points the fit was computed from
    pub point_count: usize,
}

impl LinearFit {
    /// Fit the confirmed points of a sensor
    ///
    /// Unconfirmed points are ignored.
    ///
    /// # Returns
    /// * `Some(LinearFit)` - at least two confirmed points with distinct targets
    /// * `None` - not enough data for a line
    pub fn from_points(points: &[CalibrationPoint]) -> Option<Self> {
        let confirmed: Vec<(f64, f64)> = points
            .iter()
            .filter(|p| p.confirmed)
            .map(|p| (p.target_value, p.measured_value))
            .collect();

        if confirmed.len() < 2 {
            return None;
        }

        let (x0, y0) = confirmed[0];
        if confirmed.iter().all(|&(x, _)| x == x0) {
            return None;
        }

        let n = confirmed.len() as f64;
        if confirmed.iter().all(|&(_, y)| y == y0) {
            // Zero measured variance: the flat line is exact, so SSres = SStot = 0
            return Some(Self {
                slope: 0.0,
                offset: y0,
                r_squared: 1.0,
                rmse: 0.0,
                point_count: confirmed.len(),
            });
        }

        let (sum_x, sum_y, sum_xy, sum_xx) = confirmed.iter().fold(
            (0.0, 0.0, 0.0, 0.0),
            |(sx, sy, sxy, sxx), &(x, y)| (sx + x, sy + y, sxy + x * y, sxx + x * x),
        );

        let denominator = n * sum_xx - sum_x * sum_x;
        // Distinct targets whose spread is lost to rounding
        if denominator <= 0.0 {
            return None;
        }

        let slope = (n * sum_xy - sum_x * sum_y) / denominator;
        let offset = (sum_y - slope * sum_x) / n;

        let mean_y = sum_y / n;
        let (ss_res, ss_tot) = confirmed.iter().fold((0.0, 0.0), |(res, tot), &(x, y)| {
            let residual = y - (slope * x + offset);
            (res + residual * residual, tot + (y - mean_y) * (y - mean_y))
        });

        // Measured values differ, so SStot > 0
        let r_squared = 1.0 - ss_res / ss_tot;

        Some(Self {
            slope,
            offset,
            r_squared,
            rmse: (ss_res / n).sqrt(),
            point_count: confirmed.len(),
        })
    }

    /// Expected sensor output for a reference height
    pub fn predict(&self, target_value: f64) -> f64 {
        self.slope * target_value + self.offset
    }

    /// Height corresponding to a sensor output
    ///
    /// Returns `None` for a flat transfer function (zero slope).
    pub fn invert(&self, measured_value: f64) -> Option<f64> {
        if self.slope == 0.0 {
            return None;
        }
        Some((measured_value - self.offset) / self.slope)
    }
}

// CalibrationFitEngine - confirmed point lists and linear fits per sensor
//
// The engine is a leaf: it stores points and computes fits, nothing else.
// Workflow rules (which target comes next, when a run is complete) live in
// CalibrationProcedure.

use std::collections::BTreeMap;

use super::fit::LinearFit;
use super::state::{now_ms, CalibrationPoint, SensorId};

/// Per-sensor ordered point lists with on-demand least-squares fits
#[derive(Debug, Clone, Default)]
pub struct CalibrationFitEngine {
    sensors: BTreeMap<SensorId, Vec<CalibrationPoint>>,
}

impl CalibrationFitEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a confirmed point captured now
    pub fn add_point(&mut self, sensor: &str, target_value: f64, measured_value: f64) {
        self.record(
            sensor,
            CalibrationPoint::confirmed(target_value, measured_value, now_ms()),
        );
    }

    /// Append an already-built point (insertion order = target order)
    pub fn record(&mut self, sensor: &str, point: CalibrationPoint) {
        self.sensors
            .entry(sensor.to_string())
            .or_default()
            .push(point);
    }

    /// Least-squares fit of the sensor's confirmed points
    ///
    /// Always a full recompute over the current point list; `None` while
    /// fewer than two confirmed points exist.
    pub fn fit(&self, sensor: &str) -> Option<LinearFit> {
        self.sensors
            .get(sensor)
            .and_then(|points| LinearFit::from_points(points))
    }

    /// Points recorded for a sensor, empty if unknown
    pub fn points(&self, sensor: &str) -> &[CalibrationPoint] {
        self.sensors.get(sensor).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of confirmed points for a sensor
    pub fn confirmed_count(&self, sensor: &str) -> usize {
        self.points(sensor).iter().filter(|p| p.confirmed).count()
    }

    /// Replace a sensor's point list wholesale
    ///
    /// # Returns
    /// The previous point list
    pub fn replace_points(
        &mut self,
        sensor: &str,
        points: Vec<CalibrationPoint>,
    ) -> Vec<CalibrationPoint> {
        self.sensors
            .insert(sensor.to_string(), points)
            .unwrap_or_default()
    }

    /// Drop every point recorded for a sensor
    pub fn clear_sensor(&mut self, sensor: &str) -> Vec<CalibrationPoint> {
        self.sensors.remove(sensor).unwrap_or_default()
    }

    pub fn contains(&self, sensor: &str) -> bool {
        self.sensors.contains_key(sensor)
    }

    /// Known sensor ids in sorted order
    pub fn sensors(&self) -> impl Iterator<Item = &str> + '_ {
        self.sensors.keys().map(String::as_str)
    }
}

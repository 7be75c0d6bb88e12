use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Coerces raw numeric input the way the original pages did: anything
/// non-finite or negative becomes 0 instead of an error.
pub fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// User-entered driving quantities for a page.
///
/// Worker days and piece counts are keyed by catalog item key. Piece counts
/// may be entered fractional but are always billed ceiled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BaseMeasurements {
    #[serde(default)]
    pub area: f64,
    #[serde(default)]
    pub linear_length: f64,
    #[serde(default)]
    pub volume: f64,
    #[serde(default)]
    pub worker_days: HashMap<String, f64>,
    #[serde(default)]
    pub piece_counts: HashMap<String, f64>,
}

impl BaseMeasurements {
    pub fn set_area(&mut self, m2: f64) {
        self.area = sanitize(m2);
    }

    pub fn set_linear_length(&mut self, lm: f64) {
        self.linear_length = sanitize(lm);
    }

    pub fn set_volume(&mut self, m3: f64) {
        self.volume = sanitize(m3);
    }

    pub fn set_worker_days(&mut self, key: &str, days: f64) {
        self.worker_days.insert(key.to_string(), sanitize(days));
    }

    pub fn set_piece_count(&mut self, key: &str, count: f64) {
        self.piece_counts.insert(key.to_string(), sanitize(count));
    }

    pub fn worker_days(&self, key: &str) -> f64 {
        self.worker_days.get(key).copied().unwrap_or(0.0)
    }

    /// Billable count for a manually entered piece item: raw input ceiled.
    pub fn piece_count(&self, key: &str) -> f64 {
        self.piece_counts.get(key).copied().unwrap_or(0.0).ceil()
    }

    pub fn total_worker_days(&self) -> f64 {
        self.worker_days.values().sum()
    }
}

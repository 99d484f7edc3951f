use serde::{Deserialize, Serialize};

use crate::units::MetricUnit;

/// Per-unit fractions with a table-wide fallback for any unit left unset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitTable {
    pub default: f64,
    #[serde(default)]
    pub count: Option<f64>,
    #[serde(default)]
    pub percent: Option<f64>,
    #[serde(default)]
    pub gold: Option<f64>,
    #[serde(default)]
    pub xp: Option<f64>,
    #[serde(default)]
    pub time: Option<f64>,
}

impl UnitTable {
    pub fn get(&self, unit: MetricUnit) -> f64 {
        let entry = match unit {
            MetricUnit::Count => self.count,
            MetricUnit::Percent => self.percent,
            MetricUnit::Gold => self.gold,
            MetricUnit::Xp => self.xp,
            MetricUnit::Time => self.time,
        };
        entry.unwrap_or(self.default)
    }
}

/// How far past the target (as a fraction of it) still reads as "warn".
pub const STATUS_TOLERANCE: UnitTable = UnitTable {
    default: 0.10,
    count: Some(0.08),
    percent: Some(0.05),
    gold: Some(0.10),
    xp: Some(0.10),
    time: Some(0.05),
};

/// Minimum normalized change before a trend stops being "flat".
pub const TREND_EPSILON: UnitTable = UnitTable {
    default: 0.04,
    count: Some(0.06),
    percent: Some(0.03),
    gold: Some(0.05),
    xp: Some(0.05),
    time: Some(0.015),
};

/// Baselines smaller than this normalize against 1 instead.
pub const BASELINE_FLOOR: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub status_tolerance: UnitTable,
    pub trend_epsilon: UnitTable,
}

pub const DEFAULT_THRESHOLDS: Thresholds = Thresholds {
    status_tolerance: STATUS_TOLERANCE,
    trend_epsilon: TREND_EPSILON,
};

impl Default for Thresholds {
    fn default() -> Self {
        DEFAULT_THRESHOLDS
    }
}

#[cfg(test)]
mod tests {
    use super::{STATUS_TOLERANCE, Thresholds, UnitTable};
    use crate::units::MetricUnit;

    #[test]
    fn unset_units_fall_back_to_default() {
        let table: UnitTable = serde_json::from_str(r#"{"default":0.2,"time":0.01}"#).unwrap();
        assert_eq!(table.get(MetricUnit::Time), 0.01);
        assert_eq!(table.get(MetricUnit::Gold), 0.2);
    }

    #[test]
    fn partial_thresholds_keep_builtin_tables() {
        let t: Thresholds =
            serde_json::from_str(r#"{"trend_epsilon":{"default":0.5}}"#).unwrap();
        assert_eq!(t.status_tolerance, STATUS_TOLERANCE);
        assert_eq!(t.trend_epsilon.get(MetricUnit::Count), 0.5);
    }
}

use crate::thresholds::{BASELINE_FLOOR, DEFAULT_THRESHOLDS, Thresholds};
use crate::units::{MetricMode, MetricStatus, MetricUnit, TrendDirection, usable};

pub fn classify_status(
    value: Option<f64>,
    target: Option<f64>,
    mode: MetricMode,
    unit: MetricUnit,
) -> MetricStatus {
    classify_status_with(&DEFAULT_THRESHOLDS, value, target, mode, unit)
}

pub fn classify_status_with(
    thresholds: &Thresholds,
    value: Option<f64>,
    target: Option<f64>,
    mode: MetricMode,
    unit: MetricUnit,
) -> MetricStatus {
    let (Some(v), Some(t)) = (usable(value), usable(target)) else {
        return MetricStatus::Neutral;
    };
    let tolerance = thresholds.status_tolerance.get(unit);

    // Multiplicative bands only: a zero target is valid input.
    if mode.smaller_is_better() {
        if v <= t {
            MetricStatus::Ok
        } else if v <= t * (1.0 + tolerance) {
            MetricStatus::Warn
        } else {
            MetricStatus::Bad
        }
    } else if v >= t {
        MetricStatus::Ok
    } else if v >= t * (1.0 - tolerance) {
        MetricStatus::Warn
    } else {
        MetricStatus::Bad
    }
}

pub fn classify_trend(
    value: Option<f64>,
    baseline: Option<f64>,
    mode: MetricMode,
    unit: MetricUnit,
) -> TrendDirection {
    classify_trend_with(&DEFAULT_THRESHOLDS, value, baseline, mode, unit)
}

pub fn classify_trend_with(
    thresholds: &Thresholds,
    value: Option<f64>,
    baseline: Option<f64>,
    mode: MetricMode,
    unit: MetricUnit,
) -> TrendDirection {
    let (Some(v), Some(b)) = (usable(value), usable(baseline)) else {
        return TrendDirection::Flat;
    };
    let delta = v - b;
    let magnitude = if b.abs() < BASELINE_FLOOR { 1.0 } else { b.abs() };
    let mut normalized = delta / magnitude;
    // Positive always means "got better".
    if mode.smaller_is_better() {
        normalized = -normalized;
    }

    let epsilon = thresholds.trend_epsilon.get(unit);
    if normalized > epsilon {
        TrendDirection::Up
    } else if normalized < -epsilon {
        TrendDirection::Down
    } else {
        TrendDirection::Flat
    }
}

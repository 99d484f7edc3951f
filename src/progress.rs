use crate::units::{MetricMode, usable};

pub fn clamp01(n: f64) -> f64 {
    if n.is_nan() { 0.0 } else { n.clamp(0.0, 1.0) }
}

/// Completion ratio for the progress ribbon, always within `[0, 1]`.
pub fn progress(value: Option<f64>, target: Option<f64>, mode: MetricMode) -> f64 {
    let (Some(v), Some(t)) = (usable(value), usable(target)) else {
        return 0.0;
    };
    if t == 0.0 {
        return 0.0;
    }
    if mode.smaller_is_better() {
        let denom = if v == 0.0 { f64::EPSILON } else { v };
        clamp01(t / denom)
    } else {
        clamp01(v / t)
    }
}

pub fn progress_percent(ratio: f64) -> u8 {
    (clamp01(ratio) * 100.0).round() as u8
}

/// Low-confidence readings fade the ribbon but never hide it.
pub fn ribbon_opacity(confidence: Option<f64>) -> f64 {
    match confidence {
        Some(c) => 0.3 + clamp01(c) * 0.7,
        None => 1.0,
    }
}

use crate::classify::classify_status_with;
use crate::format::format_value;
use crate::thresholds::{DEFAULT_THRESHOLDS, Thresholds};
use crate::units::{MetricMode, MetricStatus, MetricUnit, TrendDirection, usable};

pub fn mode_label(mode: MetricMode) -> &'static str {
    match mode {
        MetricMode::HigherIsBetter => "Higher is better",
        MetricMode::LowerIsBetter => "Lower is better",
        MetricMode::EarlierIsBetter => "Earlier is better",
    }
}

pub fn trend_narrative(direction: TrendDirection) -> &'static str {
    match direction {
        TrendDirection::Up => "improving",
        TrendDirection::Down => "declining",
        TrendDirection::Flat => "holding steady",
    }
}

pub fn trend_glyph(direction: TrendDirection) -> &'static str {
    match direction {
        TrendDirection::Up => "▲",
        TrendDirection::Down => "▼",
        TrendDirection::Flat => "—",
    }
}

pub fn goal_delta_phrase(
    value: Option<f64>,
    target: Option<f64>,
    mode: MetricMode,
    unit: MetricUnit,
) -> &'static str {
    goal_delta_phrase_with(&DEFAULT_THRESHOLDS, value, target, mode, unit)
}

pub fn goal_delta_phrase_with(
    thresholds: &Thresholds,
    value: Option<f64>,
    target: Option<f64>,
    mode: MetricMode,
    unit: MetricUnit,
) -> &'static str {
    let value = usable(value);
    let target = usable(target);
    if value.is_none() {
        return "Last 5 pending more data.";
    }
    if target.is_none() {
        return "Goal not set yet.";
    }
    match classify_status_with(thresholds, value, target, mode, unit) {
        MetricStatus::Ok => "Last 5 leading vs target.",
        MetricStatus::Warn => "Last 5 near target.",
        MetricStatus::Bad | MetricStatus::Neutral => "Last 5 trailing target.",
    }
}

pub fn micro_copy(
    value: Option<f64>,
    target: Option<f64>,
    mode: MetricMode,
    unit: MetricUnit,
) -> String {
    micro_copy_with(&DEFAULT_THRESHOLDS, value, target, mode, unit)
}

/// One-line card caption. Each of the four value/target presence cases
/// renders differently.
pub fn micro_copy_with(
    thresholds: &Thresholds,
    value: Option<f64>,
    target: Option<f64>,
    mode: MetricMode,
    unit: MetricUnit,
) -> String {
    match (usable(value), usable(target)) {
        (None, None) => "Goal not set yet — play more matches to calibrate.".to_string(),
        (None, Some(t)) => format!(
            "Goal {} · {} · Need more data from upcoming games.",
            format_value(unit, Some(t)),
            mode_label(mode)
        ),
        (Some(_), None) => "Goal not set yet — set a target to unlock tracking.".to_string(),
        (Some(v), Some(t)) => format!(
            "Goal {} · {} · {}",
            format_value(unit, Some(t)),
            mode_label(mode),
            goal_delta_phrase_with(thresholds, Some(v), Some(t), mode, unit)
        ),
    }
}

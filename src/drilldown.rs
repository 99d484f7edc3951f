use serde::Serialize;

use crate::catalog::MetricMeta;
use crate::classify::{classify_status_with, classify_trend_with};
use crate::coaching::suggest_with;
use crate::config::EngineConfig;
use crate::distribution::{DistributionSummary, summarize};
use crate::format::normalize_value;
use crate::matches::{MatchRow, metric_samples};
use crate::narrative::{goal_delta_phrase_with, micro_copy_with, trend_glyph, trend_narrative};
use crate::progress::progress;
use crate::units::{MetricMode, MetricStatus, MetricUnit, TrendDirection, finite_samples};
use crate::windows::baseline;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrilldownReport {
    pub metric_id: String,
    pub unit: MetricUnit,
    pub mode: MetricMode,
    pub value: Option<f64>,
    pub target: Option<f64>,
    pub baseline: Option<f64>,
    pub status: MetricStatus,
    pub trend: TrendDirection,
    pub trend_text: &'static str,
    pub trend_glyph: &'static str,
    pub goal_delta: &'static str,
    pub micro_copy: String,
    pub progress: f64,
    pub distribution: DistributionSummary,
    pub suggestions: Vec<String>,
}

/// Everything a metric card and its drawer show. `series` is only used when
/// none of `rows` carries a value for the metric.
pub fn build_drilldown(
    cfg: &EngineConfig,
    metric_id: &str,
    meta: MetricMeta,
    target: Option<f64>,
    rows: &[MatchRow],
    series: &[Option<f64>],
) -> DrilldownReport {
    let unit = meta.unit;
    let mode = meta.mode;
    let target = normalize_value(unit, target);

    let from_rows = metric_samples(rows, metric_id, unit);
    let pool: Vec<Option<f64>> = if finite_samples(&from_rows).is_empty() {
        series.iter().map(|v| normalize_value(unit, *v)).collect()
    } else {
        from_rows
    };

    let values = finite_samples(&pool);
    let recent = &values[values.len().saturating_sub(cfg.coaching.recent_window.max(1))..];
    let value = if recent.is_empty() {
        None
    } else {
        Some(recent.iter().sum::<f64>() / recent.len() as f64)
    };
    let baseline = baseline(&pool, cfg.baseline_window);

    let th = &cfg.thresholds;
    let trend = classify_trend_with(th, value, baseline, mode, unit);
    DrilldownReport {
        metric_id: metric_id.to_string(),
        unit,
        mode,
        value,
        target,
        baseline,
        status: classify_status_with(th, value, target, mode, unit),
        trend,
        trend_text: trend_narrative(trend),
        trend_glyph: trend_glyph(trend),
        goal_delta: goal_delta_phrase_with(th, value, target, mode, unit),
        micro_copy: micro_copy_with(th, value, target, mode, unit),
        progress: progress(value, target, mode),
        distribution: summarize(&pool),
        suggestions: suggest_with(&cfg.coaching, mode, target, &pool)
            .into_iter()
            .map(|s| s.text().to_string())
            .collect(),
    }
}

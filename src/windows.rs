use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::distribution::percentile;
use crate::matches::{MatchRow, metric_samples};
use crate::units::{MetricUnit, finite_samples};

pub const TREND_HALF_LIFE_GAMES: f64 = 10.0;
pub const SPARK_LEN: usize = 8;
const BLOCKS: [char; 7] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowSpec {
    /// Most recent N matches.
    Count(usize),
    /// Matches created within the last N days.
    Days(u32),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RollingWindow {
    pub spec: WindowSpec,
    pub value: Option<f64>,
    pub n: usize,
    pub trend: Option<f64>,
    pub spark: String,
}

/// Exponentially weighted mean, oldest value first.
pub fn ewma(values: &[f64], half_life_games: f64) -> Option<f64> {
    let (first, rest) = values.split_first()?;
    let alpha = 1.0 - 0.5_f64.powf(1.0 / half_life_games.max(1e-6));
    Some(
        rest.iter()
            .fold(*first, |acc, v| alpha * v + (1.0 - alpha) * acc),
    )
}

pub fn sparkline(values: &[f64]) -> String {
    if values.is_empty() {
        return String::new();
    }
    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if hi - lo < 1e-6 {
        return BLOCKS[0].to_string().repeat(values.len());
    }
    let top = (BLOCKS.len() - 1) as f64;
    values
        .iter()
        .map(|v| {
            let idx = ((v - lo) / (hi - lo) * top) as usize;
            BLOCKS[idx.min(BLOCKS.len() - 1)]
        })
        .collect()
}

pub fn window_mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    Some((mean * 100.0).round() / 100.0)
}

/// Median of the last `window` usable samples.
pub fn baseline(samples: &[Option<f64>], window: usize) -> Option<f64> {
    let values = finite_samples(samples);
    let tail = &values[values.len().saturating_sub(window.max(1))..];
    let mut sorted = tail.to_vec();
    sorted.sort_by(f64::total_cmp);
    percentile(&sorted, 0.5)
}

pub fn rolling_windows(
    rows: &[MatchRow],
    metric_id: &str,
    unit: MetricUnit,
    specs: &[WindowSpec],
    now: DateTime<Utc>,
) -> Vec<RollingWindow> {
    specs
        .iter()
        .map(|spec| {
            let subset: &[MatchRow] = match *spec {
                WindowSpec::Count(n) => &rows[rows.len().saturating_sub(n)..],
                WindowSpec::Days(days) => {
                    let cutoff = (now - Duration::days(i64::from(days))).timestamp_millis();
                    let start = rows
                        .iter()
                        .position(|r| r.game_creation_ms >= cutoff)
                        .unwrap_or(rows.len());
                    &rows[start..]
                }
            };
            let series = finite_samples(&metric_samples(subset, metric_id, unit));
            RollingWindow {
                spec: *spec,
                value: window_mean(&series),
                n: subset.len(),
                trend: ewma(&series, TREND_HALF_LIFE_GAMES).map(|t| (t * 100.0).round() / 100.0),
                spark: sparkline(&series[series.len().saturating_sub(SPARK_LEN)..]),
            }
        })
        .collect()
}

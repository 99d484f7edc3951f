use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{MetricMeta, PRIMARY_METRICS, metric_meta, metric_meta_or};
use crate::coaching::CoachingParams;
use crate::thresholds::Thresholds;
use crate::units::{MetricMode, MetricUnit};
use crate::windows::WindowSpec;

pub const CONFIG_PATH_ENV: &str = "LOLTRACK_ENGINE_CONFIG";
pub const BASELINE_WINDOW: usize = 10;

/// Per-metric unit/mode replacement. Tags go through the same parser as
/// everywhere else, so `"rate"` reads as percent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricOverride {
    pub unit: Option<MetricUnit>,
    pub mode: Option<MetricMode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub thresholds: Thresholds,
    pub coaching: CoachingParams,
    pub windows: Vec<WindowSpec>,
    pub baseline_window: usize,
    pub primary_metrics: Vec<String>,
    /// Percent targets may be written as fractions (0.55) or percents (55);
    /// they are normalized when a report is built.
    pub targets: HashMap<String, f64>,
    pub metrics: HashMap<String, MetricOverride>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            coaching: CoachingParams::default(),
            windows: vec![
                WindowSpec::Count(5),
                WindowSpec::Count(10),
                WindowSpec::Count(20),
                WindowSpec::Days(30),
                WindowSpec::Days(60),
            ],
            baseline_window: BASELINE_WINDOW,
            primary_metrics: PRIMARY_METRICS.iter().map(|id| id.to_string()).collect(),
            targets: HashMap::new(),
            metrics: HashMap::new(),
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("parse engine config")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("read engine config {}", path.display()))?;
        Self::from_json_str(&raw).with_context(|| format!("in {}", path.display()))
    }

    /// Config file named by `LOLTRACK_ENGINE_CONFIG` (or defaults), then
    /// scalar overrides from the environment.
    pub fn from_env() -> Result<Self> {
        let mut cfg = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::load(Path::new(path.trim()))?,
            _ => {
                debug!("{CONFIG_PATH_ENV} not set, using built-in engine config");
                Self::default()
            }
        };
        cfg.apply_overrides(|key| std::env::var(key).ok());
        Ok(cfg)
    }

    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let read = |key: &str| lookup(key).and_then(|val| val.trim().parse::<usize>().ok());
        if let Some(n) = read("LOLTRACK_RECENT_WINDOW") {
            self.coaching.recent_window = n.max(1);
        }
        if let Some(n) = read("LOLTRACK_MAX_SUGGESTIONS") {
            self.coaching.max_suggestions = n.max(1);
        }
        if let Some(n) = read("LOLTRACK_BASELINE_WINDOW") {
            self.baseline_window = n.max(1);
        }
    }

    pub fn target_for(&self, metric_id: &str) -> Option<f64> {
        self.targets.get(metric_id).copied()
    }

    /// Catalog entry with any configured override applied. Ids missing from
    /// the catalog resolve only when an override exists for them.
    pub fn metric_meta(&self, metric_id: &str) -> Option<MetricMeta> {
        let over = self.metrics.get(metric_id);
        let base = match (metric_meta(metric_id), over) {
            (Some(meta), _) => meta,
            (None, Some(_)) => metric_meta_or(metric_id, None),
            (None, None) => return None,
        };
        let over = over.copied().unwrap_or_default();
        Some(MetricMeta {
            unit: over.unit.unwrap_or(base.unit),
            mode: over.mode.unwrap_or(base.mode),
            ..base
        })
    }
}

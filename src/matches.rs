use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::format::normalize_value;
use crate::units::MetricUnit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchResult {
    Win,
    Lose,
}

/// One per-match row as supplied by the backend. Rows are chronological,
/// oldest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchRow {
    #[serde(default)]
    pub match_id: String,
    #[serde(default)]
    pub game_creation_ms: i64,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub champion_id: Option<u32>,
    #[serde(default)]
    pub result: Option<MatchResult>,
    #[serde(default)]
    pub cs10: Option<f64>,
    #[serde(default)]
    pub cs14: Option<f64>,
    #[serde(default)]
    pub gd10: Option<f64>,
    #[serde(default)]
    pub xpd10: Option<f64>,
    #[serde(default)]
    pub dl14: Option<f64>,
    #[serde(default)]
    pub ctrl_wards_pre14: Option<f64>,
    #[serde(default)]
    pub first_recall_s: Option<f64>,
    #[serde(default)]
    pub kp_early: Option<f64>,
}

impl MatchRow {
    pub fn metric_value(&self, metric_id: &str) -> Option<f64> {
        match metric_id {
            "CS10" => self.cs10,
            "CS14" => self.cs14,
            "GD10" => self.gd10,
            "XPD10" => self.xpd10,
            "DL14" => self.dl14,
            "CtrlWardsPre14" => self.ctrl_wards_pre14,
            "FirstRecall" => self.first_recall_s,
            "KPEarly" => self.kp_early,
            _ => None,
        }
    }
}

/// One entry per row, normalized for `unit`; missing values stay `None`.
pub fn metric_samples(rows: &[MatchRow], metric_id: &str, unit: MetricUnit) -> Vec<Option<f64>> {
    rows.iter()
        .map(|row| normalize_value(unit, row.metric_value(metric_id)))
        .collect()
}

pub fn parse_match_rows_json(raw: &str) -> Result<Vec<MatchRow>> {
    serde_json::from_str(raw).context("parse match rows json")
}

use std::fmt;
use std::str::FromStr;

use anyhow::{Error, anyhow};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum MetricUnit {
    Count,
    Percent,
    Gold,
    Xp,
    Time,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum MetricMode {
    HigherIsBetter,
    LowerIsBetter,
    EarlierIsBetter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricStatus {
    Ok,
    Warn,
    Bad,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Up,
    Down,
    Flat,
}

impl MetricUnit {
    pub const ALL: [MetricUnit; 5] = [
        MetricUnit::Count,
        MetricUnit::Percent,
        MetricUnit::Gold,
        MetricUnit::Xp,
        MetricUnit::Time,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MetricUnit::Count => "count",
            MetricUnit::Percent => "percent",
            MetricUnit::Gold => "gold",
            MetricUnit::Xp => "xp",
            MetricUnit::Time => "time",
        }
    }
}

impl MetricMode {
    pub const ALL: [MetricMode; 3] = [
        MetricMode::HigherIsBetter,
        MetricMode::LowerIsBetter,
        MetricMode::EarlierIsBetter,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MetricMode::HigherIsBetter => "higher_is_better",
            MetricMode::LowerIsBetter => "lower_is_better",
            MetricMode::EarlierIsBetter => "earlier_is_better",
        }
    }

    /// Lower and earlier share the same arithmetic; they only differ in copy.
    pub fn smaller_is_better(self) -> bool {
        !matches!(self, MetricMode::HigherIsBetter)
    }
}

impl fmt::Display for MetricUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for MetricMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tags are case-insensitive; "rate" is accepted as an alias for percent.
impl FromStr for MetricUnit {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let key = raw.trim();
        if key.eq_ignore_ascii_case("rate") {
            return Ok(MetricUnit::Percent);
        }
        MetricUnit::ALL
            .into_iter()
            .find(|unit| unit.as_str().eq_ignore_ascii_case(key))
            .ok_or_else(|| anyhow!("unknown metric unit: {raw:?}"))
    }
}

impl FromStr for MetricMode {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let key = raw.trim();
        MetricMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(key))
            .ok_or_else(|| anyhow!("unknown metric mode: {raw:?}"))
    }
}

impl TryFrom<String> for MetricUnit {
    type Error = Error;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

impl TryFrom<String> for MetricMode {
    type Error = Error;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

/// Collapses NaN into `None` so callers only deal with one notion of "absent".
pub fn usable(value: Option<f64>) -> Option<f64> {
    value.filter(|v| !v.is_nan())
}

/// Finite samples only; aggregate statistics never see NaN or infinities.
pub fn finite_samples(samples: &[Option<f64>]) -> Vec<f64> {
    samples
        .iter()
        .filter_map(|v| *v)
        .filter(|v| v.is_finite())
        .collect()
}

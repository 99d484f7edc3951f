use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::units::{MetricMode, MetricUnit};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricMeta {
    pub unit: MetricUnit,
    pub mode: MetricMode,
    pub glossary_key: Option<&'static str>,
}

impl MetricMeta {
    pub const fn new(unit: MetricUnit, mode: MetricMode) -> Self {
        Self {
            unit,
            mode,
            glossary_key: None,
        }
    }
}

/// Tracked early-game metrics, in dashboard order.
pub const PRIMARY_METRICS: [&str; 8] = [
    "DL14",
    "CS10",
    "CS14",
    "GD10",
    "XPD10",
    "FirstRecall",
    "CtrlWardsPre14",
    "KPEarly",
];

static CATALOG: Lazy<HashMap<&'static str, MetricMeta>> = Lazy::new(|| {
    use MetricMode::{EarlierIsBetter, HigherIsBetter};
    use MetricUnit::{Count, Gold, Percent, Time, Xp};

    [
        ("DL14", Percent, HigherIsBetter),
        ("CS10", Count, HigherIsBetter),
        ("CS14", Count, HigherIsBetter),
        ("GD10", Gold, HigherIsBetter),
        ("XPD10", Xp, HigherIsBetter),
        ("CtrlWardsPre14", Count, HigherIsBetter),
        ("FirstRecall", Time, EarlierIsBetter),
        ("KPEarly", Percent, HigherIsBetter),
    ]
    .into_iter()
    .map(|(id, unit, mode)| {
        (
            id,
            MetricMeta {
                unit,
                mode,
                glossary_key: Some(id),
            },
        )
    })
    .collect()
});

pub fn metric_meta(metric_id: &str) -> Option<MetricMeta> {
    CATALOG.get(metric_id).copied()
}

pub fn metric_meta_or(metric_id: &str, fallback: Option<MetricMeta>) -> MetricMeta {
    metric_meta(metric_id)
        .or(fallback)
        .unwrap_or(MetricMeta::new(MetricUnit::Count, MetricMode::HigherIsBetter))
}

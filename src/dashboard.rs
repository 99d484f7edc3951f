use rayon::prelude::*;
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::drilldown::{DrilldownReport, build_drilldown};
use crate::matches::MatchRow;

/// One report per configured primary metric, in configured order.
pub fn build_dashboard(cfg: &EngineConfig, rows: &[MatchRow]) -> Vec<DrilldownReport> {
    let metrics: Vec<_> = cfg
        .primary_metrics
        .iter()
        .filter_map(|id| match cfg.metric_meta(id) {
            Some(meta) => Some((id.as_str(), meta)),
            None => {
                warn!(metric = %id, "skipping metric missing from catalog");
                None
            }
        })
        .collect();

    debug!(metrics = metrics.len(), rows = rows.len(), "building dashboard");
    metrics
        .par_iter()
        .map(|(id, meta)| build_drilldown(cfg, id, *meta, cfg.target_for(id), rows, &[]))
        .collect()
}

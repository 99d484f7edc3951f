use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use chrono::Utc;
use tracing::info;

use loltrack_metrics::config::EngineConfig;
use loltrack_metrics::dashboard::build_dashboard;
use loltrack_metrics::drilldown::{DrilldownReport, build_drilldown};
use loltrack_metrics::format::format_value;
use loltrack_metrics::matches::parse_match_rows_json;
use loltrack_metrics::progress::progress_percent;
use loltrack_metrics::windows::rolling_windows;

const DEFAULT_ROWS_PATH: &str = "tests/fixtures/matches.json";

struct Args {
    rows_path: PathBuf,
    config_path: Option<PathBuf>,
    metric: Option<String>,
    json: bool,
}

fn main() {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = parse_args()?;
    let cfg = match &args.config_path {
        Some(path) => {
            let mut cfg = EngineConfig::load(path)?;
            cfg.apply_overrides(|key| std::env::var(key).ok());
            cfg
        }
        None => EngineConfig::from_env()?,
    };

    let raw = fs::read_to_string(&args.rows_path)
        .with_context(|| format!("read match rows {}", args.rows_path.display()))?;
    let rows = parse_match_rows_json(&raw)?;
    info!(rows = rows.len(), path = %args.rows_path.display(), "loaded match rows");

    let reports = match &args.metric {
        Some(id) => {
            let meta = cfg.metric_meta(id).ok_or_else(|| anyhow!("unknown metric id: {id}"))?;
            vec![build_drilldown(&cfg, id, meta, cfg.target_for(id), &rows, &[])]
        }
        None => build_dashboard(&cfg, &rows),
    };

    if args.json {
        let out = serde_json::to_string_pretty(&reports).context("serialize reports")?;
        println!("{out}");
        return Ok(());
    }

    let now = Utc::now();
    for report in &reports {
        print_report(report, cfg.coaching.recent_window);
        for window in rolling_windows(&rows, &report.metric_id, report.unit, &cfg.windows, now) {
            println!(
                "    {:<12} {:>10} n={:<3} {}",
                format!("{:?}", window.spec),
                format_value(report.unit, window.value),
                window.n,
                window.spark
            );
        }
        println!();
    }
    Ok(())
}

fn print_report(report: &DrilldownReport, recent_window: usize) {
    println!(
        "{} {} {:?} ({})",
        report.metric_id,
        report.trend_glyph,
        report.status,
        report.trend_text
    );
    println!(
        "  {}: {}  baseline: {}  progress: {}%",
        recent_label(recent_window),
        format_value(report.unit, report.value),
        format_value(report.unit, report.baseline),
        progress_percent(report.progress)
    );
    println!("  {}", report.micro_copy);
    let dist = &report.distribution;
    if dist.sample_count > 0 {
        println!(
            "  n={} min={} p50={} p75={} max={}",
            dist.sample_count,
            format_value(report.unit, dist.min),
            format_value(report.unit, dist.p50),
            format_value(report.unit, dist.p75),
            format_value(report.unit, dist.max)
        );
        for bin in &dist.bins {
            println!("    {:<16} {}", bin.label, "#".repeat(bin.count));
        }
    }
    for tip in &report.suggestions {
        println!("  - {tip}");
    }
}

fn recent_label(recent_window: usize) -> String {
    format!("last {}", recent_window.max(1))
}

fn parse_args() -> Result<Args> {
    let mut rows_path = None;
    let mut config_path = None;
    let mut metric = None;
    let mut json = false;

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        if arg == "--json" {
            json = true;
        } else if let Some(path) = arg.strip_prefix("--config=") {
            config_path = Some(PathBuf::from(path.trim()));
        } else if arg == "--config" {
            let next = iter.next().context("--config needs a path")?;
            config_path = Some(PathBuf::from(next));
        } else if let Some(id) = arg.strip_prefix("--metric=") {
            metric = Some(id.trim().to_string());
        } else if arg == "--metric" {
            metric = Some(iter.next().context("--metric needs an id")?);
        } else if arg.starts_with("--") {
            return Err(anyhow!("unknown flag: {arg}"));
        } else {
            rows_path = Some(PathBuf::from(arg));
        }
    }

    Ok(Args {
        rows_path: rows_path.unwrap_or_else(|| PathBuf::from(DEFAULT_ROWS_PATH)),
        config_path,
        metric,
        json,
    })
}

#[cfg(test)]
mod tests {
    use super::recent_label;

    #[test]
    fn recent_label_follows_configured_window() {
        assert_eq!(recent_label(5), "last 5");
        assert_eq!(recent_label(8), "last 8");
        assert_eq!(recent_label(0), "last 1");
    }
}

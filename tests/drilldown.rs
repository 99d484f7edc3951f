use std::fs;
use std::path::PathBuf;

use chrono::{TimeZone, Utc};

use loltrack_metrics::catalog::{PRIMARY_METRICS, metric_meta};
use loltrack_metrics::coaching::Suggestion;
use loltrack_metrics::config::EngineConfig;
use loltrack_metrics::dashboard::build_dashboard;
use loltrack_metrics::drilldown::build_drilldown;
use loltrack_metrics::matches::{MatchRow, parse_match_rows_json};
use loltrack_metrics::units::{MetricStatus, TrendDirection};
use loltrack_metrics::windows::{WindowSpec, rolling_windows};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

fn fixture_rows() -> Vec<MatchRow> {
    parse_match_rows_json(&read_fixture("matches.json")).expect("fixture should parse")
}

#[test]
fn cs10_drilldown_from_match_rows() {
    let rows = fixture_rows();
    let cfg = EngineConfig::default();
    let meta = metric_meta("CS10").unwrap();
    let report = build_drilldown(&cfg, "CS10", meta, Some(65.0), &rows, &[]);

    assert_eq!(report.value, Some(67.0));
    assert_eq!(report.baseline, Some(63.5));
    assert_eq!(report.status, MetricStatus::Ok);
    assert_eq!(report.trend, TrendDirection::Flat);
    assert_eq!(report.progress, 1.0);
    assert_eq!(report.goal_delta, "Last 5 leading vs target.");
    assert_eq!(report.micro_copy, "Goal 65 · Higher is better · Last 5 leading vs target.");

    // One row has no CS10 reading.
    let dist = &report.distribution;
    assert_eq!(dist.sample_count, 11);
    assert_eq!(dist.min, Some(52.0));
    assert_eq!(dist.max, Some(70.0));
    assert_eq!(dist.p50, Some(63.0));
    assert_eq!(dist.p75, Some(66.5));
    let counts: Vec<usize> = dist.bins.iter().map(|b| b.count).collect();
    assert_eq!(counts, vec![2, 2, 3, 4]);
    assert_eq!(dist.bins[0].label, "52–56.5");

    assert_eq!(
        report.suggestions,
        vec![
            Suggestion::BeatingGoal.text().to_string(),
            Suggestion::ConsistencyImproving.text().to_string(),
        ]
    );
}

#[test]
fn first_recall_trails_an_aggressive_goal_but_improves() {
    let rows = fixture_rows();
    let cfg = EngineConfig::default();
    let meta = metric_meta("FirstRecall").unwrap();
    let report = build_drilldown(&cfg, "FirstRecall", meta, Some(240.0), &rows, &[]);

    assert_eq!(report.value, Some(260.0));
    assert_eq!(report.baseline, Some(270.0));
    assert_eq!(report.status, MetricStatus::Bad);
    assert_eq!(report.trend, TrendDirection::Up);
    assert_eq!(report.trend_text, "improving");
    assert_eq!(report.suggestions[0], Suggestion::GoalOutOfReach.text());
    assert_eq!(report.micro_copy, "Goal 04:00 · Earlier is better · Last 5 trailing target.");
}

#[test]
fn percent_columns_are_normalized_at_ingestion() {
    let rows = fixture_rows();
    let cfg = EngineConfig::default();
    let meta = metric_meta("KPEarly").unwrap();
    let report = build_drilldown(&cfg, "KPEarly", meta, None, &rows, &[]);

    let dist = &report.distribution;
    assert_eq!(dist.sample_count, 11);
    assert!(dist.max.unwrap() <= 1.0);
    assert!(dist.min.unwrap() >= 0.0);
    assert_eq!(report.status, MetricStatus::Neutral);
    assert_eq!(report.suggestions[0], Suggestion::SetManualTarget.text());
}

#[test]
fn percent_targets_accept_either_scale() {
    let rows = fixture_rows();
    let cfg = EngineConfig::default();
    let meta = metric_meta("KPEarly").unwrap();
    let as_percent = build_drilldown(&cfg, "KPEarly", meta, Some(55.0), &rows, &[]);
    let as_fraction = build_drilldown(&cfg, "KPEarly", meta, Some(0.55), &rows, &[]);

    assert_eq!(as_percent.target, Some(0.55));
    assert_eq!(as_percent, as_fraction);
    assert!(as_percent.micro_copy.starts_with("Goal 55.0% · "));
}

#[test]
fn dashboard_applies_metric_overrides_and_percent_targets() {
    let rows = fixture_rows();
    let cfg = EngineConfig::from_json_str(
        r#"{
            "primary_metrics": ["DL14", "KPEarly"],
            "targets": {"DL14": 55, "KPEarly": 0.5},
            "metrics": {"KPEarly": {"unit": "rate", "mode": "lower_is_better"}}
        }"#,
    )
    .unwrap();
    let reports = build_dashboard(&cfg, &rows);

    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].target, Some(0.55));
    assert_eq!(reports[1].unit, loltrack_metrics::units::MetricUnit::Percent);
    assert_eq!(reports[1].mode, loltrack_metrics::units::MetricMode::LowerIsBetter);
    assert_eq!(reports[1].target, Some(0.5));
}

#[test]
fn dashboard_follows_configured_metric_order() {
    let rows = fixture_rows();
    let mut cfg = EngineConfig::from_json_str(r#"{"targets": {"CS10": 65, "GD10": 0}}"#).unwrap();
    let reports = build_dashboard(&cfg, &rows);
    let ids: Vec<&str> = reports.iter().map(|r| r.metric_id.as_str()).collect();
    assert_eq!(ids, PRIMARY_METRICS.to_vec());

    let gd10 = reports.iter().find(|r| r.metric_id == "GD10").unwrap();
    assert_eq!(gd10.target, Some(0.0));
    assert_eq!(gd10.status, MetricStatus::Ok);
    assert_eq!(gd10.progress, 0.0);

    cfg.primary_metrics = vec!["CS10".to_string(), "Unknown".to_string()];
    let reports = build_dashboard(&cfg, &rows);
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].metric_id, "CS10");
}

#[test]
fn rolling_windows_by_count_and_days() {
    let rows = fixture_rows();
    let now = Utc.timestamp_millis_opt(1_760_950_400_000).unwrap();
    let specs = [WindowSpec::Count(5), WindowSpec::Days(5), WindowSpec::Count(50)];
    let windows = rolling_windows(&rows, "CS10", meta_unit("CS10"), &specs, now);

    assert_eq!(windows[0].n, 5);
    assert_eq!(windows[0].value, Some(67.0));
    assert_eq!(windows[0].spark.chars().count(), 5);

    assert_eq!(windows[1].n, 6);
    assert_eq!(windows[1].value, Some(66.33));

    assert_eq!(windows[2].n, 12);
    assert_eq!(windows[2].spark.chars().count(), 8);
    assert!(windows[2].trend.is_some());
}

fn meta_unit(id: &str) -> loltrack_metrics::units::MetricUnit {
    metric_meta(id).unwrap().unit
}

pub mod catalog;
pub mod classify;
pub mod coaching;
pub mod config;
pub mod dashboard;
pub mod distribution;
pub mod drilldown;
pub mod format;
pub mod matches;
pub mod narrative;
pub mod progress;
pub mod thresholds;
pub mod units;
pub mod windows;

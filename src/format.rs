use crate::units::{MetricUnit, usable};

pub const PLACEHOLDER: &str = "—";
const MINUS_GLYPH: char = '−';

pub fn format_value(unit: MetricUnit, value: Option<f64>) -> String {
    let Some(v) = usable(value) else {
        return PLACEHOLDER.to_string();
    };
    match unit {
        MetricUnit::Count => fmt_count(v),
        MetricUnit::Percent => fmt_percent(v),
        MetricUnit::Gold | MetricUnit::Xp => fmt_signed_delta(v),
        MetricUnit::Time => fmt_clock(v),
    }
}

/// Percent values arrive as either 0..1 or 0..100; anything past 1 in
/// magnitude is taken to be on the 0..100 scale.
pub fn normalize_percent(value: f64) -> f64 {
    if value.abs() > 1.0 { value / 100.0 } else { value }
}

/// Ingestion-boundary normalization. Only percent values are rescaled.
pub fn normalize_value(unit: MetricUnit, value: Option<f64>) -> Option<f64> {
    let v = usable(value)?;
    match unit {
        MetricUnit::Percent => Some(normalize_percent(v)),
        MetricUnit::Count | MetricUnit::Gold | MetricUnit::Xp | MetricUnit::Time => Some(v),
    }
}

fn fmt_count(v: f64) -> String {
    format!("{}", v.round() as i64)
}

fn fmt_percent(frac: f64) -> String {
    format!("{:.1}%", frac * 100.0)
}

fn fmt_signed_delta(v: f64) -> String {
    let sign = if v >= 0.0 { '+' } else { MINUS_GLYPH };
    let magnitude = v.abs().round() as u64;
    format!("{sign}{}", group_thousands(magnitude))
}

fn fmt_clock(seconds: f64) -> String {
    let s = seconds.max(0.0).round() as u64;
    format!("{:02}:{:02}", s / 60, s % 60)
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

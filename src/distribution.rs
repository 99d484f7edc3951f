use serde::Serialize;

use crate::units::finite_samples;

pub const MIN_BINS: usize = 4;
pub const MAX_BINS: usize = 8;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub label: String,
    pub count: usize,
    pub range: (f64, f64),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionSummary {
    pub sample_count: usize,
    pub bins: Vec<HistogramBin>,
    pub p50: Option<f64>,
    pub p75: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl DistributionSummary {
    pub fn empty() -> Self {
        Self {
            sample_count: 0,
            bins: Vec::new(),
            p50: None,
            p75: None,
            min: None,
            max: None,
        }
    }
}

/// Order statistics plus an adaptive histogram. Absent, NaN and infinite
/// samples are dropped before any math runs.
pub fn summarize(samples: &[Option<f64>]) -> DistributionSummary {
    let mut sorted = finite_samples(samples);
    if sorted.is_empty() {
        return DistributionSummary::empty();
    }
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len();
    let min = sorted[0];
    let max = sorted[n - 1];

    DistributionSummary {
        sample_count: n,
        bins: histogram(&sorted, min, max),
        p50: percentile(&sorted, 0.5),
        p75: percentile(&sorted, 0.75),
        min: Some(min),
        max: Some(max),
    }
}

pub fn summarize_values(samples: &[f64]) -> DistributionSummary {
    let wrapped: Vec<Option<f64>> = samples.iter().copied().map(Some).collect();
    summarize(&wrapped)
}

/// Linear-interpolation percentile over an ascending slice.
pub fn percentile(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let idx = (sorted.len() - 1) as f64 * p.clamp(0.0, 1.0);
    let lower = idx.floor() as usize;
    let upper = idx.ceil() as usize;
    if lower == upper {
        return Some(sorted[lower]);
    }
    let frac = idx - lower as f64;
    Some(sorted[lower] * (1.0 - frac) + sorted[upper] * frac)
}

pub fn bin_count(samples: usize) -> usize {
    ((samples as f64).sqrt().ceil() as usize).clamp(MIN_BINS, MAX_BINS)
}

fn histogram(sorted: &[f64], min: f64, max: f64) -> Vec<HistogramBin> {
    let bins = bin_count(sorted.len());
    let width = bins as f64;
    // `max - min` can overflow for extreme spans; divide each side first.
    let step = if max == min { 1.0 / width } else { max / width - min / width };

    // Shared edges keep neighbouring bins contiguous; the last bin closes at max.
    let edge = |i: usize| if i == 0 { min } else { min + i as f64 * step };
    let ranges: Vec<(f64, f64)> = (0..bins)
        .map(|i| {
            let hi = if i == bins - 1 { max } else { edge(i + 1) };
            (edge(i), hi)
        })
        .collect();

    let mut counts = vec![0usize; bins];
    for &v in sorted {
        let idx = ranges
            .iter()
            .enumerate()
            .position(|(i, &(lo, hi))| {
                if i == bins - 1 {
                    v >= lo && v <= hi
                } else {
                    v >= lo && v < hi
                }
            })
            .unwrap_or(bins - 1);
        counts[idx] += 1;
    }

    ranges
        .into_iter()
        .zip(counts)
        .map(|((lo, hi), count)| HistogramBin {
            label: format!("{}–{}", label_edge(lo), label_edge(hi)),
            count,
            range: (lo, hi),
        })
        .collect()
}

fn label_edge(v: f64) -> String {
    let rounded = if v.abs() >= 100.0 {
        v.round()
    } else {
        (v * 10.0).round() / 10.0
    };
    // Avoid "-0" labels for tiny negatives.
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded}")
}

#[cfg(test)]
mod tests {
    use super::{bin_count, label_edge, percentile};

    #[test]
    fn bin_count_scales_with_sqrt_and_clamps() {
        assert_eq!(bin_count(1), 4);
        assert_eq!(bin_count(16), 4);
        assert_eq!(bin_count(17), 5);
        assert_eq!(bin_count(40), 7);
        assert_eq!(bin_count(1000), 8);
    }

    #[test]
    fn percentile_interpolates() {
        let sorted = [10.0, 20.0, 30.0, 40.0];
        assert_eq!(percentile(&sorted, 0.5), Some(25.0));
        assert_eq!(percentile(&sorted, 0.0), Some(10.0));
        assert_eq!(percentile(&sorted, 1.0), Some(40.0));
        assert_eq!(percentile(&[], 0.5), None);
    }

    #[test]
    fn labels_round_by_magnitude() {
        assert_eq!(label_edge(1234.56), "1235");
        assert_eq!(label_edge(-150.4), "-150");
        assert_eq!(label_edge(12.34), "12.3");
        assert_eq!(label_edge(2.0), "2");
        assert_eq!(label_edge(-0.04), "0");
    }
}

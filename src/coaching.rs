use std::fmt;

use serde::{Deserialize, Serialize};

use crate::units::{MetricMode, finite_samples, usable};

pub const RECENT_WINDOW: usize = 5;
pub const VOLATILITY_RATIO: f64 = 0.2;
pub const VOLATILITY_FLOOR: f64 = 1.0;
pub const MAX_SUGGESTIONS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoachingParams {
    pub recent_window: usize,
    pub volatility_ratio: f64,
    pub volatility_floor: f64,
    pub max_suggestions: usize,
}

impl Default for CoachingParams {
    fn default() -> Self {
        Self {
            recent_window: RECENT_WINDOW,
            volatility_ratio: VOLATILITY_RATIO,
            volatility_floor: VOLATILITY_FLOOR,
            max_suggestions: MAX_SUGGESTIONS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Suggestion {
    NeedMoreMatches,
    TrailingGoal,
    BeatingGoal,
    GoalOutOfReach,
    GoalMet,
    SetManualTarget,
    Swingy,
    ConsistencyImproving,
}

impl Suggestion {
    pub fn text(self) -> &'static str {
        match self {
            Suggestion::NeedMoreMatches => {
                "Play a few more matches so we can tailor coaching tips for this metric."
            }
            Suggestion::TrailingGoal => {
                "You’re trailing the goal—review last matches to find where tempo slipped and plan your next openings."
            }
            Suggestion::BeatingGoal => {
                "You’re beating the goal. Lock in the habits that got you here and push for stretch wins."
            }
            Suggestion::GoalOutOfReach => {
                "Goal is still out of reach—look for one specific habit to trim each game (e.g., secure recall timers or safer pathing)."
            }
            Suggestion::GoalMet => {
                "Goal met! Keep reinforcing the routines that keep you ahead of schedule."
            }
            Suggestion::SetManualTarget => {
                "Set a manual target in Goals to get sharper coaching nudges for this metric."
            }
            Suggestion::Swingy => {
                "Results are swingy—re-watch the best and worst games to pin down what changes the result."
            }
            Suggestion::ConsistencyImproving => {
                "Consistency is improving—gradually raise the bar or add a new focus area once this feels automatic."
            }
        }
    }
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

pub fn suggest(mode: MetricMode, target: Option<f64>, samples: &[Option<f64>]) -> Vec<String> {
    suggest_with(&CoachingParams::default(), mode, target, samples)
        .into_iter()
        .map(|s| s.text().to_string())
        .collect()
}

/// Samples are chronological; the tail is taken after dropping absent
/// entries, so the window always holds real observations.
pub fn suggest_with(
    params: &CoachingParams,
    mode: MetricMode,
    target: Option<f64>,
    samples: &[Option<f64>],
) -> Vec<Suggestion> {
    let values = finite_samples(samples);
    if values.is_empty() {
        return vec![Suggestion::NeedMoreMatches];
    }

    let window = params.recent_window.max(1);
    let recent = &values[values.len().saturating_sub(window)..];
    let avg_recent = recent.iter().sum::<f64>() / recent.len() as f64;

    let mut out = Vec::with_capacity(2);
    match usable(target) {
        Some(t) if mode.smaller_is_better() => out.push(if avg_recent > t {
            Suggestion::GoalOutOfReach
        } else {
            Suggestion::GoalMet
        }),
        Some(t) => out.push(if avg_recent < t {
            Suggestion::TrailingGoal
        } else {
            Suggestion::BeatingGoal
        }),
        None => out.push(Suggestion::SetManualTarget),
    }

    let hi = recent.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let lo = recent.iter().copied().fold(f64::INFINITY, f64::min);
    let threshold = (avg_recent.abs() * params.volatility_ratio).max(params.volatility_floor);
    out.push(if hi - lo > threshold {
        Suggestion::Swingy
    } else {
        Suggestion::ConsistencyImproving
    });

    out.truncate(params.max_suggestions);
    out
}

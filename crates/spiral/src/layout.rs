use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::date::day_of_year;
use crate::milestone::Milestone;

/// How `t` values were assigned for a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionMode {
    /// Every date parsed; `t` follows the date spread of the dataset.
    Chronological,
    /// At least one date failed to parse; milestones are evenly spaced.
    Uniform,
}

impl PositionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chronological => "chronological",
            Self::Uniform => "uniform",
        }
    }
}

/// Normalized spiral positions, one per milestone in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Positions {
    pub mode: PositionMode,
    pub t_values: Vec<f64>,
}

/// Pick the positioning mode: chronological only if every day is known.
///
/// An empty dataset is chronological (there is nothing to fall back for).
pub fn detect_mode(days: &[Option<u32>]) -> PositionMode {
    if days.iter().all(Option::is_some) {
        PositionMode::Chronological
    } else {
        PositionMode::Uniform
    }
}

/// `t_i = (day_i - min) / (max - min)`, with a span of zero treated as 1.
pub fn chronological_positions(days: &[u32]) -> Vec<f64> {
    let (Some(&min), Some(&max)) = (days.iter().min(), days.iter().max()) else {
        return Vec::new();
    };
    let span = match max - min {
        0 => 1.0,
        span => f64::from(span),
    };
    days.iter().map(|&d| f64::from(d - min) / span).collect()
}

/// `t_i = i / (n - 1)`; a single milestone sits at `t = 0`.
pub fn uniform_positions(count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![0.0],
        n => {
            let last = (n - 1) as f64;
            (0..n).map(|i| i as f64 / last).collect()
        }
    }
}

/// Assign a `t` to every milestone.
///
/// One unparsable date switches the whole dataset to uniform spacing.
pub fn compute_positions(milestones: &[Milestone]) -> Positions {
    let days: Vec<Option<u32>> = milestones.iter().map(|m| day_of_year(&m.date)).collect();
    let mode = detect_mode(&days);

    let t_values = match mode {
        PositionMode::Chronological => {
            let days: Vec<u32> = days.into_iter().flatten().collect();
            chronological_positions(&days)
        }
        PositionMode::Uniform => {
            let invalid: Vec<&str> = milestones
                .iter()
                .zip(&days)
                .filter(|(_, day)| day.is_none())
                .map(|(m, _)| m.date.as_str())
                .collect();
            warn!(
                count = milestones.len(),
                ?invalid,
                "unparsable milestone dates, spacing all milestones evenly"
            );
            uniform_positions(milestones.len())
        }
    };

    debug!(mode = mode.as_str(), count = t_values.len(), "computed spiral positions");
    Positions { mode, t_values }
}

//! Rating aggregation: part overalls, the overall score, and the values
//! derived from it for display.
//!
//! Everything here is total. Missing or non-numeric fields count as "no
//! data" and never produce an error.

use super::catalog::Part;
use super::record::{PartScores, ReviewRecord};
use serde::Serialize;

pub const MAX_STARS: u8 = 5;

/// Qualitative label for an overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    Low,
    Medium,
    High,
}

impl Band {
    pub fn for_score(score: f64) -> Self {
        if score < 2.5 {
            Self::Low
        } else if score < 4.0 {
            Self::Medium
        } else {
            Self::High
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AggregateResult {
    /// Indexed by [`Part::index`].
    pub part_overall: [f64; 3],
    pub overall: f64,
    pub display_overall: f64,
    pub band: Band,
    pub star_count: u8,
}

impl AggregateResult {
    pub fn part(&self, part: Part) -> f64 {
        self.part_overall[part.index()]
    }
}

pub fn aggregate(record: &ReviewRecord) -> AggregateResult {
    let part_overall = Part::ordered().map(|part| part_overall(record.part(part)));

    // Parts without data still count towards the divisor.
    let overall = record
        .overall_rating
        .filter(|rating| rating.is_finite())
        .unwrap_or_else(|| mean(&part_overall));

    AggregateResult {
        part_overall,
        overall,
        display_overall: round_half_up(overall, 1),
        band: Band::for_score(overall),
        star_count: star_count(overall),
    }
}

/// A part's explicit `overall` when present, else the mean of its numeric
/// sub-scores; 0 when the part is missing or has nothing numeric.
pub fn part_overall(part: Option<&PartScores>) -> f64 {
    let Some(part) = part else {
        return 0.0;
    };

    if let Some(overall) = part.overall() {
        return overall;
    }

    let values: Vec<f64> = part.sub_scores().filter_map(|(_, value)| value).collect();
    mean(&values)
}

/// Rounds to `digits` decimals with midpoints going away from zero.
///
/// The value is nudged by one machine epsilon first so that decimal
/// midpoints stored slightly below their true value (e.g. `1.005`) still
/// round up.
pub fn round_half_up(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    ((value + f64::EPSILON) * factor).round() / factor
}

pub fn star_count(overall: f64) -> u8 {
    let rounded = round_half_up(overall, 0);
    if rounded.is_nan() {
        return 0;
    }
    rounded.clamp(0.0, f64::from(MAX_STARS)) as u8
}

/// One-decimal text for a score, rounded half-up.
pub fn format_score(value: f64) -> String {
    format!("{:.1}", round_half_up(value, 1))
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

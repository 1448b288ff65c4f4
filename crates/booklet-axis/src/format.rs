// File: crates/booklet-axis/src/format.rs
// Summary: Tick label rendering with K/M/B abbreviation and trimmed precision.

use serde::{Deserialize, Serialize};

use crate::decimals::{count_decimals, round_at};

const ABBREVIATIONS: [(f64, &str); 3] = [(1e9, "B"), (1e6, "M"), (1e3, "K")];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelStyle {
    pub is_percent: bool,
    /// Print large values in full instead of `1.2 K` style.
    pub disable_abbrev: bool,
}

impl LabelStyle {
    pub fn percent() -> Self {
        Self { is_percent: true, ..Self::default() }
    }

    pub fn full() -> Self {
        Self { disable_abbrev: true, ..Self::default() }
    }
}

/// Render a tick value for display. Empty for non-finite input.
///
/// Precision is the larger of `decimals` and the value's own digits, capped
/// at 4; values of magnitude 1 or more on non-percent axes keep at most
/// `max(2, decimals)`.
pub fn format_tick_label(value: f64, decimals: u32, style: LabelStyle) -> String {
    if !value.is_finite() {
        return String::new();
    }
    let abs = value.abs();
    let mut dp = decimals.max(count_decimals(value)).min(4);
    if style.is_percent {
        dp = dp.min(decimals.max(4));
    } else if abs >= 1.0 {
        dp = dp.min(decimals.max(2));
    }

    let mut scaled = value;
    let mut suffix = None;
    if !style.disable_abbrev && !style.is_percent {
        if let Some((divisor, unit)) = ABBREVIATIONS.iter().find(|(limit, _)| abs >= *limit) {
            scaled = value / divisor;
            suffix = Some(*unit);
        }
    }

    let mut rounded = round_at(scaled, dp);
    if rounded == 0.0 {
        rounded = 0.0; // no "-0"
    }
    let mut text = format!("{:.*}", dp as usize, rounded);
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    match suffix {
        Some(unit) => format!("{text} {unit}"),
        None => text,
    }
}

/// Labels for a whole tick set.
pub fn format_ticks(ticks: &[f64], decimals: u32, style: LabelStyle) -> Vec<String> {
    ticks.iter().map(|t| format_tick_label(*t, decimals, style)).collect()
}

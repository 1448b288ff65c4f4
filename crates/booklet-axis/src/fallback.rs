// File: crates/booklet-axis/src/fallback.rs
// Summary: Synthesized axes for when no candidate step survives evaluation.

use crate::debug::{DebugRecord, DebugSink, FallbackTier};
use crate::decimals::{count_decimals, round_at, round_half_up, ZERO_EPSILON};
use crate::evaluate::{layout_ticks, Grid, Outcome};
use crate::grid::{linspace, rounded_split};
use crate::nice::snap_step;
use crate::range::AxisPlan;

const EXTEND_GUARD: usize = 128;

/// Always produces a usable axis: an even split of the hard overrides in
/// manual mode, otherwise a snapped step grown to the segment window.
pub(crate) fn synthesize(plan: &AxisPlan, sink: &mut dyn DebugSink) -> Outcome {
    match (plan.manual_segments, plan.override_min, plan.override_max) {
        (Some(segments), Some(lo), Some(hi)) => {
            sink.append(DebugRecord::Fallback { tier: FallbackTier::Manual });
            let step = (hi - lo).abs().max(plan.minimum_tick_interval) / segments.max(1) as f64;
            finish(plan, step, even_split(plan, lo, hi, segments, step))
        }
        _ => {
            sink.append(DebugRecord::Fallback { tier: FallbackTier::Synthesized });
            auto_axis(plan)
        }
    }
}

fn auto_axis(plan: &AxisPlan) -> Outcome {
    let min_source = plan.override_min.unwrap_or(plan.padded_min);
    let max_source = plan.override_max.unwrap_or(plan.padded_max);
    let range = (max_source - min_source).max(plan.minimum_tick_interval);
    let segments = plan.preferred_segments.clamp(plan.minimum_segments, plan.maximum_segments);
    let raw = range / segments.max(1) as f64;
    let step = if plan.allow_decimal_ticks {
        snap_step(raw, plan.minimum_tick_interval, true)
    } else {
        round_half_up(raw).max(1.0)
    };
    let grid = Grid::new(plan, step);

    let percent_bounded = plan.is_percent && plan.percent_within_bounds;
    let floor = if plan.zero_floor() { 0.0 } else { f64::NEG_INFINITY };
    let ceiling = if percent_bounded && plan.override_max.is_none() { 100.0 } else { f64::INFINITY };
    // the axis must at least span the data (or padded range) inside the clamps
    let cover_lo = plan.override_min.unwrap_or_else(|| plan.data_min.min(plan.padded_min).max(floor));
    let cover_hi = plan.override_max.unwrap_or_else(|| plan.data_max.max(plan.padded_max).min(ceiling));

    let mut axis_min = plan.override_min.unwrap_or_else(|| grid.floor(min_source));
    let mut axis_max = plan.override_max.unwrap_or_else(|| grid.ceil(max_source));
    if plan.override_min.is_none() && axis_min < floor {
        axis_min = grid.ceil(floor);
    }
    if plan.override_max.is_none() && axis_max > ceiling {
        axis_max = grid.floor(ceiling);
    }
    if axis_max <= axis_min {
        if plan.override_max.is_some() && plan.override_min.is_none() {
            axis_min = grid.round(axis_max - step);
        } else {
            axis_max = grid.round(axis_min + step);
        }
    }

    let mut ticks = layout_ticks(&grid, axis_min, axis_max);
    let mut guard = 0;
    while guard < EXTEND_GUARD {
        let first = ticks[0];
        let last = ticks[ticks.len() - 1];
        let short = ticks.len() - 1 < plan.minimum_segments;
        let low_uncovered = first > cover_lo + ZERO_EPSILON;
        let high_uncovered = last < cover_hi - ZERO_EPSILON;
        if !(short || low_uncovered || high_uncovered) {
            break;
        }
        let up = grid.round(last + step);
        let down = grid.round(first - step);
        if (short || high_uncovered) && plan.override_max.is_none() && up <= ceiling + ZERO_EPSILON && up > last {
            ticks.push(up);
        } else if (short || low_uncovered) && plan.override_min.is_none() && down >= floor - ZERO_EPSILON && down < first {
            ticks.insert(0, down);
        } else {
            break;
        }
        guard += 1;
    }
    ticks.sort_by(f64::total_cmp);
    ticks.dedup();

    let count = ticks.len() - 1;
    let ascending = ticks.windows(2).all(|w| w[1] > w[0]);
    let covered = ticks[0] <= cover_lo + ZERO_EPSILON && ticks[count] >= cover_hi - ZERO_EPSILON;
    if count >= 1 && ascending && covered && count >= plan.minimum_segments && count <= plan.maximum_segments {
        warn_if_interval_unmet(plan, step);
        return finish(plan, step, ticks);
    }

    // last resort: an even split over the widened range
    let (lo, hi) = split_range(plan, ticks[0].min(cover_lo), ticks[count].max(cover_hi), floor, ceiling, step);
    let split = split_segments(plan, lo, hi, segments);
    let step = (hi - lo) / split as f64;
    warn_if_interval_unmet(plan, step);
    finish(plan, step, even_split(plan, lo, hi, split, step))
}

/// Endpoints for the last-resort split: hard overrides verbatim, everything
/// else inside the clamps, and never empty.
fn split_range(plan: &AxisPlan, lo: f64, hi: f64, floor: f64, ceiling: f64, step: f64) -> (f64, f64) {
    let mut lo = plan.override_min.unwrap_or_else(|| lo.max(floor));
    let mut hi = plan.override_max.unwrap_or_else(|| hi.min(ceiling));
    if hi <= lo {
        let width = step.max(plan.minimum_tick_interval).max(f64::EPSILON);
        if plan.override_max.is_none() && (plan.override_min.is_some() || lo + width <= ceiling) {
            hi = lo + width;
        } else {
            lo = hi - width;
        }
    }
    (lo, hi)
}

/// Segment count in the window that divides `[lo, hi]` exactly at the axis
/// precision, nearest to `preferred` first.
fn split_segments(plan: &AxisPlan, lo: f64, hi: f64, preferred: usize) -> usize {
    let min = plan.minimum_segments.max(1);
    let max = plan.maximum_segments.max(min);
    let mut counts: Vec<usize> = (min..=max).collect();
    counts.sort_by_key(|n| (n.abs_diff(preferred), *n));
    counts
        .into_iter()
        .find(|n| {
            let step = (hi - lo) / *n as f64;
            let decimals = plan.step_decimals(step);
            (round_at(step, decimals) - step).abs() <= step.abs() * 1e-9
        })
        .unwrap_or_else(|| preferred.clamp(min, max))
}

fn warn_if_interval_unmet(plan: &AxisPlan, step: f64) {
    if step < plan.minimum_tick_interval - ZERO_EPSILON {
        tracing::warn!(
            minimum = plan.minimum_tick_interval,
            requested = ?plan.requested_min_interval,
            step,
            "minimum tick interval cannot fit the axis range"
        );
    }
}

/// Rounded even split, or the raw `linspace` when rounding would merge ticks.
fn even_split(plan: &AxisPlan, lo: f64, hi: f64, segments: usize, step: f64) -> Vec<f64> {
    rounded_split(lo, hi, segments, plan.step_decimals(step))
        .or_else(|| rounded_split(lo, hi, segments, count_decimals(step).min(8)))
        .unwrap_or_else(|| linspace(lo, hi, segments + 1))
}

fn finish(plan: &AxisPlan, step: f64, ticks: Vec<f64>) -> Outcome {
    let decimals = ticks.iter().map(|t| count_decimals(*t)).max().unwrap_or(0);
    let mut display_decimals = plan.fallback_display_cap(decimals);
    if plan.allow_decimal_ticks && !plan.allow_fine_decimals && !plan.is_percent {
        display_decimals = display_decimals.min(if plan.dominant_magnitude < 10.0 { 2 } else { 1 });
    }
    let last = ticks.len() - 1;
    tracing::debug!(step, segments = last, decimals, "synthesized axis");
    Outcome {
        step,
        min: ticks[0],
        max: ticks[last],
        ticks,
        decimals,
        display_decimals,
        score: f64::INFINITY,
    }
}

// File: crates/booklet-axis/src/evaluate.rs
// Summary: Lays out a trial axis for one candidate step, gates it on segment counts and scores it.

use crate::debug::{DebugRecord, DebugSink, RejectReason};
use crate::decimals::{count_decimals, ZERO_EPSILON};
use crate::range::AxisPlan;

const GROW_GUARD: usize = 128;
const TICK_GUARD: usize = 256;
const FILL_GUARD: usize = 128;
/// Relative tolerance for "is a whole number of steps".
const STEP_TOLERANCE: f64 = 1e-6;

/// An accepted candidate; lower `score` is better.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Outcome {
    pub step: f64,
    pub min: f64,
    pub max: f64,
    pub ticks: Vec<f64>,
    pub decimals: u32,
    pub display_decimals: u32,
    pub score: f64,
}

/// Step grid anchored at the hard override when there is one, else at zero.
pub(crate) struct Grid<'a> {
    plan: &'a AxisPlan,
    pub step: f64,
    anchor: f64,
}

impl<'a> Grid<'a> {
    pub fn new(plan: &'a AxisPlan, step: f64) -> Self {
        Self { plan, step, anchor: plan.override_min.or(plan.override_max).unwrap_or(0.0) }
    }

    pub fn round(&self, value: f64) -> f64 {
        self.plan.round_for(value, self.step)
    }

    pub fn floor(&self, value: f64) -> f64 {
        let k = ((value - self.anchor + ZERO_EPSILON) / self.step).floor();
        self.round(self.anchor + k * self.step)
    }

    pub fn ceil(&self, value: f64) -> f64 {
        let k = ((value - self.anchor - ZERO_EPSILON) / self.step).ceil();
        self.round(self.anchor + k * self.step)
    }

    fn at(&self, origin: f64, index: usize) -> f64 {
        self.round(origin + self.step * index as f64)
    }
}

pub(crate) fn evaluate_step(plan: &AxisPlan, step_value: f64, sink: &mut dyn DebugSink) -> Option<Outcome> {
    if !step_value.is_finite() || step_value <= 0.0 {
        return None;
    }
    let step = plan.normalize_step(step_value);
    let grid = Grid::new(plan, step);
    let manual = plan.manual_segments;

    let mut axis_min = plan.override_min.unwrap_or_else(|| grid.floor(plan.padded_min));
    let mut axis_max = plan.override_max.unwrap_or_else(|| grid.ceil(plan.padded_max));

    if plan.override_min.is_none() {
        if plan.zero_floor() {
            axis_min = axis_min.max(0.0);
        }
        axis_min = grid.floor(axis_min);
        if plan.zero_floor() && axis_min < -ZERO_EPSILON {
            // an anchor off the zero grid can floor below zero
            axis_min = grid.ceil(0.0);
        }
    }
    if plan.override_max.is_none() {
        if plan.is_percent && plan.percent_within_bounds {
            axis_max = axis_max.min(100.0);
        } else if !plan.is_percent && !plan.has_negatives {
            axis_max = axis_max.max(0.0);
        }
        axis_max = grid.ceil(axis_max);
        if plan.is_percent && plan.percent_within_bounds && axis_max > 100.0 + 1e-9 {
            let mut adjusted = axis_max;
            let mut guard = 0;
            while adjusted > 100.0 + 1e-9 && adjusted - step >= plan.padded_max - 1e-9 && guard < GROW_GUARD {
                adjusted = grid.round(adjusted - step);
                guard += 1;
            }
            if adjusted > 100.0 + 1e-9 {
                return reject(plan, sink, RejectReason::PercentCeiling, step, 0);
            }
            axis_max = adjusted.min(100.0);
        }
    }
    if axis_max <= axis_min {
        if plan.override_max.is_some() && plan.override_min.is_none() {
            axis_min = grid.round(axis_max - step);
        } else {
            axis_max = grid.round(axis_min + step);
        }
    }

    let span_steps = (axis_max - axis_min) / step;
    if manual.is_none() && (span_steps <= 0.0 || (span_steps - span_steps.round()).abs() > STEP_TOLERANCE) {
        return reject(plan, sink, RejectReason::UnevenSpan, step, 0);
    }

    if manual.is_none() {
        let desired_span = step * plan.minimum_segments as f64;
        let lower = match plan.override_min {
            Some(_) => axis_min,
            None if plan.zero_floor() => 0.0,
            None => f64::NEG_INFINITY,
        };
        let upper = match plan.override_max {
            Some(_) => axis_max,
            None if plan.is_percent && plan.percent_within_bounds => 100.0,
            None => f64::INFINITY,
        };
        let mut guard = 0;
        while axis_max - axis_min < desired_span - 1e-9 && guard < GROW_GUARD {
            let mut grew = false;
            if plan.override_min.is_none() && axis_min - step >= lower - 1e-9 {
                axis_min = grid.round(axis_min - step);
                grew = true;
            }
            if axis_max - axis_min >= desired_span - 1e-9 {
                break;
            }
            if plan.override_max.is_none() && axis_max + step <= upper + 1e-9 {
                axis_max = grid.round(axis_max + step);
                grew = true;
            }
            if !grew {
                break;
            }
            guard += 1;
        }
    }

    let mut ticks = layout_ticks(&grid, axis_min, axis_max);
    if let Some(n) = manual {
        if ticks.len() > n + 1 {
            ticks.truncate(n);
            ticks.push(axis_max);
        }
    }
    let segments = ticks.len() - 1;
    if segments < plan.minimum_segments || segments > plan.maximum_segments {
        return reject(plan, sink, RejectReason::SegmentCount, step, segments);
    }

    if ticks[0] <= 0.0 && ticks[segments] >= 0.0 {
        align_landmark(plan, &grid, &mut ticks, 0.0);
    }
    if plan.is_percent && plan.percent_within_bounds {
        align_landmark(plan, &grid, &mut ticks, 100.0);
    }
    if let Some(v) = plan.explicit_min {
        align_landmark(plan, &grid, &mut ticks, v);
    }
    if let Some(v) = plan.explicit_max {
        align_landmark(plan, &grid, &mut ticks, v);
    }
    ticks.sort_by(f64::total_cmp);
    ticks.dedup();

    let final_segments = ticks.len() - 1;
    if final_segments < plan.minimum_segments || final_segments > plan.maximum_segments {
        return reject(plan, sink, RejectReason::SegmentCount, step, final_segments);
    }
    let final_min = ticks[0];
    let final_max = ticks[final_segments];

    // score
    let weights = plan.policy.weights;
    let coverage_lower = (plan.padded_min - final_min).max(0.0);
    let coverage_upper = (final_max - plan.padded_max).max(0.0);
    let soft_target = plan.padding.max(plan.minimum_tick_interval);
    let miss_lower = if plan.override_min.is_none() { (soft_target - coverage_lower).max(0.0) } else { 0.0 };
    let miss_upper = if plan.override_max.is_none() { (soft_target - coverage_upper).max(0.0) } else { 0.0 };
    let segment_diff = final_segments.abs_diff(plan.preferred_segments) as f64;
    let step_drift = (step - plan.base_step_raw).abs() / step.max(plan.base_step_raw).max(1.0);

    let tick_precision = ticks.iter().map(|t| count_decimals(*t)).max().unwrap_or(0);
    let step_precision = count_decimals(step);
    let interval_precision = plan.requested_min_interval.map(count_decimals).unwrap_or(0);
    let mut precision = tick_precision
        .max(step_precision)
        .max(plan.max_decimal_precision)
        .max(plan.override_precision)
        .max(interval_precision);
    if let Some(segment) = plan.explicit_segment {
        if (segment - step).abs() <= step.abs().max(segment.abs()) * 1e-6 {
            precision = precision.max(plan.explicit_segment_precision);
        }
    }
    // verbatim override endpoints keep their own digits
    let decimals = if plan.allow_decimal_ticks {
        precision.min(plan.decimal_cap).max(plan.override_precision)
    } else {
        0
    };
    let display_decimals = if plan.allow_decimal_ticks {
        decimals.min(if step < 0.1 - ZERO_EPSILON { 2 } else { 1 })
    } else {
        0
    };

    let even_division = match manual {
        Some(n) => (span_steps - n as f64).abs() < STEP_TOLERANCE,
        None => (span_steps - span_steps.round()).abs() < STEP_TOLERANCE,
    };
    let score = segment_diff * weights.segment_deviation
        + (coverage_lower + coverage_upper) * weights.coverage
        + (miss_lower + miss_upper) * weights.coverage_miss
        + display_decimals as f64 * weights.display_decimals
        + step_drift * weights.step_drift
        + if even_division { 0.0 } else { weights.uneven_division };

    sink.append(DebugRecord::Decimals {
        step,
        display_decimals,
        tick_precision,
        decimal_cap: plan.decimal_cap,
        max_decimal_precision: plan.max_decimal_precision,
        explicit_segment_precision: plan.explicit_segment_precision,
        override_precision: plan.override_precision,
    });
    sink.append(DebugRecord::Accept {
        step,
        segments: final_segments,
        min: final_min,
        max: final_max,
        score,
        coverage_lower,
        coverage_upper,
    });

    Some(Outcome { step, min: final_min, max: final_max, ticks, decimals, display_decimals, score })
}

fn reject(
    plan: &AxisPlan,
    sink: &mut dyn DebugSink,
    reason: RejectReason,
    step: f64,
    segments: usize,
) -> Option<Outcome> {
    sink.append(DebugRecord::Reject {
        reason,
        step,
        segments,
        minimum_segments: plan.minimum_segments,
        maximum_segments: plan.maximum_segments,
    });
    None
}

/// Endpoints verbatim, interior positions on the step grid from `min`.
pub(crate) fn layout_ticks(grid: &Grid<'_>, min: f64, max: f64) -> Vec<f64> {
    let mut ticks = vec![min];
    for index in 1..TICK_GUARD {
        let cursor = grid.at(min, index);
        if cursor >= max - grid.step * 0.5 {
            break;
        }
        ticks.push(cursor);
    }
    ticks.push(max);
    ticks
}

/// Put a significant value on the tick set when it lies on the step grid,
/// filling any gap between it and the current range. Hard overrides and the
/// percent range are never crossed.
fn align_landmark(plan: &AxisPlan, grid: &Grid<'_>, ticks: &mut Vec<f64>, value: f64) {
    if !value.is_finite() {
        return;
    }
    let normalized = grid.round(value);
    let first = ticks[0];
    let last = ticks[ticks.len() - 1];
    let offset = (normalized - first) / grid.step;
    if (offset - offset.round()).abs() > STEP_TOLERANCE || ticks.contains(&normalized) {
        return;
    }
    if plan.is_percent && plan.percent_within_bounds && !(0.0..=100.0).contains(&normalized) {
        return;
    }
    if normalized > last {
        if plan.override_max.is_some() {
            return;
        }
        let mut cursor = grid.round(last + grid.step);
        let mut guard = 0;
        while cursor < normalized - grid.step * 0.5 && guard < FILL_GUARD {
            ticks.push(cursor);
            cursor = grid.round(cursor + grid.step);
            guard += 1;
        }
        ticks.push(normalized);
    } else if normalized < first {
        if plan.override_min.is_some() || (plan.zero_floor() && normalized < 0.0) {
            return;
        }
        let mut cursor = grid.round(first - grid.step);
        let mut guard = 0;
        while cursor > normalized + grid.step * 0.5 && guard < FILL_GUARD {
            ticks.push(cursor);
            cursor = grid.round(cursor - grid.step);
            guard += 1;
        }
        ticks.push(normalized);
    } else {
        ticks.push(normalized);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debug::NoopSink;
    use crate::options::{AxisOptions, ResolvedOptions};
    use crate::stat::StatDescriptor;

    fn plan(stat: &StatDescriptor, opts: &AxisOptions) -> AxisPlan {
        AxisPlan::build(stat, &ResolvedOptions::resolve(opts, stat.is_percent))
    }

    #[test]
    fn unit_step_on_small_series() {
        let p = plan(&StatDescriptor::from_values([1.0, 2.0, 3.0, 4.0, 5.0]), &AxisOptions::default());
        let out = evaluate_step(&p, 1.0, &mut NoopSink).expect("accepted");
        assert_eq!(out.ticks, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(out.decimals, 0);
    }

    #[test]
    fn short_range_grows_to_minimum_segments() {
        let p = plan(&StatDescriptor::from_values([1.0, 2.0, 3.0, 4.0, 5.0]), &AxisOptions::default());
        let out = evaluate_step(&p, 2.0, &mut NoopSink).expect("accepted");
        assert_eq!(out.ticks, vec![0.0, 2.0, 4.0, 6.0, 8.0]);
    }

    #[test]
    fn too_many_segments_rejected() {
        let p = plan(&StatDescriptor::from_values([0.0, 100.0]), &AxisOptions::default());
        let mut records = Vec::new();
        assert!(evaluate_step(&p, 1.0, &mut records).is_none());
        assert!(matches!(
            records.last(),
            Some(DebugRecord::Reject { reason: RejectReason::SegmentCount, .. })
        ));
    }

    #[test]
    fn manual_split_keeps_override_endpoints() {
        let opts = AxisOptions::new().with_override(10.0, 50.0).with_manual_divisions(4);
        let p = plan(&StatDescriptor::default(), &opts);
        let out = evaluate_step(&p, 10.0, &mut NoopSink).expect("accepted");
        assert_eq!(out.ticks, vec![10.0, 20.0, 30.0, 40.0, 50.0]);
    }

    #[test]
    fn single_override_anchors_the_grid() {
        let opts = AxisOptions { min: Some(2.5), ..AxisOptions::default() };
        let p = plan(&StatDescriptor::from_values([3.0, 9.0, 14.0]), &opts);
        let out = evaluate_step(&p, 2.5, &mut NoopSink).expect("accepted");
        assert_eq!(out.min, 2.5);
        assert!(out.ticks.windows(2).all(|w| (w[1] - w[0] - 2.5).abs() < 1e-9));
    }

    #[test]
    fn lone_max_override_at_or_below_zero_is_kept() {
        let opts = AxisOptions { max: Some(-2.0), ..AxisOptions::default() };
        let p = plan(&StatDescriptor::from_values([3.0, 9.0, 14.0]), &opts);
        let out = evaluate_step(&p, 1.0, &mut NoopSink).expect("accepted");
        assert_eq!(out.max, -2.0);
        assert_eq!(out.ticks.last(), Some(&-2.0));
        assert_eq!(out.ticks, vec![-6.0, -5.0, -4.0, -3.0, -2.0]);
    }

    #[test]
    fn invalid_steps_are_ignored() {
        let p = plan(&StatDescriptor::from_values([1.0, 2.0]), &AxisOptions::default());
        assert!(evaluate_step(&p, 0.0, &mut NoopSink).is_none());
        assert!(evaluate_step(&p, f64::NAN, &mut NoopSink).is_none());
        assert!(evaluate_step(&p, -1.0, &mut NoopSink).is_none());
    }
}

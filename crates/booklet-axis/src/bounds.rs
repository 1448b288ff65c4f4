// File: crates/booklet-axis/src/bounds.rs
// Summary: Entry points of the axis engine: plan, search candidate steps, pick the best, fall back.

use serde::{Deserialize, Serialize};

use crate::candidates::candidate_steps;
use crate::debug::{DebugRecord, DebugSink, FallbackTier, NoopSink};
use crate::evaluate::{evaluate_step, Outcome};
use crate::fallback::synthesize;
use crate::options::{AxisOptions, ResolvedOptions};
use crate::range::AxisPlan;
use crate::stat::StatDescriptor;

/// Resolved value-axis layout.
///
/// `ticks` is ascending and unique, starts at `min` and ends at `max`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisBounds {
    pub min: f64,
    pub max: f64,
    pub ticks: Vec<f64>,
    /// Precision needed to represent every tick.
    pub decimals: u32,
    /// Precision suggested for labels.
    pub display_decimals: u32,
    pub allow_decimals: bool,
    /// Higher values plot lower.
    pub reversed: bool,
}

impl AxisBounds {
    pub fn segments(&self) -> usize {
        self.ticks.len().saturating_sub(1)
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// Compute axis bounds for a statistic.
pub fn compute_axis_bounds(stat: &StatDescriptor, options: &AxisOptions) -> AxisBounds {
    compute_axis_bounds_traced(stat, options, &mut NoopSink)
}

/// Same as [`compute_axis_bounds`], reporting every search decision to `sink`.
pub fn compute_axis_bounds_traced(stat: &StatDescriptor, options: &AxisOptions, sink: &mut dyn DebugSink) -> AxisBounds {
    let resolved = ResolvedOptions::resolve(options, stat.is_percent);
    let plan = AxisPlan::build(stat, &resolved);
    tracing::trace!(
        data_min = plan.data_min,
        data_max = plan.data_max,
        desired_ticks = resolved.desired_tick_count,
        thousandths = plan.thousandths,
        allow_decimals = plan.allow_decimal_ticks,
        decimal_cap = plan.decimal_cap,
        minimum_interval = plan.minimum_tick_interval,
        "axis plan"
    );

    let mut best: Option<Outcome> = None;
    for step in candidate_steps(&plan, sink) {
        if let Some(outcome) = evaluate_step(&plan, step, sink) {
            // strict comparison keeps the earliest candidate on ties
            if best.as_ref().map_or(true, |b| outcome.score < b.score) {
                best = Some(outcome);
            }
        }
    }

    if best.is_none() {
        sink.append(DebugRecord::Fallback { tier: FallbackTier::MinimumInterval });
        best = evaluate_step(&plan, plan.minimum_tick_interval, sink);
    }
    let outcome = match best {
        Some(outcome) => {
            tracing::debug!(
                step = outcome.step,
                min = outcome.min,
                max = outcome.max,
                segments = outcome.ticks.len() - 1,
                score = outcome.score,
                "selected axis step"
            );
            outcome
        }
        None => synthesize(&plan, sink),
    };

    AxisBounds {
        min: outcome.min,
        max: outcome.max,
        ticks: outcome.ticks,
        decimals: outcome.decimals,
        display_decimals: outcome.display_decimals,
        allow_decimals: plan.allow_decimal_ticks,
        reversed: plan.reversed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_series_gets_unit_ticks_from_zero() {
        let b = compute_axis_bounds(&StatDescriptor::from_values([1.0, 2.0, 3.0, 4.0, 5.0]), &AxisOptions::default());
        assert_eq!(b.min, 0.0);
        assert!(b.max > 5.0);
        assert!(!b.allow_decimals);
        assert!(b.ticks.iter().all(|t| t.fract() == 0.0));
        assert!((5..=9).contains(&b.ticks.len()));
    }

    #[test]
    fn reversed_flag_is_carried() {
        let stat = StatDescriptor::from_values([3.0, 1.0]).upside_down();
        assert!(compute_axis_bounds(&stat, &AxisOptions::default()).reversed);
    }

    #[test]
    fn trace_records_candidates_and_accepts() {
        let mut records = Vec::new();
        let b = compute_axis_bounds_traced(&StatDescriptor::from_values([12.0, 48.0, 33.0]), &AxisOptions::default(), &mut records);
        assert!(records.iter().any(|r| matches!(r, DebugRecord::Candidate { .. })));
        assert!(records.iter().any(|r| matches!(r, DebugRecord::Accept { .. })));
        assert_eq!(b.ticks.first(), Some(&b.min));
        assert_eq!(b.ticks.last(), Some(&b.max));
    }

    #[test]
    fn segments_and_span_helpers() {
        let b = compute_axis_bounds(&StatDescriptor::default(), &AxisOptions::new().with_override(10.0, 50.0).with_manual_divisions(4));
        assert_eq!(b.segments(), 4);
        assert_eq!(b.span(), 40.0);
    }
}

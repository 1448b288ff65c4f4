// File: crates/booklet-axis/src/candidates.rs
// Summary: Builds the ordered set of distinct tick-step candidates for a plan.

use crate::debug::{DebugRecord, DebugSink};
use crate::decimals::{normalize_precision, round_half_up};
use crate::nice::{nice_step, snap_step, NiceConstraints};
use crate::range::AxisPlan;

/// Insertion-ordered step set; steps equal at 12 significant digits collapse.
struct StepSet<'a> {
    plan: &'a AxisPlan,
    steps: Vec<f64>,
}

impl<'a> StepSet<'a> {
    fn new(plan: &'a AxisPlan) -> Self {
        Self { plan, steps: Vec::new() }
    }

    fn add(&mut self, value: f64, snap: bool, sink: &mut dyn DebugSink) {
        if !value.is_finite() {
            return;
        }
        let minimum = self.plan.minimum_tick_interval;
        let allow = self.plan.allow_decimal_ticks;
        let base = if snap { snap_step(value, minimum, allow) } else { value.max(minimum) };
        let step = if allow { base.max(minimum) } else { round_half_up(base).max(1.0) };
        if !step.is_finite() || step <= 0.0 {
            return;
        }
        let normalized = normalize_precision(step);
        if normalized > 0.0 && !self.steps.contains(&normalized) {
            self.steps.push(normalized);
        }
        sink.append(DebugRecord::Candidate { raw: value, snapped: normalized });
    }
}

/// Candidate steps in evaluation order.
pub(crate) fn candidate_steps(plan: &AxisPlan, sink: &mut dyn DebugSink) -> Vec<f64> {
    let mut set = StepSet::new(plan);
    let minimum = plan.minimum_tick_interval;

    if plan.manual_segments.is_some() {
        set.add(plan.base_step_raw, false, sink);
    } else {
        let nice_base = snap_step(plan.base_step_raw, minimum, plan.allow_decimal_ticks);
        set.add(nice_base, true, sink);
        set.add(plan.base_step_raw, true, sink);

        let mut constraints = if plan.allow_decimal_ticks {
            NiceConstraints::fractional()
        } else {
            NiceConstraints::integer()
        }
        .with_minimum(minimum);
        constraints.is_percent = plan.is_percent;
        set.add(nice_step(plan.base_step_raw, constraints), false, sink);

        let clamp = |n: usize| n.clamp(plan.minimum_segments, plan.maximum_segments);
        let preferred = plan.preferred_segments;
        let mut seeds: Vec<usize> = Vec::new();
        let mut seed = |n: usize| {
            if !seeds.contains(&n) {
                seeds.push(n);
            }
        };
        seed(clamp(preferred));
        seed(clamp(preferred + 1));
        seed(clamp(preferred.saturating_sub(1)));
        seed(plan.minimum_segments);
        seed(clamp(plan.minimum_segments + 1));
        seed(clamp(plan.minimum_segments + 2));
        seed(clamp(round_half_up(preferred as f64 * 1.5) as usize));
        seed(clamp(preferred * 2));
        if let Some(range) = plan.explicit_range.filter(|r| *r > 0.0) {
            let explicit_segments = round_half_up(range / minimum.max(nice_base)).max(1.0) as usize;
            seed(clamp(explicit_segments));
        }
        for segments in seeds.into_iter().filter(|n| *n > 0) {
            set.add(plan.range_for_steps / segments as f64, true, sink);
        }

        if plan.allow_decimal_ticks {
            set.add(nice_base / 2.0, true, sink);
            set.add(nice_base / 5.0, true, sink);
            set.add(nice_base * 2.0, true, sink);
        } else {
            set.add(nice_base * 2.0, true, sink);
            set.add(nice_base / 2.0, true, sink);
        }
        set.add(minimum, true, sink);
    }

    if let (Some(lo), Some(hi)) = (plan.override_min, plan.override_max) {
        if hi > lo {
            for segments in plan.minimum_segments..=plan.maximum_segments {
                set.add((hi - lo) / segments as f64, true, sink);
            }
        }
    }

    set.steps
}

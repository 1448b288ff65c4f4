// File: crates/booklet-axis/src/range.rs
// Summary: Data-range derivation, padding and decimal policy; produces the plan every candidate is judged against.

use crate::decimals::{count_decimals, has_fraction, has_thousandths, round_at, ZERO_EPSILON};
use crate::nice::{nice_step, NiceConstraints};
use crate::options::ResolvedOptions;
use crate::policy::AxisPolicy;
use crate::stat::StatDescriptor;

/// Everything the step search needs, derived once per call.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct AxisPlan {
    pub is_percent: bool,
    pub reversed: bool,
    /// Percent axis whose samples all sit inside `[0, 100]`.
    pub percent_within_bounds: bool,
    pub has_negatives: bool,

    pub data_min: f64,
    pub data_max: f64,
    pub padded_min: f64,
    pub padded_max: f64,
    pub padding: f64,

    pub override_min: Option<f64>,
    pub override_max: Option<f64>,
    pub manual_segments: Option<usize>,
    pub explicit_min: Option<f64>,
    pub explicit_max: Option<f64>,
    pub explicit_segment: Option<f64>,
    pub explicit_range: Option<f64>,

    pub max_decimal_precision: u32,
    pub explicit_segment_precision: u32,
    pub override_precision: u32,
    pub requested_min_interval: Option<f64>,
    pub thousandths: bool,
    pub allow_fine_decimals: bool,
    pub allow_decimal_ticks: bool,
    pub decimal_cap: u32,
    pub dominant_magnitude: f64,
    pub minimum_tick_interval: f64,

    pub preferred_segments: usize,
    pub minimum_segments: usize,
    pub maximum_segments: usize,
    pub range_for_steps: f64,
    pub base_step_raw: f64,

    pub policy: AxisPolicy,
}

impl AxisPlan {
    pub fn build(stat: &StatDescriptor, opts: &ResolvedOptions) -> Self {
        let policy = opts.policy;
        let is_percent = stat.is_percent;
        let override_min = opts.override_min;
        let override_max = opts.override_max;
        let target = opts.target_divisions.max(1) as f64;

        // 1. gather
        let values: Vec<f64> = stat.values().collect();
        let has_values = !values.is_empty();
        let max_decimal_precision = values.iter().map(|v| count_decimals(*v)).max().unwrap_or(0);
        let thousandths = has_values && has_thousandths(&values);
        let percent_within_bounds =
            is_percent && values.iter().all(|v| *v >= -ZERO_EPSILON && *v <= 100.0 + ZERO_EPSILON);
        let has_negatives = values.iter().any(|v| *v < -ZERO_EPSILON);
        let has_positives = values.iter().any(|v| *v > ZERO_EPSILON);
        let all_zero = has_values && !has_negatives && !has_positives;

        // 2. resolve range
        let (explicit_min_source, explicit_max_source) = match (stat.explicit_min(), stat.explicit_max()) {
            (Some(lo), Some(hi)) if hi <= lo => {
                tracing::warn!(min = lo, max = hi, "ignoring inverted declared bounds");
                (None, None)
            }
            pair => pair,
        };
        let explicit_range = match (explicit_min_source, explicit_max_source) {
            (Some(lo), Some(hi)) if hi > lo => Some(hi - lo),
            _ => None,
        };
        let (mut data_min, mut data_max) = if has_values {
            (
                values.iter().copied().fold(f64::INFINITY, f64::min),
                values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            )
        } else if is_percent {
            (0.0, 100.0)
        } else {
            (0.0, 1.0)
        };
        // declared floors only go negative when the data does
        let explicit_min = explicit_min_source.map(|v| if has_negatives { v } else { v.max(0.0) });
        let explicit_max = explicit_max_source;
        if let Some(lo) = explicit_min {
            data_min = data_min.min(lo);
        }
        if let Some(hi) = explicit_max {
            data_max = data_max.max(hi);
        }
        if let Some(lo) = override_min {
            data_min = data_min.min(lo);
        }
        if let Some(hi) = override_max {
            data_max = data_max.max(hi);
        }

        // 3. special cases
        let percent_high_cluster = percent_within_bounds
            && !has_negatives
            && data_min >= policy.percent_cluster_floor
            && data_max <= policy.percent_cluster_ceiling;
        if percent_high_cluster && max_decimal_precision == 0 && !thousandths {
            data_min = data_min.min(policy.percent_cluster_widen_to);
            data_max = data_max.max(policy.percent_cluster_ceiling);
        }

        if all_zero && !is_percent {
            data_min = override_min.unwrap_or(0.0);
            if let Some(hi) = override_max {
                data_max = hi;
            } else if override_min.is_none() && explicit_max.is_none() {
                data_max = data_max.max(policy.all_zero_ceiling);
            } else {
                data_max = data_max.max(if data_min == 0.0 { 1.0 } else { data_min + 1.0 });
            }
        } else if data_min == data_max {
            let reference = if data_max == 0.0 { 1.0 } else { data_max.abs() };
            let lift = (reference * 0.25).max(if is_percent { 1.0 } else { 0.5 });
            data_min -= lift;
            data_max += lift;
        }

        // 4. pad
        let mut padded_min = override_min.unwrap_or(data_min);
        let mut padded_max = override_max.unwrap_or(data_max);
        let span = (padded_max - padded_min).max(f64::EPSILON);
        let mut padding = span * opts.pad_fraction;
        if !padding.is_finite() || padding <= ZERO_EPSILON {
            let base = if is_percent { 1.0 } else { padded_max.abs().max(1.0) };
            padding = base * opts.pad_fraction;
        }
        if (override_min.is_none() || override_max.is_none()) && has_values {
            let raw_span = (data_max - data_min).abs().max(f64::EPSILON);
            let seed = raw_span / target;
            if raw_span > ZERO_EPSILON && seed.is_finite() && seed > ZERO_EPSILON {
                let multiplier = if is_percent { 0.35 } else { 0.5 };
                let minimum_pad = (seed * multiplier).max(f64::EPSILON);
                let capped = if percent_within_bounds { minimum_pad.min(10.0) } else { minimum_pad };
                padding = padding.max(capped);
            }
        }
        let pad_boost = span * if is_percent { 0.005 } else { 0.01 };
        if override_min.is_none() {
            padded_min -= padding + pad_boost;
        }
        if override_max.is_none() {
            padded_max += padding + pad_boost;
        }

        if percent_within_bounds {
            padded_min = padded_min.max(0.0);
            padded_max = padded_max.min(100.0);
        } else if !has_negatives && override_min.is_none() && override_max.map_or(true, |hi| hi > 0.0) {
            padded_min = padded_min.max(0.0);
        }
        if all_zero && !is_percent && override_max.is_none() && explicit_max.is_none() {
            padded_max = padded_max.max(policy.all_zero_ceiling);
        }
        if padded_max <= padded_min {
            if override_max.is_some() && override_min.is_none() {
                // a lone hard max stays put; the floor moves below it
                padded_min = padded_max - padded_max.abs().max(1.0);
                if !has_negatives && padded_max > 0.0 {
                    padded_min = padded_min.max(0.0);
                }
            } else {
                padded_max = padded_min + padded_min.abs().max(1.0);
            }
        }

        // 5. decimal policy
        let explicit_segment = explicit_range.map(|r| r.abs() / target);
        let explicit_segment_precision = explicit_segment.map(count_decimals).unwrap_or(0);
        let override_range = match (override_min, override_max) {
            (Some(lo), Some(hi)) => Some((hi - lo).abs()),
            _ => None,
        };
        let fraction_precision = |v: Option<f64>| v.filter(|x| has_fraction(*x)).map(count_decimals).unwrap_or(0);
        let override_precision = fraction_precision(override_min).max(fraction_precision(override_max));
        let manual_step_estimate = match (opts.manual_segments, override_range) {
            (Some(n), Some(r)) => Some(r / n.max(1) as f64),
            _ => None,
        };
        let manual_step_fractional = manual_step_estimate.is_some_and(has_fraction);

        let fractional_evidence = max_decimal_precision > 0
            || explicit_min.is_some_and(has_fraction)
            || explicit_max.is_some_and(has_fraction)
            || override_precision > 0
            || thousandths
            || manual_step_fractional;

        let base_decimal_cap = if is_percent { 2 } else { 4 };
        let auto_decimal_cap = base_decimal_cap
            .max(max_decimal_precision)
            .max(explicit_segment_precision)
            .max(if thousandths { 3 } else { 0 })
            .max(override_precision)
            .min(6);
        let mut decimal_cap = opts.decimal_cap.unwrap_or(auto_decimal_cap);

        let span_magnitude = (padded_max - padded_min).abs();
        let dominant_magnitude = padded_min.abs().max(padded_max.abs()).max(data_min.abs()).max(data_max.abs());
        let estimated_auto_step = span_magnitude / target;
        let manual_step_below_one = manual_step_estimate.is_some_and(|s| s < 1.0 - ZERO_EPSILON);
        let allow_fine_decimals = thousandths
            || dominant_magnitude < 1.0 + ZERO_EPSILON
            || span_magnitude < 1.0 - ZERO_EPSILON
            || manual_step_below_one;

        if is_percent {
            let (floor, ceiling) = if allow_fine_decimals { (2, 4) } else { (0, 1) };
            if let Some(step) = manual_step_estimate.filter(|s| *s > ZERO_EPSILON && *s < 1.0 - ZERO_EPSILON) {
                let wanted = count_decimals(step).clamp(floor, ceiling);
                decimal_cap = decimal_cap.max(wanted);
            }
            decimal_cap = decimal_cap.clamp(floor, ceiling);
        } else if !allow_fine_decimals {
            decimal_cap = decimal_cap.min(if dominant_magnitude < 10.0 { 2 } else { 1 });
        }
        // a manual split must be representable, whatever the domain caps say
        if opts.decimal_cap.is_none() && manual_step_fractional {
            if let Some(step) = manual_step_estimate {
                decimal_cap = decimal_cap.max(count_decimals(step).min(6));
            }
        }

        // The auto estimate is judged by the nice step it would snap to, so
        // a span just under `target` still gets whole-number ticks.
        let estimated_nice = if estimated_auto_step.is_finite() && estimated_auto_step > 0.0 {
            Some(nice_step(estimated_auto_step, NiceConstraints::fractional()))
        } else {
            None
        };
        let mut allow_decimal_ticks = fractional_evidence
            || opts.requested_min_interval.is_some_and(|m| m < 1.0)
            || estimated_nice.is_some_and(|s| s < 1.0 - ZERO_EPSILON)
            || manual_step_below_one;

        let span_to_magnitude = if dominant_magnitude > ZERO_EPSILON {
            span_magnitude / dominant_magnitude
        } else {
            f64::INFINITY
        };
        if opts.manual_segments.is_none()
            && !is_percent
            && !fractional_evidence
            && dominant_magnitude >= 100.0 - ZERO_EPSILON
            && span_to_magnitude < 0.05 - ZERO_EPSILON
        {
            allow_decimal_ticks = false;
        }

        let base_minimum_interval = if allow_decimal_ticks { 10f64.powi(-(decimal_cap as i32)) } else { 1.0 };
        let mut minimum_tick_interval = base_minimum_interval;
        if let Some(requested) = opts.requested_min_interval {
            minimum_tick_interval = if allow_decimal_ticks {
                requested.min(base_minimum_interval).max(f64::EPSILON)
            } else {
                requested.max(base_minimum_interval)
            };
        }
        if let Some(step) = manual_step_estimate.filter(|s| *s > ZERO_EPSILON) {
            minimum_tick_interval = minimum_tick_interval.min(step.max(f64::EPSILON));
        }
        if allow_decimal_ticks {
            if is_percent {
                match manual_step_estimate {
                    Some(step) if step > ZERO_EPSILON && step < 0.1 => {
                        minimum_tick_interval = minimum_tick_interval.min(step).max(f64::EPSILON);
                    }
                    _ if allow_fine_decimals => minimum_tick_interval = minimum_tick_interval.max(0.1),
                    _ => minimum_tick_interval = minimum_tick_interval.max(1.0),
                }
            } else if !allow_fine_decimals {
                minimum_tick_interval = minimum_tick_interval.max(0.1);
            }
        }
        // ticks finer than the decimal cap would round onto each other
        if allow_decimal_ticks {
            minimum_tick_interval = minimum_tick_interval.max(base_minimum_interval);
        }
        // a manual split may sit below the domain minimum; it still wins
        if let Some(step) = manual_step_estimate.filter(|s| *s > ZERO_EPSILON) {
            minimum_tick_interval = minimum_tick_interval.min(step);
        }

        // segment window and ideal step
        let manual_segments = opts.manual_segments;
        let min_auto = policy.min_auto_segments;
        let max_auto = policy.max_auto_segments.max(min_auto);
        let preferred_segments = manual_segments.unwrap_or_else(|| opts.target_divisions.clamp(min_auto, max_auto));
        let range_for_steps = (padded_max - padded_min).max(minimum_tick_interval);
        let base_step_raw = match (manual_segments, override_range) {
            (Some(n), Some(r)) => (r / n as f64).max(minimum_tick_interval),
            _ => range_for_steps / preferred_segments.max(1) as f64,
        };

        Self {
            is_percent,
            reversed: stat.upside_down,
            percent_within_bounds,
            has_negatives,
            data_min,
            data_max,
            padded_min,
            padded_max,
            padding,
            override_min,
            override_max,
            manual_segments,
            explicit_min,
            explicit_max,
            explicit_segment,
            explicit_range,
            max_decimal_precision,
            explicit_segment_precision,
            override_precision,
            requested_min_interval: opts.requested_min_interval,
            thousandths,
            allow_fine_decimals,
            allow_decimal_ticks,
            decimal_cap,
            dominant_magnitude,
            minimum_tick_interval,
            preferred_segments,
            minimum_segments: manual_segments.unwrap_or(min_auto),
            maximum_segments: manual_segments.unwrap_or(max_auto),
            range_for_steps,
            base_step_raw,
            policy,
        }
    }

    /// Rounding precision for ticks laid out with `step`.
    pub fn step_decimals(&self, step: f64) -> u32 {
        if !self.allow_decimal_ticks {
            return 0;
        }
        count_decimals(step)
            .max(self.max_decimal_precision)
            .max(self.explicit_segment_precision)
            .max(self.override_precision)
            .min(self.decimal_cap)
    }

    /// Round a tick position at the precision implied by `step`.
    pub fn round_for(&self, value: f64, step: f64) -> f64 {
        round_at(value, self.step_decimals(step))
    }

    /// Integer steps on whole-number axes, the raw step otherwise.
    pub fn normalize_step(&self, step: f64) -> f64 {
        if self.allow_decimal_ticks {
            step
        } else {
            crate::decimals::round_half_up(step).max(1.0)
        }
    }

    /// Cap applied to display precision on the synthesized paths.
    pub fn fallback_display_cap(&self, decimals: u32) -> u32 {
        if self.is_percent {
            decimals.min(1)
        } else if self.dominant_magnitude < 10.0 {
            decimals.min(2)
        } else {
            decimals
        }
    }

    /// Whether the low end must stay at or above zero. A hard max at or
    /// below zero wins over the floor.
    pub fn zero_floor(&self) -> bool {
        !self.has_negatives && self.override_min.is_none() && self.override_max.map_or(true, |hi| hi > 0.0)
    }
}

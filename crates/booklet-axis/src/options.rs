// File: crates/booklet-axis/src/options.rs
// Summary: Caller options for axis computation and their clamped, resolved form.

use crate::policy::AxisPolicy;
use serde::{Deserialize, Serialize};

/// Caller-facing options; every field is optional and non-finite numbers
/// are treated as absent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisOptions {
    /// Desired tick count, clamped to 4..=12 (default 6).
    pub desired_tick_count: Option<f64>,
    /// Decimal cap, clamped to 0..=6.
    pub decimal_cap: Option<f64>,
    /// Padding fraction of the span, clamped to 0..=0.4.
    pub pad_fraction: Option<f64>,
    /// Hard lower bound.
    pub min: Option<f64>,
    /// Hard upper bound.
    pub max: Option<f64>,
    /// Segment count when both hard bounds are set, clamped to 4..=16.
    pub manual_divisions: Option<f64>,
    pub minimum_tick_interval: Option<f64>,
    pub policy: AxisPolicy,
}

impl AxisOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_override(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    pub fn with_manual_divisions(mut self, divisions: usize) -> Self {
        self.manual_divisions = Some(divisions as f64);
        self
    }

    pub fn with_desired_tick_count(mut self, count: usize) -> Self {
        self.desired_tick_count = Some(count as f64);
        self
    }

    pub fn with_policy(mut self, policy: AxisPolicy) -> Self {
        self.policy = policy;
        self
    }
}

fn finite(v: Option<f64>) -> Option<f64> {
    v.filter(|x| x.is_finite())
}

/// Options after clamping and override reconciliation.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ResolvedOptions {
    pub desired_tick_count: usize,
    pub target_divisions: usize,
    pub decimal_cap: Option<u32>,
    pub pad_fraction: f64,
    pub requested_min_interval: Option<f64>,
    pub override_min: Option<f64>,
    pub override_max: Option<f64>,
    /// Set only when both overrides are present and ordered.
    pub manual_segments: Option<usize>,
    pub policy: AxisPolicy,
}

impl ResolvedOptions {
    pub fn resolve(options: &AxisOptions, is_percent: bool) -> Self {
        let desired_tick_count = finite(options.desired_tick_count)
            .map(|v| v.clamp(4.0, 12.0).floor() as usize)
            .unwrap_or(6);
        let target_divisions = desired_tick_count.saturating_sub(1).clamp(4, 12);
        let decimal_cap = finite(options.decimal_cap).map(|v| v.clamp(0.0, 6.0).floor() as u32);
        let pad_fraction = finite(options.pad_fraction)
            .map(|v| v.clamp(0.0, 0.4))
            .unwrap_or(if is_percent { 0.03 } else { 0.08 });
        let requested_min_interval = finite(options.minimum_tick_interval).map(|v| v.abs().max(f64::EPSILON));

        let mut override_min = finite(options.min);
        let mut override_max = finite(options.max);
        if let (Some(lo), Some(hi)) = (override_min, override_max) {
            if hi <= lo {
                tracing::warn!(min = lo, max = hi, "ignoring inverted axis override");
                override_min = None;
                override_max = None;
            }
        }
        let manual_segments = match (override_min, override_max) {
            (Some(_), Some(_)) => {
                let requested = finite(options.manual_divisions)
                    .filter(|v| *v >= 1.0)
                    .map(|v| v.floor() as usize)
                    .unwrap_or(desired_tick_count - 1);
                Some(requested.clamp(4, 16))
            }
            _ => None,
        };

        Self {
            desired_tick_count,
            target_divisions,
            decimal_cap,
            pad_fraction,
            requested_min_interval,
            override_min,
            override_max,
            manual_segments,
            policy: options.policy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_domain() {
        let r = ResolvedOptions::resolve(&AxisOptions::default(), false);
        assert_eq!(r.desired_tick_count, 6);
        assert_eq!(r.target_divisions, 5);
        assert_eq!(r.pad_fraction, 0.08);
        assert_eq!(r.manual_segments, None);
        let r = ResolvedOptions::resolve(&AxisOptions::default(), true);
        assert_eq!(r.pad_fraction, 0.03);
    }

    #[test]
    fn clamps_out_of_range_values() {
        let opts = AxisOptions {
            desired_tick_count: Some(40.0),
            decimal_cap: Some(9.0),
            pad_fraction: Some(2.0),
            minimum_tick_interval: Some(-0.5),
            ..AxisOptions::default()
        };
        let r = ResolvedOptions::resolve(&opts, false);
        assert_eq!(r.desired_tick_count, 12);
        assert_eq!(r.target_divisions, 11);
        assert_eq!(r.decimal_cap, Some(6));
        assert_eq!(r.pad_fraction, 0.4);
        assert_eq!(r.requested_min_interval, Some(0.5));
    }

    #[test]
    fn non_finite_options_are_absent() {
        let opts = AxisOptions { min: Some(f64::NAN), max: Some(f64::INFINITY), ..AxisOptions::default() };
        let r = ResolvedOptions::resolve(&opts, false);
        assert_eq!(r.override_min, None);
        assert_eq!(r.override_max, None);
    }

    #[test]
    fn manual_segments_need_both_overrides() {
        let r = ResolvedOptions::resolve(&AxisOptions::new().with_override(10.0, 50.0), false);
        assert_eq!(r.manual_segments, Some(5));
        let r = ResolvedOptions::resolve(&AxisOptions::new().with_override(0.0, 1.0).with_manual_divisions(30), false);
        assert_eq!(r.manual_segments, Some(16));
        let opts = AxisOptions { min: Some(3.0), ..AxisOptions::default() };
        assert_eq!(ResolvedOptions::resolve(&opts, false).manual_segments, None);
    }

    #[test]
    fn inverted_override_pair_is_dropped() {
        let r = ResolvedOptions::resolve(&AxisOptions::new().with_override(50.0, 10.0), false);
        assert_eq!(r.override_min, None);
        assert_eq!(r.override_max, None);
        assert_eq!(r.manual_segments, None);
    }
}

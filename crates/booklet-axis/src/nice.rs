// File: crates/booklet-axis/src/nice.rs
// Summary: "Nice" step selection (1-2-5 magnitude families and percent-friendly lists).

/// Percent steps when fractional ticks are allowed.
const PERCENT_STEPS_FRACTIONAL: [f64; 17] = [
    0.001, 0.002, 0.005, 0.01, 0.02, 0.05, 0.1, 0.2, 0.25, 0.5, 1.0, 2.0, 5.0, 10.0, 20.0, 25.0, 50.0,
];
/// Percent steps for integer axes.
const PERCENT_STEPS_INTEGER: [f64; 7] = [1.0, 2.0, 5.0, 10.0, 20.0, 25.0, 50.0];

/// Mantissas tried by [`snap_step`] on fractional axes.
const SNAP_DIGITS_FRACTIONAL: [f64; 8] = [1.0, 1.25, 1.5, 2.0, 2.5, 3.0, 4.0, 5.0];
/// Mantissas tried by [`snap_step`] on integer axes.
const SNAP_DIGITS_INTEGER: [f64; 5] = [1.0, 2.0, 3.0, 4.0, 5.0];

/// Constraints for [`nice_step`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NiceConstraints {
    pub allow_decimals: bool,
    pub is_percent: bool,
    /// Lower bound on the result; defaults to 1 (integer) or `f64::EPSILON`.
    pub minimum: Option<f64>,
}

impl NiceConstraints {
    pub fn integer() -> Self {
        Self::default()
    }

    pub fn fractional() -> Self {
        Self { allow_decimals: true, ..Self::default() }
    }

    pub fn percent(mut self) -> Self {
        self.is_percent = true;
        self
    }

    pub fn with_minimum(mut self, minimum: f64) -> Self {
        self.minimum = Some(minimum);
        self
    }

    fn floor(&self) -> f64 {
        let requested = self.minimum.filter(|m| m.is_finite() && *m > 0.0);
        if self.allow_decimals {
            requested.unwrap_or(f64::EPSILON).max(f64::EPSILON)
        } else {
            requested.unwrap_or(1.0).max(1.0)
        }
    }
}

/// Map a raw step onto the 1-2-5 family (1-2-2.5-5 when fractional ticks are
/// allowed), or onto the percent list for percent axes. The sign of `raw` is
/// kept and the result never drops below the constraint minimum.
pub fn nice_step(raw: f64, constraints: NiceConstraints) -> f64 {
    let minimum = constraints.floor();
    if !raw.is_finite() || raw == 0.0 {
        return minimum;
    }
    let abs = raw.abs();
    let magnitude = 10f64.powf(abs.log10().floor());
    let fraction = abs / magnitude;
    let nice_fraction = if constraints.allow_decimals {
        match fraction {
            f if f <= 1.0 => 1.0,
            f if f <= 2.0 => 2.0,
            f if f <= 2.5 => 2.5,
            f if f <= 5.0 => 5.0,
            _ => 10.0,
        }
    } else {
        match fraction {
            f if f <= 1.0 => 1.0,
            f if f <= 2.5 => 2.0,
            f if f <= 5.0 => 5.0,
            _ => 10.0,
        }
    };
    let mut step = nice_fraction * magnitude;
    if constraints.is_percent {
        let choices: &[f64] = if constraints.allow_decimals {
            &PERCENT_STEPS_FRACTIONAL
        } else {
            &PERCENT_STEPS_INTEGER
        };
        let last = choices[choices.len() - 1];
        let adjusted = choices.iter().copied().find(|c| *c >= step).unwrap_or(last);
        step = adjusted.max(minimum);
    } else {
        step = step.max(minimum);
    }
    if !constraints.allow_decimals && step.fract() != 0.0 {
        step = step.ceil();
    }
    if raw < 0.0 { -step } else { step }
}

/// Snap `value` to the closest member of the richer mantissa family across
/// three neighbouring magnitudes. Ties go to the smaller step; the result is
/// never below `minimum` and is a whole number on integer axes.
pub fn snap_step(value: f64, minimum: f64, allow_decimals: bool) -> f64 {
    if !value.is_finite() || value <= 0.0 {
        return minimum;
    }
    let abs = value.abs().max(minimum);
    let magnitude = 10f64.powf(abs.log10().floor());
    let digits: &[f64] = if allow_decimals { &SNAP_DIGITS_FRACTIONAL } else { &SNAP_DIGITS_INTEGER };

    let mut snapped: Option<f64> = None;
    let mut best_diff = f64::INFINITY;
    for scale in [1.0, 10.0, 0.1] {
        for digit in digits {
            let candidate = digit * magnitude * scale;
            if !candidate.is_finite() {
                continue;
            }
            let adjusted = candidate.max(minimum);
            let diff = (adjusted - abs).abs();
            let tie = (diff - best_diff).abs() <= 1e-12;
            if diff < best_diff - 1e-12 || (tie && snapped.map_or(true, |s| adjusted < s)) {
                best_diff = diff;
                snapped = Some(adjusted);
            }
        }
    }
    let mut snapped = snapped.unwrap_or(abs);
    if !allow_decimals {
        snapped = crate::decimals::round_half_up(snapped).max(1.0);
    }
    snapped.max(minimum)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_family() {
        let c = NiceConstraints::integer();
        assert_eq!(nice_step(7.0, c), 10.0);
        assert_eq!(nice_step(2.2, c), 2.0);
        assert_eq!(nice_step(3.0, c), 5.0);
        assert_eq!(nice_step(120.0, c), 200.0);
        // never below the integer floor
        assert_eq!(nice_step(0.3, c), 1.0);
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn fractional_family_includes_two_and_a_half() {
        let c = NiceConstraints::fractional();
        assert!(close(nice_step(0.23, c), 0.25));
        assert!(close(nice_step(0.18, c), 0.2));
        assert!(close(nice_step(0.04, c), 0.05));
    }

    #[test]
    fn percent_lists() {
        assert_eq!(nice_step(7.0, NiceConstraints::integer().percent()), 10.0);
        assert_eq!(nice_step(30.0, NiceConstraints::integer().percent()), 50.0);
        assert_eq!(nice_step(700.0, NiceConstraints::integer().percent()), 50.0);
        assert!(close(nice_step(0.15, NiceConstraints::fractional().percent()), 0.2));
    }

    #[test]
    fn sign_and_minimum() {
        assert_eq!(nice_step(-7.0, NiceConstraints::integer()), -10.0);
        assert_eq!(nice_step(0.0, NiceConstraints::integer().with_minimum(3.0)), 3.0);
        assert_eq!(nice_step(f64::NAN, NiceConstraints::fractional()), f64::EPSILON);
        assert_eq!(nice_step(1.0, NiceConstraints::integer().with_minimum(4.0)), 4.0);
    }

    #[test]
    fn snap_prefers_nearest_then_smaller() {
        assert_eq!(snap_step(0.976, 0.1, true), 1.0);
        assert_eq!(snap_step(1.22, 0.1, true), 1.25);
        assert_eq!(snap_step(6.45, 1.0, false), 5.0);
        // 2.5 sits between 2 and 3 on integer axes
        assert_eq!(snap_step(2.5, 1.0, false), 2.0);
        assert_eq!(snap_step(0.5, 1.0, false), 1.0);
    }

    #[test]
    fn snap_degenerate_returns_minimum() {
        assert_eq!(snap_step(0.0, 0.01, true), 0.01);
        assert_eq!(snap_step(-3.0, 1.0, false), 1.0);
    }
}

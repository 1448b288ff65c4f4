// File: crates/booklet-axis/src/decimals.rs
// Summary: Decimal-precision inspection and precision-bounded rounding helpers.

/// Values closer to zero than this carry no fractional digits.
pub const NEAR_ZERO: f64 = 1e-12;

/// Tolerance used when comparing axis positions against step multiples.
pub const ZERO_EPSILON: f64 = 1e-9;

/// Round half towards positive infinity (`2.5 -> 3`, `-2.5 -> -2`).
#[inline]
pub fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 { floor + 1.0 } else { floor }
}

/// Number of significant fractional digits in `value`.
///
/// The value is normalised to 12 significant digits first, so binary noise
/// such as `0.1 + 0.2` counts as one digit. Exponent forms are handled by
/// shifting the exponent against the mantissa's fractional digits.
pub fn count_decimals(value: f64) -> u32 {
    if !value.is_finite() || value.abs() < NEAR_ZERO {
        return 0;
    }
    // `{:.11e}` yields exactly 12 significant digits, e.g. `1.25000000000e-3`.
    let text = format!("{:.11e}", value);
    let Some((mantissa, exponent)) = text.split_once('e') else { return 0 };
    let Ok(exponent) = exponent.parse::<i32>() else { return 0 };
    let fraction = mantissa.split_once('.').map(|(_, f)| f).unwrap_or("");
    let digits = fraction.trim_end_matches('0').len() as i32;
    (digits - exponent).max(0) as u32
}

/// Round to `decimals` (clamped to 0..=8) through a finer `10^(decimals+2)`
/// scale; callers re-round at the target precision when they need it.
pub fn round_to_decimals(value: f64, decimals: i32) -> f64 {
    let safe = decimals.clamp(0, 8);
    let factor = 10f64.powi(safe + 2);
    round_half_up(value * factor) / factor
}

/// Plain half-up rounding at `10^decimals`.
#[inline]
pub fn round_at(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    round_half_up(value * factor) / factor
}

/// True when any sub-unit magnitude carries three or more decimals.
pub fn has_thousandths(values: &[f64]) -> bool {
    values.iter().any(|v| v.is_finite() && v.abs() < 1.0 && count_decimals(*v) >= 3)
}

/// Whether `value` is off an integer by more than [`ZERO_EPSILON`].
#[inline]
pub fn has_fraction(value: f64) -> bool {
    (value - value.round()).abs() > ZERO_EPSILON
}

/// Normalise to 12 significant digits so near-identical floats compare equal.
pub fn normalize_precision(value: f64) -> f64 {
    if !value.is_finite() || value == 0.0 {
        return value;
    }
    format!("{:.11e}", value).parse::<f64>().unwrap_or(value)
}

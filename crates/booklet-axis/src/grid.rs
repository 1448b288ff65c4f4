// File: crates/booklet-axis/src/grid.rs
// Summary: Even-split tick layout helpers.

use crate::decimals::round_at;

/// `steps` evenly spaced values from `start` to `end`; both ends are exact.
pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    if steps < 2 { return vec![start, end]; }
    let step = (end - start) / (steps as f64 - 1.0);
    let mut out: Vec<f64> = (0..steps).map(|i| start + step * i as f64).collect();
    out[steps - 1] = end;
    out
}

/// Even split of `[start, end]` into `segments` with the interior rounded at
/// `decimals`. `None` when rounding would merge or reorder ticks.
pub fn rounded_split(start: f64, end: f64, segments: usize, decimals: u32) -> Option<Vec<f64>> {
    let mut ticks = linspace(start, end, segments.max(1) + 1);
    let last = ticks.len() - 1;
    for tick in &mut ticks[1..last] {
        *tick = round_at(*tick, decimals);
    }
    ticks.windows(2).all(|w| w[1] > w[0]).then_some(ticks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_keeps_exact_endpoints() {
        let v = linspace(0.1, 0.7, 7);
        assert_eq!(v.len(), 7);
        assert_eq!(v[0], 0.1);
        assert_eq!(v[6], 0.7);
        assert_eq!(linspace(2.0, 3.0, 1), vec![2.0, 3.0]);
    }

    #[test]
    fn rounded_split_rejects_collapsed_ticks() {
        assert_eq!(rounded_split(10.0, 50.0, 4, 0), Some(vec![10.0, 20.0, 30.0, 40.0, 50.0]));
        let thirds = rounded_split(0.0, 1.0, 6, 2).expect("distinct");
        assert_eq!(thirds[1], 0.17);
        assert_eq!(thirds[6], 1.0);
        assert_eq!(rounded_split(0.0, 0.001, 8, 2), None);
    }
}

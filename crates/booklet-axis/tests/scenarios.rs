// File: crates/booklet-axis/tests/scenarios.rs
// Purpose: Reference datasets and the axes they must produce.

use booklet_axis::{compute_axis_bounds, count_decimals, AxisOptions, Series, StatDescriptor};

#[test]
fn small_integer_series() {
    let b = compute_axis_bounds(&StatDescriptor::from_values([1.0, 2.0, 3.0, 4.0, 5.0]), &AxisOptions::default());
    assert_eq!(b.min, 0.0);
    assert!(b.max > 5.0);
    assert!(b.ticks.iter().all(|t| t.fract() == 0.0), "integer ticks: {:?}", b.ticks);
    assert!((5..=9).contains(&b.ticks.len()), "tick count: {:?}", b.ticks);
    assert_eq!(b.decimals, 0);
}

#[test]
fn high_percent_cluster_widens_down() {
    let stat = StatDescriptor::from_values([92.0, 95.0, 97.0, 99.0, 100.0]).percent();
    let b = compute_axis_bounds(&stat, &AxisOptions::default());
    assert!(b.min <= 70.0 && b.min >= 0.0, "min {}", b.min);
    assert_eq!(b.max, 100.0);
}

#[test]
fn all_zero_series() {
    let b = compute_axis_bounds(&StatDescriptor::from_values([0.0, 0.0, 0.0]), &AxisOptions::default());
    assert_eq!(b.min, 0.0);
    assert!(b.max >= 15.0);
}

#[test]
fn thousandths_allow_fine_ticks() {
    let b = compute_axis_bounds(&StatDescriptor::from_values([0.001, 0.002, 0.0015]), &AxisOptions::default());
    assert!(b.allow_decimals);
    assert!(b.decimals >= 3);
    assert!(b.min <= 0.001 && b.max >= 0.002);
}

#[test]
fn manual_divisions_split_exactly() {
    let opts = AxisOptions::new().with_override(10.0, 50.0).with_manual_divisions(4);
    let b = compute_axis_bounds(&StatDescriptor::from_values([12.0, 44.0]), &opts);
    assert_eq!(b.ticks, vec![10.0, 20.0, 30.0, 40.0, 50.0]);
    assert_eq!(b.min, 10.0);
    assert_eq!(b.max, 50.0);
}

#[test]
fn fractional_manual_split_keeps_every_tick() {
    let opts = AxisOptions::new().with_override(0.0, 1.0).with_manual_divisions(8);
    let b = compute_axis_bounds(&StatDescriptor::default(), &opts);
    assert_eq!(b.ticks.len(), 9);
    assert!((b.ticks[1] - 0.125).abs() < 1e-12);
    assert!(b.ticks.iter().all(|t| count_decimals(*t) <= b.decimals));
}

#[test]
fn negative_data_extends_below_zero() {
    let b = compute_axis_bounds(&StatDescriptor::from_values([-12.0, -3.0, 4.0, 9.0]), &AxisOptions::default());
    assert!(b.min <= -12.0);
    assert!(b.max >= 9.0);
    assert!(b.ticks.contains(&0.0), "zero should be a landmark: {:?}", b.ticks);
}

#[test]
fn inverted_override_falls_back_to_auto() {
    let stat = StatDescriptor::from_values([1.0, 2.0, 3.0, 4.0, 5.0]);
    let auto = compute_axis_bounds(&stat, &AxisOptions::default());
    let inverted = compute_axis_bounds(&stat, &AxisOptions::new().with_override(50.0, 10.0));
    assert_eq!(auto, inverted);
}

#[test]
fn single_override_is_kept_verbatim() {
    let opts = AxisOptions { min: Some(2.0), ..AxisOptions::default() };
    let b = compute_axis_bounds(&StatDescriptor::from_values([3.0, 9.0, 14.0]), &opts);
    assert_eq!(b.min, 2.0);
    assert!(b.max >= 14.0);
}

#[test]
fn minimum_interval_limits_step() {
    let opts = AxisOptions { minimum_tick_interval: Some(5.0), ..AxisOptions::default() };
    let b = compute_axis_bounds(&StatDescriptor::from_values([1.0, 2.0, 3.0, 4.0, 5.0]), &opts);
    assert!(b.ticks.windows(2).all(|w| w[1] - w[0] >= 5.0 - 1e-9), "{:?}", b.ticks);
}

#[test]
fn series_meta_bounds_widen_range() {
    let stat = StatDescriptor::new(vec![Series::with_data([20.0, 30.0]).with_meta(None, Some(80.0))]);
    let b = compute_axis_bounds(&stat, &AxisOptions::default());
    assert!(b.max >= 80.0);
    assert!(b.ticks.contains(&80.0) || b.max > 80.0);
}

#[test]
fn empty_stat_still_has_axis() {
    let b = compute_axis_bounds(&StatDescriptor::default(), &AxisOptions::default());
    assert!(b.max > b.min);
    assert!(b.ticks.len() >= 4);
    let p = compute_axis_bounds(&StatDescriptor::default().percent(), &AxisOptions::default());
    assert!(p.min >= 0.0 && p.max <= 100.0);
}

fn assert_unique_ascending(b: &booklet_axis::AxisBounds) {
    assert!(b.max > b.min, "{b:?}");
    assert_eq!(b.ticks.first(), Some(&b.min));
    assert_eq!(b.ticks.last(), Some(&b.max));
    assert!(b.ticks.windows(2).all(|w| w[1] > w[0]), "{:?}", b.ticks);
}

#[test]
fn fine_interval_under_coarse_decimal_cap() {
    let opts = AxisOptions { decimal_cap: Some(1.0), minimum_tick_interval: Some(0.01), ..AxisOptions::default() };
    let b = compute_axis_bounds(&StatDescriptor::from_values([0.01, 0.05]), &opts);
    assert_unique_ascending(&b);
    assert!(b.max >= 0.05);

    let opts = AxisOptions { decimal_cap: Some(0.0), minimum_tick_interval: Some(0.0), ..AxisOptions::default() };
    let b = compute_axis_bounds(&StatDescriptor::from_values([0.01, 0.01, 0.0]), &opts);
    assert_unique_ascending(&b);
    assert_eq!(b.min, 0.0);

    let opts = AxisOptions {
        decimal_cap: Some(0.0),
        minimum_tick_interval: Some(0.26),
        max: Some(1.5738),
        ..AxisOptions::default()
    };
    let b = compute_axis_bounds(&StatDescriptor::from_values([0.01]), &opts);
    assert_unique_ascending(&b);
    assert_eq!(b.max, 1.5738);
}

#[test]
fn lone_max_override_below_zero_is_honored() {
    let opts = AxisOptions { max: Some(-5.0), ..AxisOptions::default() };
    let b = compute_axis_bounds(&StatDescriptor::default(), &opts);
    assert_unique_ascending(&b);
    assert_eq!(b.max, -5.0);

    let opts = AxisOptions { max: Some(-2.0), ..AxisOptions::default() };
    let b = compute_axis_bounds(&StatDescriptor::from_values([3.0, 9.0, 14.0]), &opts);
    assert_unique_ascending(&b);
    assert_eq!(b.max, -2.0);
    assert!(b.min < -2.0);
}

#[test]
fn coarse_interval_on_percent_axis_still_covers_data() {
    let stat = StatDescriptor::from_values([0.0, 17.0, 97.0]).percent();
    for interval in [110.0, 186.39] {
        let opts = AxisOptions { minimum_tick_interval: Some(interval), ..AxisOptions::default() };
        let b = compute_axis_bounds(&stat, &opts);
        assert_unique_ascending(&b);
        assert!(b.min <= 0.0 && b.max >= 97.0 && b.max <= 100.0, "{interval}: {b:?}");
        assert_eq!(b.ticks, vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
    }
}

#[test]
fn inverted_declared_bounds_keep_zero_floor() {
    let stat = StatDescriptor::from_values([0.4, 1.2, 2.5]).with_bounds(Some(1.0), Some(-0.002));
    let b = compute_axis_bounds(&stat, &AxisOptions::default());
    assert_unique_ascending(&b);
    assert!(b.min >= 0.0, "{b:?}");
    assert!(b.max >= 2.5);
}

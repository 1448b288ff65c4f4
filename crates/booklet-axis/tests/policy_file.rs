// File: crates/booklet-axis/tests/policy_file.rs
// Purpose: Axis policy loaded from TOML changes the heuristics it names and nothing else.

use booklet_axis::{compute_axis_bounds, AxisOptions, AxisPolicy, PolicyError, StatDescriptor};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn partial_policy_file_overrides_cluster_floor() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "percent_cluster_widen_to = 80.0").unwrap();
    let policy = AxisPolicy::load(file.path()).unwrap();
    assert_eq!(policy.percent_cluster_widen_to, 80.0);
    assert_eq!(policy.all_zero_ceiling, AxisPolicy::default().all_zero_ceiling);

    let stat = StatDescriptor::from_values([92.0, 95.0, 97.0, 99.0, 100.0]).percent();
    let default = compute_axis_bounds(&stat, &AxisOptions::default());
    let tuned = compute_axis_bounds(&stat, &AxisOptions::new().with_policy(policy));
    assert!(tuned.min > default.min, "tuned {:?} default {:?}", tuned.ticks, default.ticks);
    assert_eq!(tuned.max, 100.0);
}

#[test]
fn all_zero_ceiling_is_tunable() {
    let policy = AxisPolicy::from_toml_str("all_zero_ceiling = 40.0").unwrap();
    let b = compute_axis_bounds(&StatDescriptor::from_values([0.0, 0.0]), &AxisOptions::new().with_policy(policy));
    assert!(b.max >= 40.0);
}

#[test]
fn missing_policy_file_reports_path() {
    let err = AxisPolicy::load("/nonexistent/booklet-policy.toml").unwrap_err();
    assert!(matches!(err, PolicyError::Io { .. }));
    assert!(err.to_string().contains("booklet-policy.toml"));
}

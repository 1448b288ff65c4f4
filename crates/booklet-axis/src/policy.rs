// File: crates/booklet-axis/src/policy.rs
// Summary: Tunable axis heuristics (thresholds, segment window, score weights) with TOML loading.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("failed to read policy file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid policy TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid policy: {0}")]
    Invalid(String),
}

/// Weights of the candidate score; lower totals win.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    /// Per segment away from the preferred count.
    pub segment_deviation: f64,
    /// Per unit of range beyond the padded data.
    pub coverage: f64,
    /// Per unit the padding falls short of the soft target.
    pub coverage_miss: f64,
    /// Per displayed decimal digit.
    pub display_decimals: f64,
    /// Times the relative drift from the ideal raw step.
    pub step_drift: f64,
    /// Added once when the span is not a whole number of steps.
    pub uneven_division: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            segment_deviation: 2e6,
            coverage: 4e5,
            coverage_miss: 1.5e6,
            display_decimals: 5e2,
            step_drift: 5e3,
            uneven_division: 1e7,
        }
    }
}

/// Display policy for value axes. `Default` carries the dashboard constants.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisPolicy {
    /// Percent data at or above this floor counts as a high cluster.
    pub percent_cluster_floor: f64,
    /// Upper edge of the high cluster.
    pub percent_cluster_ceiling: f64,
    /// A high cluster of whole percentages is widened down to this value.
    pub percent_cluster_widen_to: f64,
    /// Ceiling used when every sample is zero.
    pub all_zero_ceiling: f64,
    pub min_auto_segments: usize,
    pub max_auto_segments: usize,
    pub weights: ScoreWeights,
}

impl Default for AxisPolicy {
    fn default() -> Self {
        Self {
            percent_cluster_floor: 90.0,
            percent_cluster_ceiling: 100.0,
            percent_cluster_widen_to: 70.0,
            all_zero_ceiling: 15.0,
            min_auto_segments: 4,
            max_auto_segments: 15,
            weights: ScoreWeights::default(),
        }
    }
}

impl AxisPolicy {
    /// Parse a (possibly partial) policy; missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, PolicyError> {
        let policy: AxisPolicy = toml::from_str(text)?;
        policy.validate()?;
        Ok(policy)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, PolicyError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| PolicyError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Segment window must stay inside what a chart can label (4..=15).
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.min_auto_segments < 4 || self.max_auto_segments > 15 {
            return Err(PolicyError::Invalid(format!(
                "segment window {}..={} must lie within 4..=15",
                self.min_auto_segments, self.max_auto_segments
            )));
        }
        if self.min_auto_segments > self.max_auto_segments {
            return Err(PolicyError::Invalid("min_auto_segments exceeds max_auto_segments".into()));
        }
        let thresholds = [
            self.percent_cluster_floor,
            self.percent_cluster_ceiling,
            self.percent_cluster_widen_to,
            self.all_zero_ceiling,
        ];
        if thresholds.iter().any(|v| !v.is_finite()) {
            return Err(PolicyError::Invalid("thresholds must be finite".into()));
        }
        if self.percent_cluster_widen_to > self.percent_cluster_floor {
            return Err(PolicyError::Invalid("percent_cluster_widen_to must not exceed the cluster floor".into()));
        }
        if self.all_zero_ceiling <= 0.0 {
            return Err(PolicyError::Invalid("all_zero_ceiling must be positive".into()));
        }
        Ok(())
    }
}

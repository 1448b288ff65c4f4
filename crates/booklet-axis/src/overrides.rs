// File: crates/booklet-axis/src/overrides.rs
// Summary: Persisted manual scale overrides keyed by chart and axis.
// Notes:
// - Only finite, ordered pairs are ever stored; anything else is dropped on
//   insert, on load and on save.
// - An empty store is represented by the absence of the file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::options::AxisOptions;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access override store {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("override store is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// One remembered manual range.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScaleOverride {
    pub min: f64,
    pub max: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub divisions: Option<usize>,
}

impl ScaleOverride {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max, divisions: None }
    }

    pub fn with_divisions(mut self, divisions: usize) -> Self {
        self.divisions = Some(divisions);
        self
    }

    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.max > self.min
    }

    /// Turn this entry into hard bounds on `options`.
    pub fn apply_to(&self, options: &mut AxisOptions) {
        options.min = Some(self.min);
        options.max = Some(self.max);
        if let Some(divisions) = self.divisions {
            options.manual_divisions = Some(divisions as f64);
        }
    }
}

pub type AxisEntries = BTreeMap<String, ScaleOverride>;

fn sanitize(entries: AxisEntries) -> AxisEntries {
    entries
        .into_iter()
        .filter(|(axis, entry)| {
            let keep = entry.is_valid();
            if !keep {
                tracing::warn!(axis = %axis, min = entry.min, max = entry.max, "dropping invalid scale override");
            }
            keep
        })
        .collect()
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ManualScaleStore {
    charts: BTreeMap<String, AxisEntries>,
}

impl ManualScaleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    /// Replace the overrides of `chart_key`. Returns the entries kept after
    /// sanitising; an empty result removes the chart.
    pub fn update(&mut self, chart_key: &str, entries: AxisEntries) -> AxisEntries {
        if chart_key.is_empty() {
            return AxisEntries::new();
        }
        let sanitized = sanitize(entries);
        if sanitized.is_empty() {
            self.charts.remove(chart_key);
        } else {
            self.charts.insert(chart_key.to_string(), sanitized.clone());
        }
        sanitized
    }

    /// Set a single axis override.
    pub fn set(&mut self, chart_key: &str, axis_key: &str, entry: ScaleOverride) -> bool {
        let mut entries = self.charts.get(chart_key).cloned().unwrap_or_default();
        entries.insert(axis_key.to_string(), entry);
        self.update(chart_key, entries).contains_key(axis_key)
    }

    pub fn get(&self, chart_key: &str, axis_key: &str) -> Option<ScaleOverride> {
        self.charts.get(chart_key)?.get(axis_key).copied()
    }

    pub fn chart(&self, chart_key: &str) -> Option<&AxisEntries> {
        self.charts.get(chart_key)
    }

    pub fn clear_chart(&mut self, chart_key: &str) -> bool {
        self.charts.remove(chart_key).is_some()
    }

    /// Apply the stored override for an axis, if any. Returns whether one applied.
    pub fn apply_to(&self, chart_key: &str, axis_key: &str, options: &mut AxisOptions) -> bool {
        match self.get(chart_key, axis_key) {
            Some(entry) => {
                entry.apply_to(options);
                true
            }
            None => false,
        }
    }

    pub fn from_json_str(text: &str) -> Result<Self, StoreError> {
        let raw: BTreeMap<String, AxisEntries> = serde_json::from_str(text)?;
        let mut store = Self::new();
        for (chart_key, entries) in raw {
            store.update(&chart_key, entries);
        }
        Ok(store)
    }

    pub fn to_json_string(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load from `path`; a missing file is an empty store.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(text) if text.trim().is_empty() => Ok(Self::new()),
            Ok(text) => Self::from_json_str(&text),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::new()),
            Err(source) => Err(StoreError::Io { path: path.to_path_buf(), source }),
        }
    }

    /// Write to `path`, or remove the file when nothing is stored.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        let path = path.as_ref();
        let io_err = |source| StoreError::Io { path: path.to_path_buf(), source };
        if self.is_empty() {
            return match std::fs::remove_file(path) {
                Err(err) if err.kind() != std::io::ErrorKind::NotFound => Err(io_err(err)),
                _ => Ok(()),
            };
        }
        std::fs::write(path, self.to_json_string()?).map_err(io_err)
    }
}

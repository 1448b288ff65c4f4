// File: crates/booklet-axis/src/stat.rs
// Summary: Statistic model: one chart's series (with gaps and meta bounds) plus display flags.
// Notes:
// - Gaps are kept as `None` so callers can hand over spreadsheet columns as-is;
//   non-finite samples are ignored by every reader in this crate.

use serde::{Deserialize, Serialize};

/// Most value axes a single chart carries.
pub const MAX_AXES: usize = 4;

/// Author-declared bounds for one series, independent of its samples.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesMeta {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub data: Vec<Option<f64>>,
    #[serde(default)]
    pub meta: Option<SeriesMeta>,
}

impl Series {
    pub fn new(data: Vec<Option<f64>>) -> Self {
        Self { data, meta: None }
    }

    /// Series without gaps.
    pub fn with_data(data: impl IntoIterator<Item = f64>) -> Self {
        Self::new(data.into_iter().map(Some).collect())
    }

    pub fn with_meta(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.meta = Some(SeriesMeta { min, max });
        self
    }

    /// Finite samples in order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.data.iter().filter_map(|v| v.filter(|x| x.is_finite()))
    }

    pub fn meta_min(&self) -> Option<f64> {
        self.meta.and_then(|m| m.min).filter(|v| v.is_finite())
    }

    pub fn meta_max(&self) -> Option<f64> {
        self.meta.and_then(|m| m.max).filter(|v| v.is_finite())
    }
}

/// One chart's data and display flags.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StatDescriptor {
    pub series: Vec<Series>,
    #[serde(default)]
    pub is_percent: bool,
    #[serde(default)]
    pub upside_down: bool,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

impl StatDescriptor {
    pub fn new(series: Vec<Series>) -> Self {
        Self { series, ..Self::default() }
    }

    /// Single gap-free series.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Self {
        Self::new(vec![Series::with_data(values)])
    }

    pub fn percent(mut self) -> Self {
        self.is_percent = true;
        self
    }

    pub fn upside_down(mut self) -> Self {
        self.upside_down = true;
        self
    }

    pub fn with_bounds(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// All finite samples across every series.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.series.iter().flat_map(|s| s.values())
    }

    /// Declared lower bound: the stat's own, else the lowest series meta bound.
    pub fn explicit_min(&self) -> Option<f64> {
        self.min.filter(|v| v.is_finite()).or_else(|| {
            self.series.iter().filter_map(Series::meta_min).reduce(f64::min)
        })
    }

    /// Declared upper bound: the stat's own, else the highest series meta bound.
    pub fn explicit_max(&self) -> Option<f64> {
        self.max.filter(|v| v.is_finite()).or_else(|| {
            self.series.iter().filter_map(Series::meta_max).reduce(f64::max)
        })
    }
}

/// Split a multi-series stat into per-axis stats (at most [`MAX_AXES`]).
///
/// The first entry is the stat itself; every further series becomes its own
/// stat carrying that series' meta bounds, falling back to the stat's bounds.
pub fn derive_axis_stats(stat: &StatDescriptor) -> Vec<StatDescriptor> {
    if stat.series.is_empty() {
        return vec![stat.clone()];
    }
    let limit = stat.series.len().min(MAX_AXES);
    let mut stats = Vec::with_capacity(limit);
    stats.push(stat.clone());
    for series in stat.series.iter().take(limit).skip(1) {
        stats.push(StatDescriptor {
            series: vec![series.clone()],
            is_percent: stat.is_percent,
            upside_down: stat.upside_down,
            min: series.meta_min().or(stat.min),
            max: series.meta_max().or(stat.max),
        });
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_skip_gaps_and_non_finite() {
        let s = Series::new(vec![Some(1.0), None, Some(f64::NAN), Some(3.0), Some(f64::INFINITY)]);
        assert_eq!(s.values().collect::<Vec<_>>(), vec![1.0, 3.0]);
    }

    #[test]
    fn explicit_bounds_prefer_stat_then_meta() {
        let stat = StatDescriptor::new(vec![
            Series::with_data([1.0]).with_meta(Some(-5.0), Some(10.0)),
            Series::with_data([2.0]).with_meta(Some(-8.0), Some(40.0)),
        ]);
        assert_eq!(stat.explicit_min(), Some(-8.0));
        assert_eq!(stat.explicit_max(), Some(40.0));

        let stat = stat.with_bounds(Some(0.0), None);
        assert_eq!(stat.explicit_min(), Some(0.0));
        assert_eq!(stat.explicit_max(), Some(40.0));
    }

    #[test]
    fn derive_axis_stats_splits_secondary_series() {
        let stat = StatDescriptor::new(vec![
            Series::with_data([1.0, 2.0]),
            Series::with_data([50.0]).with_meta(None, Some(100.0)),
            Series::with_data([3.0]),
            Series::with_data([4.0]),
            Series::with_data([5.0]),
        ])
        .with_bounds(Some(0.0), Some(20.0));

        let axes = derive_axis_stats(&stat);
        assert_eq!(axes.len(), MAX_AXES);
        assert_eq!(axes[0], stat);
        assert_eq!(axes[1].series.len(), 1);
        assert_eq!(axes[1].min, Some(0.0));
        assert_eq!(axes[1].max, Some(100.0));
        assert_eq!(axes[2].max, Some(20.0));
    }

    #[test]
    fn derive_axis_stats_without_series_returns_stat() {
        let stat = StatDescriptor::default().percent();
        assert_eq!(derive_axis_stats(&stat), vec![stat]);
    }
}

// File: crates/booklet-axis/src/axis.rs
// Summary: Axis model handed to a charting backend: range, tick positions and labels.

use serde::{Deserialize, Serialize};

use crate::bounds::AxisBounds;
use crate::format::{format_ticks, LabelStyle};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartAxis {
    pub min: f64,
    pub max: f64,
    pub tick_positions: Vec<f64>,
    pub allow_decimals: bool,
    pub reversed: bool,
    pub labels: Vec<String>,
}

impl ChartAxis {
    pub fn from_bounds(bounds: &AxisBounds, style: LabelStyle) -> Self {
        Self {
            min: bounds.min,
            max: bounds.max,
            tick_positions: bounds.ticks.clone(),
            allow_decimals: bounds.allow_decimals,
            reversed: bounds.reversed,
            labels: format_ticks(&bounds.ticks, bounds.display_decimals, style),
        }
    }

    /// Position of `value` along the axis in `[0, 1]`, flipped when reversed.
    pub fn fraction(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return 0.0;
        }
        let t = ((value - self.min) / span).clamp(0.0, 1.0);
        if self.reversed { 1.0 - t } else { t }
    }
}

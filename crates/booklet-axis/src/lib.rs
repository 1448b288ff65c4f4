// File: crates/booklet-axis/src/lib.rs
// Summary: Axis engine entry point; exports the bounds computation and its supporting model types.

pub mod decimals;
pub mod nice;
pub mod policy;
pub mod options;
pub mod stat;
pub mod debug;
pub mod grid;
mod range;
mod candidates;
mod evaluate;
mod fallback;
pub mod bounds;
pub mod format;
pub mod axis;
pub mod overrides;

pub use bounds::{compute_axis_bounds, compute_axis_bounds_traced, AxisBounds};
pub use decimals::{count_decimals, round_to_decimals};
pub use nice::{nice_step, NiceConstraints};
pub use policy::{AxisPolicy, PolicyError, ScoreWeights};
pub use options::AxisOptions;
pub use stat::{derive_axis_stats, Series, SeriesMeta, StatDescriptor};
pub use debug::{DebugRecord, DebugSink, NoopSink};
pub use format::{format_tick_label, LabelStyle};
pub use axis::ChartAxis;
pub use overrides::{ManualScaleStore, ScaleOverride, StoreError};

// File: crates/booklet-axis/src/debug.rs
// Summary: Optional diagnostic side-channel for the bounds search.

use serde::Serialize;

/// One trace entry emitted while searching for axis bounds.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum DebugRecord {
    Candidate {
        raw: f64,
        snapped: f64,
    },
    Reject {
        reason: RejectReason,
        step: f64,
        segments: usize,
        minimum_segments: usize,
        maximum_segments: usize,
    },
    Decimals {
        step: f64,
        display_decimals: u32,
        tick_precision: u32,
        decimal_cap: u32,
        max_decimal_precision: u32,
        explicit_segment_precision: u32,
        override_precision: u32,
    },
    Accept {
        step: f64,
        segments: usize,
        min: f64,
        max: f64,
        score: f64,
        coverage_lower: f64,
        coverage_upper: f64,
    },
    Fallback {
        tier: FallbackTier,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RejectReason {
    /// The trial span is not a whole number of steps.
    UnevenSpan,
    /// A percent ceiling could not be brought back to 100.
    PercentCeiling,
    SegmentCount,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FallbackTier {
    MinimumInterval,
    Manual,
    Synthesized,
}

/// Receives trace records; has no effect on the computed bounds.
pub trait DebugSink {
    fn append(&mut self, record: DebugRecord);
}

impl DebugSink for Vec<DebugRecord> {
    fn append(&mut self, record: DebugRecord) {
        self.push(record);
    }
}

/// Sink that drops everything.
pub struct NoopSink;

impl DebugSink for NoopSink {
    fn append(&mut self, _record: DebugRecord) {}
}

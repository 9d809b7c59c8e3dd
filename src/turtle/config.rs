//! Configuration for command emission

use serde::Deserialize;

/// Most straight segments a curve is split into
pub const MAX_SEGMENTS: usize = 1024;

/// Fewest straight segments a curve is split into
pub const MIN_SEGMENTS: usize = 2;

/// How curves are split into straight segments
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Sampling {
    /// Same number of segments for every curve
    Fixed { segments: usize },
    /// One segment per `segment_length` units of curve length
    Adaptive { segment_length: f64 },
}

impl Default for Sampling {
    fn default() -> Self {
        Sampling::Adaptive {
            segment_length: 8.0,
        }
    }
}

impl Sampling {
    /// Segment count for a curve of the given (estimated) length
    pub fn segments_for(&self, length: f64) -> usize {
        match *self {
            Sampling::Fixed { segments } => segments.clamp(MIN_SEGMENTS, MAX_SEGMENTS),
            Sampling::Adaptive { segment_length } => {
                if segment_length.is_nan() || segment_length <= 0.0 || !length.is_finite() {
                    return MIN_SEGMENTS;
                }
                let n = (length / segment_length).ceil() as usize;
                n.clamp(MIN_SEGMENTS, MAX_SEGMENTS)
            }
        }
    }
}

/// Configuration options for the command emitter
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EmitConfig {
    /// Curve approximation
    pub sampling: Sampling,

    /// Emit SetHeading before moves, for forward/turn style turtles
    pub headings: bool,
}

impl EmitConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the same segment count for every curve
    pub fn with_fixed_segments(mut self, segments: usize) -> Self {
        self.sampling = Sampling::Fixed { segments };
        self
    }

    /// Split curves into segments of roughly this length
    pub fn with_segment_length(mut self, segment_length: f64) -> Self {
        self.sampling = Sampling::Adaptive { segment_length };
        self
    }

    /// Set whether SetHeading commands are emitted
    pub fn with_headings(mut self, headings: bool) -> Self {
        self.headings = headings;
        self
    }
}

//! Frame counting and frame spans.
//!
//! Animations are keyed on whole frame numbers; fractional frames are
//! rounded by callers before insertion.

use serde::{Deserialize, Serialize};

/// A discrete position on the animation timeline
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Frame(u32);

impl Frame {
    /// Create a frame from its index
    #[inline]
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    /// The first frame
    #[inline]
    pub fn zero() -> Self {
        Self(0)
    }

    /// Get the frame index
    #[inline]
    pub fn index(&self) -> u32 {
        self.0
    }

    /// The frame immediately after this one
    #[inline]
    pub fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Whether this is the implicit base frame
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl From<u32> for Frame {
    #[inline]
    fn from(index: u32) -> Self {
        Self(index)
    }
}

impl From<Frame> for u32 {
    #[inline]
    fn from(frame: Frame) -> Self {
        frame.0
    }
}

impl std::fmt::Display for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The frame interval covered by one interpolation segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSpan {
    pub start: Frame,
    pub end: Frame,
}

impl FrameSpan {
    /// Create a new span
    #[inline]
    pub fn new(start: Frame, end: Frame) -> Self {
        Self { start, end }
    }

    /// Number of frames between the endpoints
    #[inline]
    pub fn frames(&self) -> u32 {
        self.end.0.saturating_sub(self.start.0)
    }
}

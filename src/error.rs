//! Error types for the animation engine

use serde::{Deserialize, Serialize};

use crate::animation::AnimationKind;

/// Comprehensive error type for animation and rendering operations
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum MotionError {
    /// A polygon was built or reshaped below the minimum vertex count
    #[error("polygon {id} needs at least 3 vertices, got {count}")]
    DegeneratePolygon { id: String, count: usize },

    /// A bounding box with zero or non-finite extent cannot be fitted
    #[error("bounding box has degenerate extent {width} x {height}")]
    DegenerateBounds { width: f64, height: f64 },

    /// Vertex modification was scheduled on a group
    #[error("group {id} cannot carry a vertex modification animation")]
    GroupModification { id: String },

    /// Two keyframes of one kind collapsed onto the same frame
    #[error("{kind} keyframes of {id} span zero frames at frame {frame}")]
    ZeroFrameSpan {
        id: String,
        kind: AnimationKind,
        frame: u32,
    },

    /// Playback was started without freezing the keyframe tables
    #[error("{id} was ticked before init_animation froze its keyframes")]
    NotInitialized { id: String },

    /// A keyframe value does not fit the animation kind
    #[error("{kind} keyframe of {id} at frame {frame} rejected: {reason}")]
    KeyframeMismatch {
        id: String,
        kind: AnimationKind,
        frame: u32,
        reason: String,
    },

    /// The vertex reconciler exhausted every candidate placement
    #[error("no valid vertex placement for {kind} of {id} at frame {frame}")]
    MatchingFailed {
        id: String,
        kind: AnimationKind,
        frame: u32,
    },

    /// Vertex lists of different lengths reached the interpolator
    #[error("{kind} of {id} at frame {frame} mixes {expected} and {actual} vertices")]
    VertexCountMismatch {
        id: String,
        kind: AnimationKind,
        frame: u32,
        expected: usize,
        actual: usize,
    },

    /// The animation kind has no meaning for the target shape
    #[error("{shape} {id} does not support {kind}")]
    UnsupportedOperation {
        id: String,
        shape: String,
        kind: AnimationKind,
    },

    /// IO error
    #[error("IO error: {reason}")]
    Io { reason: String },

    /// Serialization error
    #[error("serialization error: {reason}")]
    Serialization { reason: String },
}

impl MotionError {
    /// Get error category for logging/metrics
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::DegeneratePolygon { .. }
            | Self::DegenerateBounds { .. }
            | Self::GroupModification { .. }
            | Self::ZeroFrameSpan { .. }
            | Self::NotInitialized { .. }
            | Self::KeyframeMismatch { .. } => "configuration",
            Self::MatchingFailed { .. } | Self::VertexCountMismatch { .. } => "matching",
            Self::UnsupportedOperation { .. } => "unsupported",
            Self::Io { .. } => "io",
            Self::Serialization { .. } => "serialization",
        }
    }
}

impl From<std::io::Error> for MotionError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for MotionError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            reason: err.to_string(),
        }
    }
}

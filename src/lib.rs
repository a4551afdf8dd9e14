//! SVG Motion
//!
//! A keyframe animation engine for building SVG frame sequences.
//! Sparse, user-supplied keyframes are expanded into continuous per-frame
//! state for shapes and groups, including vertex-list morphing between
//! polygons of different cardinality.

pub mod animation;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod session;
pub mod shapes;
pub mod style;
pub mod svg;

// Re-export common types for convenience
pub use animation::{
    AnimationKind, AnimationTrack, AnimationValue, Animator, Keyframe, KeyframeTable, SegmentRead,
};
pub use error::MotionError;
pub use frame::{Frame, FrameSpan};
pub use geometry::{Point, Quadrant};
pub use session::RenderSession;
pub use shapes::{Ellipse, EllipseArc, Group, Polygon, Segment, Shape, ShapeId};
pub use style::Style;
pub use svg::Svg;

/// Animation engine result type
pub type Result<T> = core::result::Result<T, MotionError>;

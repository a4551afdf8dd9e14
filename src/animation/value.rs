//! Keyframe value payloads

use crate::animation::AnimationKind;
use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// A keyframed value.
///
/// Values are absolute in the track's value space: translation values are
/// offsets from the start position, opacity values are levels, vertex lists
/// are complete polygon outlines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AnimationValue {
    /// A single scalar (inflation, rotation, opacity, angular translation)
    Scalar(f64),
    /// A planar displacement (translation)
    Vector(Point),
    /// A complete vertex list (vertex modification)
    Vertices(Vec<Point>),
}

impl AnimationValue {
    /// Whether this payload shape fits the given animation kind
    pub fn matches(&self, kind: AnimationKind) -> bool {
        match kind {
            AnimationKind::Translation => matches!(self, AnimationValue::Vector(_)),
            AnimationKind::VertexModification => matches!(self, AnimationValue::Vertices(_)),
            AnimationKind::Inflation
            | AnimationKind::Rotation
            | AnimationKind::Opacity
            | AnimationKind::AngularTranslation => matches!(self, AnimationValue::Scalar(_)),
        }
    }

    /// Short label of the payload shape, for error reports
    pub fn type_name(&self) -> &'static str {
        match self {
            AnimationValue::Scalar(_) => "scalar",
            AnimationValue::Vector(_) => "vector",
            AnimationValue::Vertices(_) => "vertex list",
        }
    }

    /// The implicit frame-0 base for a track that starts without one
    pub fn zero_like(&self) -> AnimationValue {
        match self {
            AnimationValue::Scalar(_) => AnimationValue::Scalar(0.0),
            AnimationValue::Vector(_) => AnimationValue::Vector(Point::zero()),
            AnimationValue::Vertices(points) => {
                AnimationValue::Vertices(vec![Point::zero(); points.len()])
            }
        }
    }

    /// Per-frame increment from `prev` to `next` over `span` frames.
    ///
    /// Returns `None` when the payload shapes disagree; vertex lists must
    /// already be length-reconciled by the caller.
    pub fn step(prev: &AnimationValue, next: &AnimationValue, span: u32) -> Option<AnimationValue> {
        let span = span as f64;
        match (prev, next) {
            (AnimationValue::Scalar(p), AnimationValue::Scalar(n)) => {
                Some(AnimationValue::Scalar((n - p) / span))
            }
            (AnimationValue::Vector(p), AnimationValue::Vector(n)) => {
                Some(AnimationValue::Vector((*n - *p) / span))
            }
            (AnimationValue::Vertices(p), AnimationValue::Vertices(n)) if p.len() == n.len() => {
                Some(AnimationValue::Vertices(
                    p.iter().zip(n.iter()).map(|(p, n)| (*n - *p) / span).collect(),
                ))
            }
            _ => None,
        }
    }

    /// Get the scalar payload
    #[inline]
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            AnimationValue::Scalar(value) => Some(*value),
            _ => None,
        }
    }

    /// Get the vector payload
    #[inline]
    pub fn as_vector(&self) -> Option<Point> {
        match self {
            AnimationValue::Vector(value) => Some(*value),
            _ => None,
        }
    }

    /// Get the vertex list payload
    #[inline]
    pub fn as_vertices(&self) -> Option<&[Point]> {
        match self {
            AnimationValue::Vertices(points) => Some(points),
            _ => None,
        }
    }
}

impl From<f64> for AnimationValue {
    #[inline]
    fn from(value: f64) -> Self {
        AnimationValue::Scalar(value)
    }
}

impl From<Point> for AnimationValue {
    #[inline]
    fn from(value: Point) -> Self {
        AnimationValue::Vector(value)
    }
}

impl From<Vec<Point>> for AnimationValue {
    #[inline]
    fn from(points: Vec<Point>) -> Self {
        AnimationValue::Vertices(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matching() {
        assert!(AnimationValue::Vector(Point::zero()).matches(AnimationKind::Translation));
        assert!(AnimationValue::Scalar(0.5).matches(AnimationKind::Opacity));
        assert!(!AnimationValue::Scalar(0.5).matches(AnimationKind::Translation));
        assert!(AnimationValue::Vertices(vec![]).matches(AnimationKind::VertexModification));
    }

    #[test]
    fn test_scalar_step() {
        let step = AnimationValue::step(
            &AnimationValue::Scalar(1.0),
            &AnimationValue::Scalar(0.0),
            30,
        )
        .unwrap();
        assert_eq!(step, AnimationValue::Scalar(-1.0 / 30.0));
    }

    #[test]
    fn test_vector_step() {
        let step = AnimationValue::step(
            &AnimationValue::Vector(Point::zero()),
            &AnimationValue::Vector(Point::new(100.0, 0.0)),
            10,
        )
        .unwrap();
        assert_eq!(step, AnimationValue::Vector(Point::new(10.0, 0.0)));
    }

    #[test]
    fn test_vertices_step_rejects_length_mismatch() {
        let prev = AnimationValue::Vertices(vec![Point::zero(); 4]);
        let next = AnimationValue::Vertices(vec![Point::zero(); 3]);
        assert!(AnimationValue::step(&prev, &next, 10).is_none());
    }
}

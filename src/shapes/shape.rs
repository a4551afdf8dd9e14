//! Shape dispatch and the state shared by every concrete shape

use crate::animation::{AnimationKind, AnimationValue, Animator, Keyframe};
use crate::error::MotionError;
use crate::frame::Frame;
use crate::geometry::{Point, Quadrant};
use crate::shapes::{Ellipse, EllipseArc, Group, Polygon, Segment, ShapeId};
use crate::style::Style;
use crate::Result;
use serde::{Deserialize, Serialize};

/// Opacity below this threshold counts as invisible; accumulated per-frame
/// increments can leave a sub-epsilon residue on the final keyframe.
pub(crate) const VISIBILITY_EPSILON: f64 = 1e-9;

/// Identity, presentation and animation state common to all leaf shapes.
///
/// Setters run before playback and update both the live value and the start
/// snapshot; animation only ever touches the live value, so `reset()`
/// recovers the exact pre-playback state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeBase {
    id: ShapeId,
    start_style: Style,
    style: Style,
    translation: Point,
    start_rotation: f64,
    rotation: f64,
    animator: Animator,
}

impl ShapeBase {
    /// Create the shared state for a fresh shape
    pub fn new() -> Self {
        let id = ShapeId::new();
        let style = Style::default();
        let mut animator = Animator::new(id);
        animator.set_base(AnimationKind::Opacity, style.opacity);
        Self {
            id,
            start_style: style.clone(),
            style,
            translation: Point::zero(),
            start_rotation: 0.0,
            rotation: 0.0,
            animator,
        }
    }

    /// Shape identifier
    #[inline]
    pub fn id(&self) -> ShapeId {
        self.id
    }

    /// Current style
    #[inline]
    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Replace the style, keeping the opacity base in sync
    pub fn set_style(&mut self, style: Style) {
        self.animator
            .set_base(AnimationKind::Opacity, style.opacity);
        self.start_style = style.clone();
        self.style = style;
    }

    /// Set the starting opacity
    pub fn set_opacity(&mut self, opacity: f64) {
        self.animator.set_base(AnimationKind::Opacity, opacity);
        self.start_style.opacity = opacity;
        self.style.opacity = opacity;
    }

    /// Static translation emitted in the transform attribute
    #[inline]
    pub fn translation(&self) -> Point {
        self.translation
    }

    /// Set the static translation
    #[inline]
    pub fn set_translation(&mut self, translation: Point) {
        self.translation = translation;
    }

    /// Current rotation in degrees
    #[inline]
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Set the starting rotation in degrees
    pub fn set_rotation(&mut self, rotation: f64) {
        self.start_rotation = rotation;
        self.rotation = rotation;
    }

    /// Whether the shape would appear in the serialized frame
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.style.opacity > VISIBILITY_EPSILON
    }

    /// The shape's animation runtime
    #[inline]
    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    /// Mutable access to the animation runtime
    #[inline]
    pub fn animator_mut(&mut self) -> &mut Animator {
        &mut self.animator
    }

    /// Freeze the keyframe tables for playback
    #[inline]
    pub fn init_animation(&mut self) {
        self.animator.init();
    }

    /// Restore style and rotation, zero the clock
    pub fn reset(&mut self) {
        self.style = self.start_style.clone();
        self.rotation = self.start_rotation;
        self.animator.reset();
    }

    /// Advance the frame clock at the start of a tick
    #[inline]
    pub fn begin_tick(&mut self) {
        self.animator.advance_frame();
    }

    /// One tick of a scalar-valued kind
    pub fn scalar_step(&mut self, kind: AnimationKind) -> Result<Option<f64>> {
        match self.animator.step(kind)? {
            Some(value) => value
                .as_scalar()
                .map(Some)
                .ok_or_else(|| self.payload_mismatch(kind, &value)),
            None => Ok(None),
        }
    }

    /// One tick of a vector-valued kind
    pub fn vector_step(&mut self, kind: AnimationKind) -> Result<Option<Point>> {
        match self.animator.step(kind)? {
            Some(value) => value
                .as_vector()
                .map(Some)
                .ok_or_else(|| self.payload_mismatch(kind, &value)),
            None => Ok(None),
        }
    }

    /// Rotation and opacity updates shared by every leaf shape
    pub fn finish_tick(&mut self) -> Result<()> {
        if let Some(delta) = self.scalar_step(AnimationKind::Rotation)? {
            self.rotation += delta;
        }
        if let Some(delta) = self.scalar_step(AnimationKind::Opacity)? {
            self.style.opacity += delta;
        }
        Ok(())
    }

    fn payload_mismatch(&self, kind: AnimationKind, value: &AnimationValue) -> MotionError {
        MotionError::KeyframeMismatch {
            id: self.id.to_string(),
            kind,
            frame: self.animator.current_frame().index(),
            reason: format!("{} payload cannot drive {kind}", value.type_name()),
        }
    }
}

impl Default for ShapeBase {
    fn default() -> Self {
        Self::new()
    }
}

/// Transform attribute fragment, empty when neither part is set.
/// The fragment carries its own leading space so callers can splice it
/// directly after the geometry attributes.
pub(crate) fn transform_attribute(translation: Point, rotation: f64, pivot: Option<Point>) -> String {
    let mut parts = Vec::new();
    if translation != Point::zero() {
        parts.push(format!("translate({} {})", translation.x, translation.y));
    }
    if rotation != 0.0 {
        match pivot {
            Some(center) => parts.push(format!("rotate({} {} {})", rotation, center.x, center.y)),
            None => parts.push(format!("rotate({rotation})")),
        }
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" transform=\"{}\"", parts.join(" "))
    }
}

/// A scene-graph node: a concrete shape or a group of nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Ellipse(Ellipse),
    Segment(Segment),
    Polygon(Polygon),
    EllipseArc(EllipseArc),
    Group(Group),
}

impl Shape {
    /// Shape identifier
    pub fn id(&self) -> ShapeId {
        match self {
            Shape::Ellipse(shape) => shape.base().id(),
            Shape::Segment(shape) => shape.base().id(),
            Shape::Polygon(shape) => shape.base().id(),
            Shape::EllipseArc(shape) => shape.base().id(),
            Shape::Group(group) => group.id(),
        }
    }

    /// Lowercase variant label used in error reports
    pub fn kind_name(&self) -> &'static str {
        match self {
            Shape::Ellipse(_) => "ellipse",
            Shape::Segment(_) => "segment",
            Shape::Polygon(_) => "polygon",
            Shape::EllipseArc(_) => "ellipse arc",
            Shape::Group(_) => "group",
        }
    }

    fn base(&self) -> Option<&ShapeBase> {
        match self {
            Shape::Ellipse(shape) => Some(shape.base()),
            Shape::Segment(shape) => Some(shape.base()),
            Shape::Polygon(shape) => Some(shape.base()),
            Shape::EllipseArc(shape) => Some(shape.base()),
            Shape::Group(_) => None,
        }
    }

    fn base_mut(&mut self) -> Option<&mut ShapeBase> {
        match self {
            Shape::Ellipse(shape) => Some(shape.base_mut()),
            Shape::Segment(shape) => Some(shape.base_mut()),
            Shape::Polygon(shape) => Some(shape.base_mut()),
            Shape::EllipseArc(shape) => Some(shape.base_mut()),
            Shape::Group(_) => None,
        }
    }

    /// Schedule a keyframe; groups broadcast to their members.
    ///
    /// Kind/payload mismatches and kinds the shape cannot express are
    /// rejected at the call site.
    pub fn add_keyframe(
        &mut self,
        frame: impl Into<Frame>,
        kind: AnimationKind,
        value: impl Into<AnimationValue>,
    ) -> Result<()> {
        let frame = frame.into();
        let value = value.into();

        if let Shape::Group(group) = self {
            return group.add_keyframe(frame, kind, value);
        }

        let supported = match kind {
            AnimationKind::VertexModification => matches!(self, Shape::Polygon(_)),
            AnimationKind::AngularTranslation => matches!(self, Shape::EllipseArc(_)),
            _ => true,
        };
        if !supported {
            return Err(MotionError::UnsupportedOperation {
                id: self.id().to_string(),
                shape: self.kind_name().to_string(),
                kind,
            });
        }

        if !value.matches(kind) {
            return Err(MotionError::KeyframeMismatch {
                id: self.id().to_string(),
                kind,
                frame: frame.index(),
                reason: format!("{} payload cannot drive {kind}", value.type_name()),
            });
        }

        if kind == AnimationKind::VertexModification {
            if let Some(points) = value.as_vertices() {
                if points.len() < 3 {
                    return Err(MotionError::DegeneratePolygon {
                        id: self.id().to_string(),
                        count: points.len(),
                    });
                }
            }
        }

        // leaves always carry a base
        if let Some(base) = self.base_mut() {
            base.animator_mut().insert(kind, Keyframe::new(frame, value));
        }
        Ok(())
    }

    /// Freeze every keyframe table for playback
    pub fn init_animation(&mut self) {
        match self {
            Shape::Group(group) => group.init_animation(),
            _ => {
                if let Some(base) = self.base_mut() {
                    base.init_animation();
                }
            }
        }
    }

    /// Advance the shape one frame, vertex modification first
    pub fn tick(&mut self) -> Result<()> {
        match self {
            Shape::Ellipse(shape) => shape.tick(),
            Shape::Segment(shape) => shape.tick(),
            Shape::Polygon(shape) => shape.tick(),
            Shape::EllipseArc(shape) => shape.tick(),
            Shape::Group(group) => group.tick(),
        }
    }

    /// Restore the pre-playback state and zero the clock
    pub fn reset(&mut self) {
        match self {
            Shape::Ellipse(shape) => shape.reset(),
            Shape::Segment(shape) => shape.reset(),
            Shape::Polygon(shape) => shape.reset(),
            Shape::EllipseArc(shape) => shape.reset(),
            Shape::Group(group) => group.reset(),
        }
    }

    /// Highest keyframe frame of the shape (or any group member)
    pub fn frame_count(&self) -> Frame {
        match self {
            Shape::Group(group) => group.frame_count(),
            _ => self
                .base()
                .map(|base| base.animator().frame_count())
                .unwrap_or_else(Frame::zero),
        }
    }

    /// Minimal axis-aligned box of the post-animation geometry
    pub fn bounding_quadrant(&self) -> Quadrant {
        match self {
            Shape::Ellipse(shape) => shape.bounding_quadrant(),
            Shape::Segment(shape) => shape.bounding_quadrant(),
            Shape::Polygon(shape) => shape.bounding_quadrant(),
            Shape::EllipseArc(shape) => shape.bounding_quadrant(),
            Shape::Group(group) => group.bounding_quadrant(),
        }
    }

    /// Markup fragment describing the current state
    pub fn svg_content(&self) -> String {
        match self {
            Shape::Ellipse(shape) => shape.svg_content(),
            Shape::Segment(shape) => shape.svg_content(),
            Shape::Polygon(shape) => shape.svg_content(),
            Shape::EllipseArc(shape) => shape.svg_content(),
            Shape::Group(group) => group.svg_content(),
        }
    }

    /// Markup fragment, empty while the shape is invisible
    pub fn to_svg(&self) -> String {
        if self.is_visible() {
            self.svg_content()
        } else {
            String::new()
        }
    }

    /// Whether the shape would appear in the serialized frame
    pub fn is_visible(&self) -> bool {
        match self {
            Shape::Group(group) => group.is_visible(),
            _ => self.base().map(ShapeBase::is_visible).unwrap_or(true),
        }
    }

    /// Replace the style
    pub fn set_style(&mut self, style: Style) {
        match self {
            Shape::Group(group) => group.set_style(style),
            _ => {
                if let Some(base) = self.base_mut() {
                    base.set_style(style);
                }
            }
        }
    }

    /// Set the starting opacity
    pub fn set_opacity(&mut self, opacity: f64) {
        match self {
            Shape::Group(group) => group.set_opacity(opacity),
            _ => {
                if let Some(base) = self.base_mut() {
                    base.set_opacity(opacity);
                }
            }
        }
    }

    /// Set the static translation of the transform attribute
    pub fn set_translation(&mut self, translation: Point) {
        match self {
            Shape::Group(group) => group.set_translation(translation),
            _ => {
                if let Some(base) = self.base_mut() {
                    base.set_translation(translation);
                }
            }
        }
    }

    /// Set the starting rotation in degrees
    pub fn set_rotation(&mut self, rotation: f64) {
        match self {
            Shape::Group(group) => group.set_rotation(rotation),
            _ => {
                if let Some(base) = self.base_mut() {
                    base.set_rotation(rotation);
                }
            }
        }
    }
}

impl From<Ellipse> for Shape {
    fn from(shape: Ellipse) -> Self {
        Shape::Ellipse(shape)
    }
}

impl From<Segment> for Shape {
    fn from(shape: Segment) -> Self {
        Shape::Segment(shape)
    }
}

impl From<Polygon> for Shape {
    fn from(shape: Polygon) -> Self {
        Shape::Polygon(shape)
    }
}

impl From<EllipseArc> for Shape {
    fn from(shape: EllipseArc) -> Self {
        Shape::EllipseArc(shape)
    }
}

impl From<Group> for Shape {
    fn from(group: Group) -> Self {
        Shape::Group(group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_kinds_rejected_at_call_site() {
        let mut circle = Shape::from(Ellipse::circle(Point::zero(), 5.0));
        let err = circle
            .add_keyframe(
                10u32,
                AnimationKind::VertexModification,
                vec![Point::zero(), Point::new(1.0, 0.0), Point::new(0.0, 1.0)],
            )
            .unwrap_err();
        assert!(matches!(err, MotionError::UnsupportedOperation { .. }));

        let err = circle
            .add_keyframe(10u32, AnimationKind::AngularTranslation, 90.0)
            .unwrap_err();
        assert!(matches!(err, MotionError::UnsupportedOperation { .. }));
    }

    #[test]
    fn test_payload_mismatch_rejected() {
        let mut circle = Shape::from(Ellipse::circle(Point::zero(), 5.0));
        let err = circle
            .add_keyframe(10u32, AnimationKind::Translation, 4.0)
            .unwrap_err();
        assert!(matches!(err, MotionError::KeyframeMismatch { .. }));
    }

    #[test]
    fn test_transform_attribute_forms() {
        assert_eq!(transform_attribute(Point::zero(), 0.0, None), "");
        assert_eq!(
            transform_attribute(Point::new(5.0, -2.0), 0.0, None),
            " transform=\"translate(5 -2)\""
        );
        assert_eq!(
            transform_attribute(Point::zero(), 45.0, Some(Point::new(1.0, 1.0))),
            " transform=\"rotate(45 1 1)\""
        );
    }
}

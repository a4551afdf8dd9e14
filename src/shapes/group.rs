//! Ordered composition of shapes, itself usable as a shape

use crate::animation::{AnimationKind, AnimationValue};
use crate::error::MotionError;
use crate::frame::Frame;
use crate::geometry::{Point, Quadrant};
use crate::shapes::shape::transform_attribute;
use crate::shapes::{Shape, ShapeId};
use crate::style::Style;
use crate::Result;
use serde::{Deserialize, Serialize};

/// Ordered collection of shapes broadcasting lifecycle calls to its members.
///
/// A group is translatable and rotatable as a whole at serialization time;
/// animation keyframes scheduled on the group are forwarded to every member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    id: ShapeId,
    style: Option<Style>,
    translation: Point,
    rotation: f64,
    members: Vec<Shape>,
}

impl Group {
    /// Create an empty group
    pub fn new() -> Self {
        Self {
            id: ShapeId::new(),
            style: None,
            translation: Point::zero(),
            rotation: 0.0,
            members: Vec::new(),
        }
    }

    /// Group identifier
    #[inline]
    pub fn id(&self) -> ShapeId {
        self.id
    }

    /// Append one shape
    #[inline]
    pub fn append(&mut self, shape: impl Into<Shape>) {
        self.members.push(shape.into());
    }

    /// Append every shape of an iterator
    #[inline]
    pub fn extend(&mut self, shapes: impl IntoIterator<Item = Shape>) {
        self.members.extend(shapes);
    }

    /// The member shapes, in insertion order
    #[inline]
    pub fn members(&self) -> &[Shape] {
        &self.members
    }

    /// Mutable access to the member shapes
    #[inline]
    pub fn members_mut(&mut self) -> &mut [Shape] {
        &mut self.members
    }

    /// Number of direct members
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the group has no members
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Broadcast a keyframe to every member.
    ///
    /// Only leaf shapes carry vertex lists, so scheduling vertex
    /// modification on a group is reported, not silently dropped.
    pub fn add_keyframe(
        &mut self,
        frame: impl Into<Frame>,
        kind: AnimationKind,
        value: impl Into<AnimationValue>,
    ) -> Result<()> {
        if kind == AnimationKind::VertexModification {
            return Err(MotionError::GroupModification {
                id: self.id.to_string(),
            });
        }
        let frame = frame.into();
        let value = value.into();
        for member in &mut self.members {
            member.add_keyframe(frame, kind, value.clone())?;
        }
        Ok(())
    }

    /// Freeze the keyframe tables of every member
    pub fn init_animation(&mut self) {
        for member in &mut self.members {
            member.init_animation();
        }
    }

    /// Advance every member one frame
    pub fn tick(&mut self) -> Result<()> {
        for member in &mut self.members {
            member.tick()?;
        }
        Ok(())
    }

    /// Restore every member to its start state
    pub fn reset(&mut self) {
        for member in &mut self.members {
            member.reset();
        }
    }

    /// Highest keyframe frame across all members
    pub fn frame_count(&self) -> Frame {
        self.members
            .iter()
            .map(Shape::frame_count)
            .max()
            .unwrap_or_else(Frame::zero)
    }

    /// Union of the members' quadrants
    pub fn bounding_quadrant(&self) -> Quadrant {
        let mut box_ = Quadrant::empty();
        for member in &self.members {
            box_.union(&member.bounding_quadrant());
        }
        box_
    }

    /// Whether the group would appear in the serialized frame
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.style
            .as_ref()
            .map(|s| s.opacity > crate::shapes::shape::VISIBILITY_EPSILON)
            .unwrap_or(true)
    }

    /// Style wrapped around the members, if any
    #[inline]
    pub fn style(&self) -> Option<&Style> {
        self.style.as_ref()
    }

    /// Wrap the members in a style
    #[inline]
    pub fn set_style(&mut self, style: Style) {
        self.style = Some(style);
    }

    /// Set the starting opacity of the wrapper style
    pub fn set_opacity(&mut self, opacity: f64) {
        self.style
            .get_or_insert_with(Style::default)
            .opacity = opacity;
    }

    /// Set the static translation of the transform attribute
    #[inline]
    pub fn set_translation(&mut self, translation: Point) {
        self.translation = translation;
    }

    /// Set the rotation of the transform attribute, in degrees
    #[inline]
    pub fn set_rotation(&mut self, rotation: f64) {
        self.rotation = rotation;
    }

    /// Markup fragment: the members' fragments inside the group wrapper
    pub fn svg_content(&self) -> String {
        let pivot = {
            let box_ = self.bounding_quadrant();
            if box_.is_degenerate() {
                None
            } else {
                Some(box_.center())
            }
        };
        let mut markup = format!(
            "<g{}",
            transform_attribute(self.translation, self.rotation, pivot)
        );
        if let Some(style) = &self.style {
            markup.push(' ');
            markup.push_str(&style.to_attributes());
        }
        markup.push_str(">\n");
        for member in &self.members {
            markup.push_str(&member.to_svg());
        }
        markup.push_str("</g>\n");
        markup
    }
}

impl Default for Group {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Ellipse, Polygon};

    fn sample_group() -> Group {
        let mut group = Group::new();
        group.append(Ellipse::circle(Point::new(0.0, 0.0), 5.0));
        group.append(Polygon::square(Point::new(10.0, 10.0), 10.0));
        group
    }

    #[test]
    fn test_vertex_modification_rejected() {
        let mut group = sample_group();
        let err = group
            .add_keyframe(
                10u32,
                AnimationKind::VertexModification,
                vec![Point::zero(), Point::new(1.0, 0.0), Point::new(0.0, 1.0)],
            )
            .unwrap_err();
        assert!(matches!(err, MotionError::GroupModification { .. }));
    }

    #[test]
    fn test_bounding_quadrant_is_union() {
        let group = sample_group();
        let box_ = group.bounding_quadrant();
        assert_eq!(box_.min(), Point::new(-5.0, -5.0));
        assert_eq!(box_.max(), Point::new(20.0, 20.0));
    }

    #[test]
    fn test_frame_count_is_member_maximum() {
        let mut group = sample_group();
        group
            .add_keyframe(24u32, AnimationKind::Opacity, 0.0)
            .unwrap();
        assert_eq!(group.frame_count(), Frame::new(24));
    }

    #[test]
    fn test_markup_wraps_members() {
        let group = sample_group();
        let markup = group.svg_content();
        assert!(markup.starts_with("<g>"));
        assert!(markup.trim_end().ends_with("</g>"));
        assert!(markup.contains("<ellipse"));
        assert!(markup.contains("<polygon"));
    }
}

//! Ellipses, circles and displayable points

use crate::animation::AnimationKind;
use crate::geometry::{Point, Quadrant};
use crate::shapes::shape::{transform_attribute, ShapeBase};
use crate::Result;
use serde::{Deserialize, Serialize};

/// Ellipse described by its center and two radii.
///
/// Circles and displayable points are ellipses with equal radii.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ellipse {
    base: ShapeBase,
    start_center: Point,
    start_rx: f64,
    start_ry: f64,
    center: Point,
    rx: f64,
    ry: f64,
}

impl Ellipse {
    /// Create an ellipse from center and radii
    pub fn new(center: Point, rx: f64, ry: f64) -> Self {
        Self {
            base: ShapeBase::new(),
            start_center: center,
            start_rx: rx,
            start_ry: ry,
            center,
            rx,
            ry,
        }
    }

    /// Create a circle
    #[inline]
    pub fn circle(center: Point, radius: f64) -> Self {
        Self::new(center, radius, radius)
    }

    /// Create a displayable point (a unit-radius circle)
    #[inline]
    pub fn point(center: Point) -> Self {
        Self::circle(center, 1.0)
    }

    /// Shared shape state
    #[inline]
    pub fn base(&self) -> &ShapeBase {
        &self.base
    }

    /// Mutable shared shape state
    #[inline]
    pub fn base_mut(&mut self) -> &mut ShapeBase {
        &mut self.base
    }

    /// Current center
    #[inline]
    pub fn center(&self) -> Point {
        self.center
    }

    /// Current horizontal radius
    #[inline]
    pub fn rx(&self) -> f64 {
        self.rx
    }

    /// Current vertical radius
    #[inline]
    pub fn ry(&self) -> f64 {
        self.ry
    }

    /// Advance one frame
    pub fn tick(&mut self) -> Result<()> {
        self.base.begin_tick();
        if let Some(delta) = self.base.vector_step(AnimationKind::Translation)? {
            self.center += delta;
        }
        if let Some(delta) = self.base.scalar_step(AnimationKind::Inflation)? {
            self.rx += delta;
            self.ry += delta;
        }
        self.base.finish_tick()
    }

    /// Restore the start geometry and zero the clock
    pub fn reset(&mut self) {
        self.center = self.start_center;
        self.rx = self.start_rx;
        self.ry = self.start_ry;
        self.base.reset();
    }

    /// Quadrant enclosing the ellipse
    pub fn bounding_quadrant(&self) -> Quadrant {
        let radius = Point::new(self.rx, self.ry);
        Quadrant::new(self.center - radius, self.center + radius)
    }

    /// Markup fragment describing the current state
    pub fn svg_content(&self) -> String {
        format!(
            "<ellipse cx=\"{}\" cy=\"{}\" rx=\"{}\" ry=\"{}\"{} {}/>\n",
            self.center.x,
            self.center.y,
            self.rx,
            self.ry,
            transform_attribute(
                self.base.translation(),
                self.base.rotation(),
                Some(self.center)
            ),
            self.base.style().to_attributes(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_quadrant() {
        let ellipse = Ellipse::new(Point::new(10.0, 20.0), 4.0, 2.0);
        let box_ = ellipse.bounding_quadrant();
        assert_eq!(box_.min(), Point::new(6.0, 18.0));
        assert_eq!(box_.max(), Point::new(14.0, 22.0));
    }

    #[test]
    fn test_point_is_unit_circle() {
        let point = Ellipse::point(Point::new(3.0, 4.0));
        assert_eq!(point.rx(), 1.0);
        assert_eq!(point.ry(), 1.0);
    }

    #[test]
    fn test_markup_mentions_geometry() {
        let circle = Ellipse::circle(Point::new(1.0, 2.0), 5.0);
        let markup = circle.svg_content();
        assert!(markup.contains("cx=\"1\""));
        assert!(markup.contains("cy=\"2\""));
        assert!(markup.contains("rx=\"5\""));
    }
}

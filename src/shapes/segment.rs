//! Oriented segment between two points

use crate::animation::AnimationKind;
use crate::geometry::{Point, Quadrant};
use crate::shapes::shape::{transform_attribute, ShapeBase};
use crate::Result;
use serde::{Deserialize, Serialize};

/// Oriented segment between two endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    base: ShapeBase,
    start_points: [Point; 2],
    points: [Point; 2],
}

impl Segment {
    /// Create a segment between two points
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            base: ShapeBase::new(),
            start_points: [start, end],
            points: [start, end],
        }
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

    /// Current endpoints
    #[inline]
    pub fn points(&self) -> [Point; 2] {
        self.points
    }

    /// Segment length
    #[inline]
    pub fn length(&self) -> f64 {
        self.points[0].distance_to(self.points[1])
    }

    /// Midpoint of the segment
    #[inline]
    pub fn center(&self) -> Point {
        self.points[0] + (self.points[1] - self.points[0]) / 2.0
    }

    /// Whether the segment is exactly vertical
    #[inline]
    pub fn is_vertical(&self) -> bool {
        self.points[0].x == self.points[1].x
    }

    /// Whether the point lies on the segment, within tolerance
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.on_segment(self.points[0], self.points[1])
    }

    /// Whether this segment and `other` intersect
    pub fn intersects(&self, other: &Segment) -> bool {
        Self::segments_intersect(
            self.points[0],
            self.points[1],
            other.points[0],
            other.points[1],
        )
    }

    /// Intersection point of the two segments, if any
    pub fn intersection_point(&self, other: &Segment) -> Option<Point> {
        Self::segment_intersection(
            self.points[0],
            self.points[1],
            other.points[0],
            other.points[1],
        )
    }

    /// Orientation-based intersection test for two point pairs
    pub(crate) fn segments_intersect(p1: Point, q1: Point, p2: Point, q2: Point) -> bool {
        fn orientation(p: Point, q: Point, r: Point) -> i8 {
            let value = (q.y - p.y) * (r.x - q.x) - (q.x - p.x) * (r.y - q.y);
            if value == 0.0 {
                0 // colinear
            } else if value > 0.0 {
                1
            } else {
                2
            }
        }
        fn on_box(p: Point, q: Point, r: Point) -> bool {
            q.x >= p.x.min(r.x) && q.x <= p.x.max(r.x) && q.y >= p.y.min(r.y) && q.y <= p.y.max(r.y)
        }

        let o1 = orientation(p1, q1, p2);
        let o2 = orientation(p1, q1, q2);
        let o3 = orientation(p2, q2, p1);
        let o4 = orientation(p2, q2, q1);

        (o1 != o2 && o3 != o4)
            || (o1 == 0 && on_box(p1, p2, q1))
            || (o2 == 0 && on_box(p1, q2, q1))
            || (o3 == 0 && on_box(p2, p1, q2))
            || (o4 == 0 && on_box(p2, q1, q2))
    }

    /// Parametric intersection of two point pairs
    pub(crate) fn segment_intersection(s1: Point, e1: Point, s2: Point, e2: Point) -> Option<Point> {
        let d = (e2.y - s2.y) * (e1.x - s1.x) - (e2.x - s2.x) * (e1.y - s1.y);
        if d == 0.0 {
            return None;
        }
        let u_a = ((e2.x - s2.x) * (s1.y - s2.y) - (e2.y - s2.y) * (s1.x - s2.x)) / d;
        let u_b = ((e1.x - s1.x) * (s1.y - s2.y) - (e1.y - s1.y) * (s1.x - s2.x)) / d;
        if !(0.0..=1.0).contains(&u_a) || !(0.0..=1.0).contains(&u_b) {
            return None;
        }
        Some(Point::new(
            s1.x + u_a * (e1.x - s1.x),
            s1.y + u_a * (e1.y - s1.y),
        ))
    }

    /// Advance one frame
    pub fn tick(&mut self) -> Result<()> {
        self.base.begin_tick();
        if let Some(delta) = self.base.vector_step(AnimationKind::Translation)? {
            for point in &mut self.points {
                *point += delta;
            }
        }
        if let Some(delta) = self.base.scalar_step(AnimationKind::Inflation)? {
            // grow the segment by pushing the end point along its direction
            let direction = (self.points[1] - self.points[0]).normalize();
            self.points[1] += direction * delta;
        }
        self.base.finish_tick()
    }

    /// Restore the start geometry and zero the clock
    pub fn reset(&mut self) {
        self.points = self.start_points;
        self.base.reset();
    }

    /// Quadrant enclosing the segment
    pub fn bounding_quadrant(&self) -> Quadrant {
        let mut box_ = Quadrant::empty();
        for point in self.points {
            box_.add_point(point);
        }
        box_
    }

    /// Markup fragment describing the current state
    pub fn svg_content(&self) -> String {
        format!(
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\"{} {}/>\n",
            self.points[0].x,
            self.points[0].y,
            self.points[1].x,
            self.points[1].y,
            transform_attribute(
                self.base.translation(),
                self.base.rotation(),
                Some(self.center())
            ),
            self.base.style().to_attributes(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_and_center() {
        let segment = Segment::new(Point::new(1.0, 1.0), Point::new(5.0, 1.0));
        assert_eq!(segment.length(), 4.0);
        assert_eq!(segment.center(), Point::new(3.0, 1.0));
        assert!(!segment.is_vertical());
    }

    #[test]
    fn test_contains() {
        let segment = Segment::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        assert!(segment.contains(Point::new(5.0, 5.0)));
        assert!(!segment.contains(Point::new(5.0, 6.0)));
    }

    #[test]
    fn test_intersection() {
        let a = Segment::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        let b = Segment::new(Point::new(0.0, 10.0), Point::new(10.0, 0.0));
        assert!(a.intersects(&b));
        assert_eq!(a.intersection_point(&b), Some(Point::new(5.0, 5.0)));

        let c = Segment::new(Point::new(20.0, 20.0), Point::new(30.0, 20.0));
        assert!(!a.intersects(&c));
        assert!(a.intersection_point(&c).is_none());
    }
}

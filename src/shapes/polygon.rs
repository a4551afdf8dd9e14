//! Polygons, rectangles and squares, including vertex morphing

use crate::animation::reshape::reconcile;
use crate::animation::{AnimationKind, AnimationValue, SegmentRead};
use crate::error::MotionError;
use crate::frame::{Frame, FrameSpan};
use crate::geometry::{Point, Quadrant};
use crate::shapes::shape::{transform_attribute, ShapeBase};
use crate::shapes::Segment;
use crate::Result;
use serde::{Deserialize, Serialize};

/// Closed polygon over an ordered cyclic vertex list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    base: ShapeBase,
    start_points: Vec<Point>,
    points: Vec<Point>,
}

impl Polygon {
    /// Create a polygon; fewer than 3 vertices is a configuration error
    pub fn new(points: Vec<Point>) -> Result<Self> {
        let base = ShapeBase::new();
        if points.len() < 3 {
            return Err(MotionError::DegeneratePolygon {
                id: base.id().to_string(),
                count: points.len(),
            });
        }
        Ok(Self::from_points(base, points))
    }

    fn from_points(base: ShapeBase, points: Vec<Point>) -> Self {
        let mut polygon = Self {
            base,
            start_points: points.clone(),
            points,
        };
        // morph targets interpolate against the starting outline
        polygon.base.animator_mut().set_base(
            AnimationKind::VertexModification,
            polygon.start_points.clone(),
        );
        polygon
    }

    /// Axis-aligned rectangle from its top-left corner
    pub fn rectangle(origin: Point, width: f64, height: f64) -> Self {
        let points = vec![
            origin,
            origin + Point::new(width, 0.0),
            origin + Point::new(width, height),
            origin + Point::new(0.0, height),
        ];
        Self::from_points(ShapeBase::new(), points)
    }

    /// Axis-aligned square from its top-left corner
    #[inline]
    pub fn square(origin: Point, side: f64) -> Self {
        Self::rectangle(origin, side, side)
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

    /// Current vertex list
    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Consecutive vertex pairs, wrapping around the last vertex
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let count = self.points.len();
        (0..count).map(move |i| (self.points[i], self.points[(i + 1) % count]))
    }

    /// Signed area; the sign encodes orientation
    pub fn area(&self) -> f64 {
        self.edges().map(|(a, b)| a.cross(b)).sum::<f64>() / 2.0
    }

    /// Absolute area
    #[inline]
    pub fn absolute_area(&self) -> f64 {
        self.area().abs()
    }

    /// Clockwise respective to the rendered y-down coordinate space
    #[inline]
    pub fn is_clockwise(&self) -> bool {
        self.area() > 0.0
    }

    /// Force the winding direction, reversing the vertex order if needed
    pub fn orient(&mut self, clockwise: bool) {
        if self.is_clockwise() != clockwise {
            self.points.reverse();
            self.start_points.reverse();
        }
    }

    /// Center of the bounding quadrant
    #[inline]
    pub fn center(&self) -> Point {
        self.bounding_quadrant().center()
    }

    /// Index and value of the vertex nearest to `point`
    pub fn nearest_vertex(&self, point: Point) -> Option<(usize, Point)> {
        crate::animation::reshape::nearest(&self.points, point, &std::collections::HashSet::new())
    }

    /// Whether any edge of the two polygons intersect
    pub fn intersection_with(&self, other: &Polygon) -> bool {
        self.edges().any(|(a1, a2)| {
            other
                .edges()
                .any(|(b1, b2)| Segment::segments_intersect(a1, a2, b1, b2))
        })
    }

    /// Advance one frame; morphing resolves before the other kinds because
    /// it defines the vertex set they act on
    pub fn tick(&mut self) -> Result<()> {
        self.base.begin_tick();
        self.tick_modification()?;
        if let Some(delta) = self.base.vector_step(AnimationKind::Translation)? {
            for point in &mut self.points {
                *point += delta;
            }
        }
        if let Some(delta) = self.base.scalar_step(AnimationKind::Inflation)? {
            // uniform dilation: push every vertex away from the center
            let center = self.center();
            for point in &mut self.points {
                let direction = (*point - center).normalize();
                *point += direction * delta;
            }
        }
        self.base.finish_tick()
    }

    /// One tick of the vertex-morph kind, reconciling segment endpoints of
    /// different cardinality on entry
    fn tick_modification(&mut self) -> Result<()> {
        const KIND: AnimationKind = AnimationKind::VertexModification;

        match self.base.animator().read(KIND)? {
            SegmentRead::New { prev, next } => {
                let (prev_frame, prev_points) = match prev {
                    Some(keyframe) => (
                        keyframe.frame,
                        self.expect_vertices(keyframe.value, keyframe.frame)?,
                    ),
                    None => (Frame::zero(), self.start_points.clone()),
                };
                let next_frame = next.frame;
                let next_points = self.expect_vertices(next.value, next_frame)?;

                let (prev_points, next_points) = if prev_points.len() != next_points.len() {
                    log::debug!(
                        "vertex counts differ between frame {prev_frame} and frame {next_frame}, reconciling"
                    );
                    self.reconcile_segment(prev_frame, prev_points, next_frame, next_points)?
                } else {
                    (prev_points, next_points)
                };

                let span = FrameSpan::new(prev_frame, next_frame);
                if span.frames() == 0 {
                    return Err(MotionError::ZeroFrameSpan {
                        id: self.base.id().to_string(),
                        kind: KIND,
                        frame: next_frame.index(),
                    });
                }
                let step: Vec<Point> = prev_points
                    .iter()
                    .zip(next_points.iter())
                    .map(|(p, n)| (*n - *p) / span.frames() as f64)
                    .collect();
                self.base
                    .animator_mut()
                    .cache(KIND, span, AnimationValue::Vertices(step.clone()));
                self.apply_modification(&step)
            }
            SegmentRead::Same(value) => {
                let frame = self.base.animator().current_frame();
                let step = self.expect_vertices(value, frame)?;
                self.apply_modification(&step)
            }
            SegmentRead::End => Ok(()),
        }
    }

    /// Reconcile a morph segment whose endpoint lists disagree in length.
    ///
    /// The longer side's count survives; the repaired list replaces the
    /// snapshot keyframe of the shorter side, and when the live outline is
    /// the shorter one it jumps to the repaired list so interpolation runs
    /// on equal-length sequences.
    fn reconcile_segment(
        &mut self,
        prev_frame: Frame,
        prev_points: Vec<Point>,
        next_frame: Frame,
        next_points: Vec<Point>,
    ) -> Result<(Vec<Point>, Vec<Point>)> {
        if prev_points.len() > next_points.len() {
            // more points than the target needs; repair the target list only
            let matched = reconcile(&next_points, &prev_points).map_err(|_| {
                self.matching_failed(next_frame)
            })?;
            self.base.animator_mut().replace_frozen(
                AnimationKind::VertexModification,
                next_frame,
                AnimationValue::Vertices(matched.clone()),
            )?;
            Ok((prev_points, matched))
        } else {
            // the live outline needs more points to match the target
            let matched = reconcile(&prev_points, &next_points).map_err(|_| {
                self.matching_failed(next_frame)
            })?;
            self.base.animator_mut().replace_frozen(
                AnimationKind::VertexModification,
                prev_frame,
                AnimationValue::Vertices(matched.clone()),
            )?;
            log::debug!("applying reconciled outline to the live polygon");
            self.points = matched.clone();
            Ok((matched, next_points))
        }
    }

    /// Add one per-vertex increment to the live outline
    fn apply_modification(&mut self, step: &[Point]) -> Result<()> {
        if step.len() != self.points.len() {
            return Err(MotionError::VertexCountMismatch {
                id: self.base.id().to_string(),
                kind: AnimationKind::VertexModification,
                frame: self.base.animator().current_frame().index(),
                expected: self.points.len(),
                actual: step.len(),
            });
        }
        for (point, delta) in self.points.iter_mut().zip(step.iter()) {
            *point += *delta;
        }
        Ok(())
    }

    fn expect_vertices(&self, value: AnimationValue, frame: Frame) -> Result<Vec<Point>> {
        match value {
            AnimationValue::Vertices(points) => Ok(points),
            other => Err(MotionError::KeyframeMismatch {
                id: self.base.id().to_string(),
                kind: AnimationKind::VertexModification,
                frame: frame.index(),
                reason: format!("{} payload cannot drive vertex modification", other.type_name()),
            }),
        }
    }

    fn matching_failed(&self, frame: Frame) -> MotionError {
        MotionError::MatchingFailed {
            id: self.base.id().to_string(),
            kind: AnimationKind::VertexModification,
            frame: frame.index(),
        }
    }

    /// Restore the start geometry and zero the clock
    pub fn reset(&mut self) {
        self.points = self.start_points.clone();
        self.base.reset();
    }

    /// Quadrant enclosing the polygon
    pub fn bounding_quadrant(&self) -> Quadrant {
        let mut box_ = Quadrant::empty();
        for point in &self.points {
            box_.add_point(*point);
        }
        box_
    }

    /// Markup fragment describing the current state
    pub fn svg_content(&self) -> String {
        let coordinates = self
            .points
            .iter()
            .map(|p| format!("{},{}", p.x, p.y))
            .collect::<Vec<_>>()
            .join(" ");
        format!(
            "<polygon points=\"{}\"{} {}/>\n",
            coordinates,
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
    fn test_needs_three_vertices() {
        let err = Polygon::new(vec![Point::zero(), Point::new(1.0, 0.0)]).unwrap_err();
        assert!(matches!(err, MotionError::DegeneratePolygon { count: 2, .. }));
    }

    #[test]
    fn test_square_area_and_orientation() {
        let mut square = Polygon::square(Point::zero(), 10.0);
        assert_eq!(square.absolute_area(), 100.0);
        let clockwise = square.is_clockwise();
        square.orient(!clockwise);
        assert_eq!(square.is_clockwise(), !clockwise);
        assert_eq!(square.absolute_area(), 100.0);
    }

    #[test]
    fn test_center() {
        let square = Polygon::square(Point::new(10.0, 10.0), 20.0);
        assert_eq!(square.center(), Point::new(20.0, 20.0));
    }

    #[test]
    fn test_intersection_with() {
        let a = Polygon::square(Point::zero(), 10.0);
        let b = Polygon::square(Point::new(5.0, 5.0), 10.0);
        let c = Polygon::square(Point::new(50.0, 50.0), 10.0);
        assert!(a.intersection_with(&b));
        assert!(!a.intersection_with(&c));
    }

    #[test]
    fn test_nearest_vertex() {
        let square = Polygon::square(Point::zero(), 10.0);
        let (index, point) = square.nearest_vertex(Point::new(9.0, 1.0)).unwrap();
        assert_eq!(index, 1);
        assert_eq!(point, Point::new(10.0, 0.0));
    }
}

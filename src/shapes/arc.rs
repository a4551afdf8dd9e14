//! Elliptical arcs described by center, radii and a pair of angles

use crate::animation::AnimationKind;
use crate::geometry::{Point, Quadrant};
use crate::shapes::shape::{transform_attribute, ShapeBase};
use crate::Result;
use serde::{Deserialize, Serialize};

/// Part of an ellipse between a start and an end angle, in degrees.
///
/// Angles follow the trigonometric circle on the rendered y-down canvas:
/// 0° sits on the positive x axis, 90° at the top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EllipseArc {
    base: ShapeBase,
    start_center: Point,
    start_rx: f64,
    start_ry: f64,
    start_angles: (f64, f64),
    center: Point,
    rx: f64,
    ry: f64,
    start_angle: f64,
    end_angle: f64,
    // endpoint cache, recomputed whenever the geometry moves
    start_point: Point,
    end_point: Point,
    large_arc: bool,
}

impl EllipseArc {
    /// Create an arc; negative angles are normalized into [0, 360)
    pub fn new(center: Point, rx: f64, ry: f64, start_angle: f64, end_angle: f64) -> Self {
        let start_angle = normalize_angle(start_angle);
        let end_angle = normalize_angle(end_angle);
        let mut arc = Self {
            base: ShapeBase::new(),
            start_center: center,
            start_rx: rx,
            start_ry: ry,
            start_angles: (start_angle, end_angle),
            center,
            rx,
            ry,
            start_angle,
            end_angle,
            start_point: Point::zero(),
            end_point: Point::zero(),
            large_arc: false,
        };
        arc.compute_endpoints();
        arc
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

    /// Current start and end angle in degrees
    #[inline]
    pub fn angles(&self) -> (f64, f64) {
        (self.start_angle, self.end_angle)
    }

    /// Point where the arc begins
    #[inline]
    pub fn start_point(&self) -> Point {
        self.start_point
    }

    /// Point where the arc ends
    #[inline]
    pub fn end_point(&self) -> Point {
        self.end_point
    }

    /// Project the angles onto the ellipse and refresh the endpoint cache
    fn compute_endpoints(&mut self) {
        let start = -self.start_angle.to_radians();
        let end = -self.end_angle.to_radians();
        self.start_point =
            self.center + Point::new(self.rx * start.cos(), self.ry * start.sin());
        self.end_point = self.center + Point::new(self.rx * end.cos(), self.ry * end.sin());
        // sweeps beyond a half turn need the large-arc flag to keep the shape
        self.large_arc = self.end_angle - self.start_angle > 180.0;
    }

    /// Advance one frame
    pub fn tick(&mut self) -> Result<()> {
        self.base.begin_tick();
        let mut moved = false;
        if let Some(delta) = self.base.vector_step(AnimationKind::Translation)? {
            self.center += delta;
            moved = true;
        }
        if let Some(delta) = self.base.scalar_step(AnimationKind::Inflation)? {
            self.rx += delta;
            self.ry += delta;
            moved = true;
        }
        if let Some(delta) = self.base.scalar_step(AnimationKind::AngularTranslation)? {
            self.start_angle += delta;
            self.end_angle += delta;
            moved = true;
        }
        if moved {
            self.compute_endpoints();
        }
        self.base.finish_tick()
    }

    /// Restore the start geometry and zero the clock
    pub fn reset(&mut self) {
        self.center = self.start_center;
        self.rx = self.start_rx;
        self.ry = self.start_ry;
        self.start_angle = self.start_angles.0;
        self.end_angle = self.start_angles.1;
        self.compute_endpoints();
        self.base.reset();
    }

    /// Quadrant enclosing the arc.
    ///
    /// The extreme point of an arc need not be an endpoint: every axis
    /// crossing at 0/90/180/270° inside the sweep contributes an extreme.
    pub fn bounding_quadrant(&self) -> Quadrant {
        let mut box_ = Quadrant::empty();
        box_.add_point(self.start_point);
        box_.add_point(self.end_point);

        let start = self.start_angle.rem_euclid(360.0);
        let end = start + (self.end_angle - self.start_angle);
        if start <= 0.0 && 0.0 < end {
            box_.add_point(self.center + Point::new(self.rx, 0.0));
        }
        if start <= 90.0 && 90.0 < end {
            box_.add_point(self.center + Point::new(0.0, -self.ry));
        }
        if start <= 180.0 && 180.0 < end {
            box_.add_point(self.center + Point::new(-self.rx, 0.0));
        }
        if start <= 270.0 && 270.0 < end {
            box_.add_point(self.center + Point::new(0.0, self.ry));
        }
        if 360.0 < end {
            box_.add_point(self.center + Point::new(self.rx, 0.0));
        }

        box_
    }

    /// Markup fragment describing the current state
    pub fn svg_content(&self) -> String {
        format!(
            "<path d=\"M {} {} A {} {}, 0, {}, 0, {} {}\"{} {}></path>\n",
            self.start_point.x,
            self.start_point.y,
            self.rx,
            self.ry,
            if self.large_arc { 1 } else { 0 },
            self.end_point.x,
            self.end_point.y,
            transform_attribute(
                self.base.translation(),
                self.base.rotation(),
                Some(self.center)
            ),
            self.base.style().to_attributes(),
        )
    }
}

/// Map negative angles into [0, 360)
fn normalize_angle(angle: f64) -> f64 {
    if angle < 0.0 {
        angle.rem_euclid(360.0)
    } else {
        angle
    }
}

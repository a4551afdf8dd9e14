//! Planar point/vector value type

use crate::geometry::utils::hash_f64;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Tolerance used by the segment containment test.
/// Points extremely close to an edge count as lying on it.
const CONTAINMENT_EPSILON: f64 = 1e-6;

/// 2D point, also used as a displacement vector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_f64(self.x, state);
        hash_f64(self.y, state);
    }
}

impl Eq for Point {}

impl Point {
    /// Create a new point
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The origin
    #[inline]
    pub fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Euclidean distance to another point
    #[inline]
    pub fn distance_to(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Length of this point treated as a vector
    #[inline]
    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Unit vector with this direction, or zero for the zero vector
    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len > 0.0 {
            Self::new(self.x / len, self.y / len)
        } else {
            Self::zero()
        }
    }

    /// Cross product between two points treated as 2D vectors
    #[inline]
    pub fn cross(&self, other: Point) -> f64 {
        -self.y * other.x + self.x * other.y
    }

    /// Whether this point lies on the segment between `start` and `end`.
    ///
    /// Determining containment exactly is meaningless for floats; the test
    /// compares summed endpoint distances against the segment length within
    /// a small tolerance, so results may be wrong extremely near endpoints.
    pub fn on_segment(&self, start: Point, end: Point) -> bool {
        let detour = self.distance_to(start) + self.distance_to(end);
        (detour - start.distance_to(end)).abs() < CONTAINMENT_EPSILON
    }
}

impl std::ops::Add for Point {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::AddAssign for Point {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl std::ops::Sub for Point {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl std::ops::SubAssign for Point {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.x -= other.x;
        self.y -= other.y;
    }
}

impl std::ops::Mul<f64> for Point {
    type Output = Self;

    #[inline]
    fn mul(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }
}

impl std::ops::Div<f64> for Point {
    type Output = Self;

    #[inline]
    fn div(self, factor: f64) -> Self {
        Self::new(self.x / factor, self.y / factor)
    }
}

impl std::ops::Neg for Point {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(f64, f64)> for Point {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(3.0, -1.0);
        assert_eq!(a + b, Point::new(4.0, 1.0));
        assert_eq!(b - a, Point::new(2.0, -3.0));
        assert_eq!(a * 2.0, Point::new(2.0, 4.0));
        assert_eq!(b / 2.0, Point::new(1.5, -0.5));
    }

    #[test]
    fn test_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance_to(b), 5.0);
        assert_eq!(b.distance_to(a), 5.0);
    }

    #[test]
    fn test_on_segment() {
        let start = Point::new(0.0, 0.0);
        let end = Point::new(10.0, 0.0);
        assert!(Point::new(5.0, 0.0).on_segment(start, end));
        assert!(start.on_segment(start, end));
        assert!(end.on_segment(start, end));
        assert!(!Point::new(5.0, 1.0).on_segment(start, end));
        assert!(!Point::new(11.0, 0.0).on_segment(start, end));
    }

    #[test]
    fn test_hash_consistent_with_eq() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(Point::new(1.0, 2.0));
        assert!(set.contains(&Point::new(1.0, 2.0)));
        assert!(!set.contains(&Point::new(2.0, 1.0)));
    }
}

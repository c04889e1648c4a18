use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::{CurveKind, Point};

/// Axis-aligned rectangle. Containment is half-open on the far edges.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rectangle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rectangle {
    pub const EMPTY: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn left(&self) -> f64 {
        self.x
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn top(&self) -> f64 {
        self.y
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        if self.width <= 0.0 || self.height <= 0.0 {
            return false;
        }

        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    /// Returns `true` when `other` lies fully inside this rectangle.
    #[must_use]
    pub fn contains_rect(&self, other: &Self) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

impl Circle {
    #[must_use]
    pub const fn new(x: f64, y: f64, radius: f64) -> Self {
        Self { x, y, radius }
    }

    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        if self.radius <= 0.0 {
            return false;
        }

        let dx = self.x - x;
        let dy = self.y - y;
        dx * dx + dy * dy <= self.radius * self.radius
    }

    #[must_use]
    pub fn bounding_rect(&self) -> Rectangle {
        Rectangle::new(
            self.x - self.radius,
            self.y - self.radius,
            self.radius * 2.0,
            self.radius * 2.0,
        )
    }
}

/// Straight-edged path. `close_stroke` closes the outline when stroking.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Polygon {
    pub points: Vec<Point>,
    pub close_stroke: bool,
}

impl Polygon {
    #[must_use]
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points,
            close_stroke: true,
        }
    }

    #[must_use]
    pub fn open(points: Vec<Point>) -> Self {
        Self {
            points,
            close_stroke: false,
        }
    }

    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        contains_even_odd(self.points.iter().copied(), x, y)
    }
}

/// Ordered points joined through a curve family. Lines are stroked only and
/// never contain a point.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Line {
    pub points: Vec<Point>,
    pub curve: CurveKind,
}

impl Line {
    #[must_use]
    pub fn new(points: Vec<Point>, curve: CurveKind) -> Self {
        Self { points, curve }
    }
}

/// One sample of an area: an x coordinate with its lower and upper y bound.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AreaPoint {
    pub x: f64,
    pub y0: f64,
    pub y1: f64,
}

impl AreaPoint {
    #[must_use]
    pub const fn new(x: f64, y0: f64, y1: f64) -> Self {
        Self { x, y0, y1 }
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y0.is_finite() && self.y1.is_finite()
    }
}

/// Region between two parallel y bounds sharing the same x samples.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Area {
    pub points: Vec<AreaPoint>,
    pub curve: CurveKind,
}

impl Area {
    #[must_use]
    pub fn new(points: Vec<AreaPoint>, curve: CurveKind) -> Self {
        Self { points, curve }
    }

    /// Tests against the straight-edged outline (`y1` forward, `y0` back).
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let upper = self.points.iter().map(|p| Point::new(p.x, p.y1));
        let lower = self.points.iter().rev().map(|p| Point::new(p.x, p.y0));
        contains_even_odd(upper.chain(lower), x, y)
    }
}

/// Geometric shape recorded by a graphics node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Rectangle(Rectangle),
    Circle(Circle),
    Polygon(Polygon),
    Line(Line),
    Area(Area),
}

impl Shape {
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        match self {
            Self::Rectangle(rect) => rect.contains(x, y),
            Self::Circle(circle) => circle.contains(x, y),
            Self::Polygon(polygon) => polygon.contains(x, y),
            Self::Line(_) => false,
            Self::Area(area) => area.contains(x, y),
        }
    }
}

fn contains_even_odd(points: impl Iterator<Item = Point>, x: f64, y: f64) -> bool {
    let points: SmallVec<[Point; 16]> = points.collect();
    let len = points.len();
    if len < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = len - 1;
    for i in 0..len {
        let pi = points[i];
        let pj = points[j];
        let intersect =
            ((pi.y > y) != (pj.y > y)) && (x < (pj.x - pi.x) * ((y - pi.y) / (pj.y - pi.y)) + pi.x);
        if intersect {
            inside = !inside;
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::{Area, AreaPoint, Circle, Polygon, Rectangle};
    use crate::math::{CurveKind, Point};

    #[test]
    fn rectangle_contains_is_half_open() {
        let rect = Rectangle::new(0.0, 0.0, 100.0, 100.0);
        assert!(rect.contains(0.0, 0.0));
        assert!(rect.contains(99.9, 99.9));
        assert!(!rect.contains(100.0, 50.0));
        assert!(!Rectangle::new(0.0, 0.0, 0.0, 10.0).contains(0.0, 0.0));
    }

    #[test]
    fn zero_radius_circle_contains_nothing() {
        assert!(!Circle::new(5.0, 5.0, 0.0).contains(5.0, 5.0));
        assert!(Circle::new(5.0, 5.0, 2.0).contains(6.0, 6.0));
    }

    #[test]
    fn polygon_contains_uses_even_odd_rule() {
        let triangle = Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 10.0),
        ]);
        assert!(triangle.contains(2.0, 2.0));
        assert!(!triangle.contains(8.0, 8.0));
        assert!(!Polygon::new(vec![Point::new(0.0, 0.0)]).contains(0.0, 0.0));
    }

    #[test]
    fn area_contains_points_between_bounds() {
        let area = Area::new(
            vec![
                AreaPoint::new(0.0, 100.0, 40.0),
                AreaPoint::new(50.0, 100.0, 20.0),
                AreaPoint::new(100.0, 100.0, 60.0),
            ],
            CurveKind::Linear,
        );
        assert!(area.contains(50.0, 50.0));
        assert!(!area.contains(50.0, 10.0));
    }
}

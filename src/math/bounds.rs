use super::{Matrix, Point, Rectangle};

/// Axis-aligned bounding box accumulator.
///
/// Starts out empty (`min > max`) and grows as points, quads or other bounds
/// are added.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }
}

impl Bounds {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Returns the box as a rectangle, or [`Rectangle::EMPTY`].
    #[must_use]
    pub fn rectangle(&self) -> Rectangle {
        if self.is_empty() {
            return Rectangle::EMPTY;
        }

        Rectangle::new(
            self.min_x,
            self.min_y,
            self.max_x - self.min_x,
            self.max_y - self.min_y,
        )
    }

    pub fn add_point(&mut self, point: Point) {
        self.min_x = self.min_x.min(point.x);
        self.max_x = self.max_x.max(point.x);
        self.min_y = self.min_y.min(point.y);
        self.max_y = self.max_y.max(point.y);
    }

    /// Adds four already transformed corners.
    pub fn add_quad(&mut self, corners: &[Point; 4]) {
        for corner in corners {
            self.add_point(*corner);
        }
    }

    /// Adds the local rectangle `(x0, y0)..(x1, y1)` mapped through `matrix`.
    pub fn add_frame(&mut self, matrix: &Matrix, x0: f64, y0: f64, x1: f64, y1: f64) {
        self.add_quad(&[
            matrix.apply(Point::new(x0, y0)),
            matrix.apply(Point::new(x1, y0)),
            matrix.apply(Point::new(x1, y1)),
            matrix.apply(Point::new(x0, y1)),
        ]);
    }

    /// Adds local vertices mapped through `matrix`, padded on each axis.
    pub fn add_vertices_matrix(
        &mut self,
        matrix: &Matrix,
        vertices: impl IntoIterator<Item = Point>,
        pad_x: f64,
        pad_y: f64,
    ) {
        for vertex in vertices {
            let p = matrix.apply(vertex);
            self.min_x = self.min_x.min(p.x - pad_x);
            self.max_x = self.max_x.max(p.x + pad_x);
            self.min_y = self.min_y.min(p.y - pad_y);
            self.max_y = self.max_y.max(p.y + pad_y);
        }
    }

    pub fn add_bounds(&mut self, other: &Self) {
        self.min_x = self.min_x.min(other.min_x);
        self.max_x = self.max_x.max(other.max_x);
        self.min_y = self.min_y.min(other.min_y);
        self.max_y = self.max_y.max(other.max_y);
    }

    /// Adds `other` clipped to `mask`. Nothing is added when they do not
    /// overlap.
    pub fn add_bounds_mask(&mut self, other: &Self, mask: &Self) {
        let min_x = other.min_x.max(mask.min_x);
        let max_x = other.max_x.min(mask.max_x);
        let min_y = other.min_y.max(mask.min_y);
        let max_y = other.max_y.min(mask.max_y);

        if min_x <= max_x && min_y <= max_y {
            self.min_x = self.min_x.min(min_x);
            self.max_x = self.max_x.max(max_x);
            self.min_y = self.min_y.min(min_y);
            self.max_y = self.max_y.max(max_y);
        }
    }

    pub fn pad(&mut self, pad_x: f64, pad_y: f64) {
        if self.is_empty() {
            return;
        }
        self.min_x -= pad_x;
        self.max_x += pad_x;
        self.min_y -= pad_y;
        self.max_y += pad_y;
    }
}

#[cfg(test)]
mod tests {
    use super::Bounds;
    use crate::math::{Matrix, Point, Rectangle};

    #[test]
    fn new_bounds_are_empty() {
        let bounds = Bounds::new();
        assert!(bounds.is_empty());
        assert_eq!(bounds.rectangle(), Rectangle::EMPTY);
    }

    #[test]
    fn add_frame_uses_transformed_corners() {
        let mut matrix = Matrix::IDENTITY;
        matrix.rotate(std::f64::consts::FRAC_PI_2);

        let mut bounds = Bounds::new();
        bounds.add_frame(&matrix, 0.0, 0.0, 10.0, 5.0);
        let rect = bounds.rectangle();

        assert!((rect.x + 5.0).abs() < 1e-9);
        assert!((rect.width - 5.0).abs() < 1e-9);
        assert!((rect.height - 10.0).abs() < 1e-9);
    }

    #[test]
    fn disjoint_mask_adds_nothing() {
        let mut child = Bounds::new();
        child.add_point(Point::new(0.0, 0.0));
        child.add_point(Point::new(10.0, 10.0));
        let mut mask = Bounds::new();
        mask.add_point(Point::new(20.0, 20.0));
        mask.add_point(Point::new(30.0, 30.0));

        let mut bounds = Bounds::new();
        bounds.add_bounds_mask(&child, &mask);
        assert!(bounds.is_empty());
    }
}

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use super::{Point, Transform};

const DECOMPOSE_EPSILON: f64 = 0.000_01;

/// 2D affine matrix laid out as
///
/// ```text
/// | a  c  tx |
/// | b  d  ty |
/// | 0  0  1  |
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub tx: f64,
    pub ty: f64,
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix {
    pub const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    #[must_use]
    pub const fn new(a: f64, b: f64, c: f64, d: f64, tx: f64, ty: f64) -> Self {
        Self { a, b, c, d, tx, ty }
    }

    #[must_use]
    pub const fn from_translation(tx: f64, ty: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    #[must_use]
    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// Maps a local point through this matrix.
    #[must_use]
    pub fn apply(&self, point: Point) -> Point {
        Point::new(
            self.a * point.x + self.c * point.y + self.tx,
            self.b * point.x + self.d * point.y + self.ty,
        )
    }

    /// Maps a point through the inverse of this matrix.
    ///
    /// A singular matrix yields non-finite coordinates, which never pass a
    /// containment test.
    #[must_use]
    pub fn apply_inverse(&self, point: Point) -> Point {
        let id = 1.0 / (self.a * self.d + self.c * -self.b);
        Point::new(
            self.d * id * point.x
                + -self.c * id * point.y
                + (self.ty * self.c - self.tx * self.d) * id,
            self.a * id * point.y
                + -self.b * id * point.x
                + (-self.ty * self.a + self.tx * self.b) * id,
        )
    }

    pub fn translate(&mut self, x: f64, y: f64) -> &mut Self {
        self.tx += x;
        self.ty += y;
        self
    }

    pub fn scale(&mut self, x: f64, y: f64) -> &mut Self {
        self.a *= x;
        self.d *= y;
        self.c *= x;
        self.b *= y;
        self.tx *= x;
        self.ty *= y;
        self
    }

    pub fn rotate(&mut self, angle: f64) -> &mut Self {
        let (sin, cos) = angle.sin_cos();
        let a1 = self.a;
        let c1 = self.c;
        let tx1 = self.tx;

        self.a = a1 * cos - self.b * sin;
        self.b = a1 * sin + self.b * cos;
        self.c = c1 * cos - self.d * sin;
        self.d = c1 * sin + self.d * cos;
        self.tx = tx1 * cos - self.ty * sin;
        self.ty = tx1 * sin + self.ty * cos;
        self
    }

    /// Post-multiplies `other`: the result maps a point through `other`
    /// first and then through `self`.
    pub fn append(&mut self, other: &Self) -> &mut Self {
        let a1 = self.a;
        let b1 = self.b;
        let c1 = self.c;
        let d1 = self.d;

        self.a = other.a * a1 + other.b * c1;
        self.b = other.a * b1 + other.b * d1;
        self.c = other.c * a1 + other.d * c1;
        self.d = other.c * b1 + other.d * d1;

        self.tx = other.tx * a1 + other.ty * c1 + self.tx;
        self.ty = other.tx * b1 + other.ty * d1 + self.ty;
        self
    }

    /// Pre-multiplies `other`: the result maps a point through `self` first
    /// and then through `other`.
    pub fn prepend(&mut self, other: &Self) -> &mut Self {
        let tx1 = self.tx;

        if other.a != 1.0 || other.b != 0.0 || other.c != 0.0 || other.d != 1.0 {
            let a1 = self.a;
            let c1 = self.c;

            self.a = a1 * other.a + self.b * other.c;
            self.b = a1 * other.b + self.b * other.d;
            self.c = c1 * other.a + self.d * other.c;
            self.d = c1 * other.b + self.d * other.d;
        }

        self.tx = tx1 * other.a + self.ty * other.c + other.tx;
        self.ty = tx1 * other.b + self.ty * other.d + other.ty;
        self
    }

    pub fn invert(&mut self) -> &mut Self {
        let a1 = self.a;
        let b1 = self.b;
        let c1 = self.c;
        let d1 = self.d;
        let tx1 = self.tx;
        let n = a1 * d1 - b1 * c1;

        self.a = d1 / n;
        self.b = -b1 / n;
        self.c = -c1 / n;
        self.d = a1 / n;
        self.tx = (c1 * self.ty - d1 * tx1) / n;
        self.ty = -(a1 * self.ty - b1 * tx1) / n;
        self
    }

    #[must_use]
    pub fn inverted(&self) -> Self {
        let mut out = *self;
        out.invert();
        out
    }

    /// Rebuilds the matrix from decomposed components.
    #[allow(clippy::too_many_arguments)]
    pub fn set_transform(
        &mut self,
        x: f64,
        y: f64,
        pivot_x: f64,
        pivot_y: f64,
        scale_x: f64,
        scale_y: f64,
        rotation: f64,
        skew_x: f64,
        skew_y: f64,
    ) -> &mut Self {
        self.a = (rotation + skew_y).cos() * scale_x;
        self.b = (rotation + skew_y).sin() * scale_x;
        self.c = -(rotation - skew_x).sin() * scale_y;
        self.d = (rotation - skew_x).cos() * scale_y;

        self.tx = x - (pivot_x * self.a + pivot_y * self.c);
        self.ty = y - (pivot_x * self.b + pivot_y * self.d);
        self
    }

    /// Decomposes this matrix into position, scale, skew and rotation.
    ///
    /// When `skew_x + skew_y` is a multiple of a full turn the skew collapses
    /// into a pure rotation. The transform's pivot is honoured when solving
    /// for the position.
    pub fn decompose(&self, transform: &mut Transform) {
        let a = self.a;
        let b = self.b;
        let c = self.c;
        let d = self.d;
        let pivot = transform.pivot;

        let skew_x = -(-c).atan2(d);
        let skew_y = b.atan2(a);

        let delta = (skew_x + skew_y).abs();

        if delta < DECOMPOSE_EPSILON || (TAU - delta).abs() < DECOMPOSE_EPSILON {
            transform.rotation = skew_y;
            transform.skew = Point::ORIGIN;
        } else {
            transform.rotation = 0.0;
            transform.skew = Point::new(skew_x, skew_y);
        }

        transform.scale = Point::new((a * a + b * b).sqrt(), (c * c + d * d).sqrt());
        transform.position = Point::new(
            self.tx + (pivot.x * a + pivot.y * c),
            self.ty + (pivot.x * b + pivot.y * d),
        );
    }
}

use serde::{Deserialize, Serialize};

use super::{Matrix, Point};

/// Decomposed local transform plus the matrices derived from it.
///
/// `local` and `world` are rebuilt by [`Transform::update_transform`]; they
/// are never cached across frames.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Point,
    pub scale: Point,
    pub pivot: Point,
    pub skew: Point,
    pub rotation: f64,
    local: Matrix,
    world: Matrix,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Point::ORIGIN,
            scale: Point::new(1.0, 1.0),
            pivot: Point::ORIGIN,
            skew: Point::ORIGIN,
            rotation: 0.0,
            local: Matrix::IDENTITY,
            world: Matrix::IDENTITY,
        }
    }
}

impl Transform {
    #[must_use]
    pub fn from_position(x: f64, y: f64) -> Self {
        Self {
            position: Point::new(x, y),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn local_matrix(&self) -> Matrix {
        self.local
    }

    #[must_use]
    pub fn world_matrix(&self) -> Matrix {
        self.world
    }

    pub fn set_position(&mut self, x: f64, y: f64) {
        self.position = Point::new(x, y);
    }

    pub fn set_scale(&mut self, x: f64, y: f64) {
        self.scale = Point::new(x, y);
    }

    /// Recomputes only the local matrix.
    pub fn update_local_transform(&mut self) {
        let cx = (self.rotation + self.skew.y).cos();
        let sx = (self.rotation + self.skew.y).sin();
        let cy = -(self.rotation - self.skew.x).sin();
        let sy = (self.rotation - self.skew.x).cos();

        let lt = &mut self.local;
        lt.a = cx * self.scale.x;
        lt.b = sx * self.scale.x;
        lt.c = cy * self.scale.y;
        lt.d = sy * self.scale.y;
        lt.tx = self.position.x - (self.pivot.x * lt.a + self.pivot.y * lt.c);
        lt.ty = self.position.y - (self.pivot.x * lt.b + self.pivot.y * lt.d);
    }

    /// Recomputes the local matrix and composes it with the parent's world
    /// matrix: `world = local ⊗ parent_world`.
    pub fn update_transform(&mut self, parent_world: &Matrix) {
        self.update_local_transform();

        let lt = self.local;
        let pt = parent_world;
        let wt = &mut self.world;

        wt.a = lt.a * pt.a + lt.b * pt.c;
        wt.b = lt.a * pt.b + lt.b * pt.d;
        wt.c = lt.c * pt.a + lt.d * pt.c;
        wt.d = lt.c * pt.b + lt.d * pt.d;
        wt.tx = lt.tx * pt.a + lt.ty * pt.c + pt.tx;
        wt.ty = lt.tx * pt.b + lt.ty * pt.d + pt.ty;
    }

    /// Replaces position, scale, skew and rotation with the decomposition
    /// of `matrix`.
    pub fn set_from_matrix(&mut self, matrix: &Matrix) {
        matrix.decompose(self);
        self.update_local_transform();
    }
}

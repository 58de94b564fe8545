//! Vertex: a position with normal, color and texture coordinate attached
//!
//! Value semantics throughout: transform functions return new vertices,
//! mutation happens only through the explicit setters.

use crate::math::{Fixed, Mat4, Vec2, Vec3};

use super::types::Color;

/// A model vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub color: Color,
    pub texcoord: Vec2,
}

impl Vertex {
    /// Position-only constructor; normal defaults to +Z, color to white,
    /// texture coordinate to (0, 0).
    pub fn new(x: Fixed, y: Fixed, z: Fixed) -> Self {
        Self {
            position: Vec3::new(x, y, z),
            normal: Vec3::FORWARD,
            color: Color::WHITE,
            texcoord: Vec2::ZERO,
        }
    }

    pub fn from_vec(position: Vec3) -> Self {
        Self::new(position.x, position.y, position.z)
    }

    pub fn set_normal(&mut self, normal: Vec3) {
        self.normal = normal;
    }

    pub fn set_normal_xyz(&mut self, x: Fixed, y: Fixed, z: Fixed) {
        self.normal = Vec3::new(x, y, z);
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn set_color_rgb(&mut self, r: u8, g: u8, b: u8) {
        self.color = Color::new(r, g, b);
    }

    pub fn set_texcoord(&mut self, texcoord: Vec2) {
        self.texcoord = texcoord;
    }

    pub fn set_texcoord_uv(&mut self, u: Fixed, v: Fixed) {
        self.texcoord = Vec2::new(u, v);
    }

    /// Transform the position with point semantics. The normal is left
    /// untouched; use `transform_normal` for it.
    pub fn transform(&self, m: &Mat4) -> Vertex {
        let mut result = *self;
        result.position = m.mul_vec3(self.position);
        result
    }

    /// Transform the normal by the transpose of the upper-left 3x3 block
    /// of `m`, then re-normalize to cancel residual scale.
    ///
    /// This is the rotation-only approximation to the inverse-transpose:
    /// correct for rotations and uniform scale, not for non-uniform scale.
    pub fn transform_normal(&self, m: &Mat4) -> Vertex {
        let mut transpose = Mat4::zero();
        for i in 0..3 {
            for j in 0..3 {
                transpose.set(i, j, m.get(j, i));
            }
        }
        transpose.set(3, 3, Fixed::ONE);

        let mut result = *self;
        result.normal = transpose.mul_vec3(self.normal).normalize();
        result
    }
}

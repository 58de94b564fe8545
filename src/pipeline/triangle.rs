//! Triangle: three vertices, a derived face normal, and render state
//!
//! The face normal is always the normalized cross product of the
//! triangle's own edges. It is recomputed whenever vertices change through
//! the constructor or transform, never hand-set. Winding order of the
//! vertices decides its direction.

use crate::math::{Mat4, Vec3};

use super::types::{Color, Texture};
use super::vertex::Vertex;

/// How a triangle is filled by the rasterization stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    #[default]
    Flat,
    Textured,
}

/// A renderable triangle. Holds its texture by reference; pixel storage
/// stays owned by the asset layer.
#[derive(Debug, Clone, Copy)]
pub struct Triangle<'t> {
    pub vertices: [Vertex; 3],
    normal: Vec3,
    pub face_culled: bool,
    pub color: Color,
    texture: Option<&'t Texture>,
    render_mode: RenderMode,
}

impl<'t> Triangle<'t> {
    /// Build from three vertices and compute the face normal immediately
    pub fn new(v1: Vertex, v2: Vertex, v3: Vertex) -> Self {
        let mut result = Self {
            vertices: [v1, v2, v3],
            normal: Vec3::ZERO,
            face_culled: false,
            color: Color::WHITE,
            texture: None,
            render_mode: RenderMode::Flat,
        };
        result.calculate_normal();
        result
    }

    /// Degenerate fallback: zero vertices, forcibly culled, flat mode.
    /// Returned instead of an error when transform inputs are absent.
    pub fn degenerate() -> Triangle<'static> {
        let zero = Vertex::from_vec(Vec3::ZERO);
        Triangle {
            vertices: [zero; 3],
            normal: Vec3::ZERO,
            face_culled: true,
            color: Color::WHITE,
            texture: None,
            render_mode: RenderMode::Flat,
        }
    }

    /// Face normal (derived from the vertices)
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    pub fn texture(&self) -> Option<&'t Texture> {
        self.texture
    }

    /// Recompute the face normal from the current vertex positions:
    /// normalize(cross(v2 - v1, v3 - v1))
    pub fn calculate_normal(&mut self) {
        let edge1 = self.vertices[1].position - self.vertices[0].position;
        let edge2 = self.vertices[2].position - self.vertices[0].position;
        self.normal = edge1.cross(edge2).normalize();
    }

    /// True when the face points toward the camera. View space only: the
    /// camera looks down -Z, so camera-facing normals have negative Z.
    pub fn is_facing_camera(&self) -> bool {
        self.normal.z.is_negative()
    }

    /// Transform every vertex with point semantics, keep the scalar
    /// properties, and recompute the face normal from the transformed
    /// positions.
    pub fn transform(&self, m: &Mat4) -> Triangle<'t> {
        let mut result = *self;
        for i in 0..3 {
            result.vertices[i] = self.vertices[i].transform(m);
        }
        result.calculate_normal();
        result
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Attach or detach a texture. Attaching switches to textured mode;
    /// detaching deliberately leaves the mode alone (callers relied on
    /// this asymmetry in the original engine).
    pub fn set_texture(&mut self, texture: Option<&'t Texture>) {
        self.texture = texture;
        if texture.is_some() {
            self.render_mode = RenderMode::Textured;
        }
    }

    /// Change the render mode. Requests for textured mode are silently
    /// ignored while no texture is attached.
    pub fn set_render_mode(&mut self, mode: RenderMode) {
        if mode == RenderMode::Textured && self.texture.is_none() {
            return;
        }
        self.render_mode = mode;
    }
}

/// Transform with the original engine's null-tolerant contract: if either
/// input is absent the result is the degenerate, forcibly-culled triangle
/// (with the source color preserved when the triangle itself is present).
pub fn transform_triangle<'t>(
    triangle: Option<&Triangle<'t>>,
    matrix: Option<&Mat4>,
) -> Triangle<'t> {
    match (triangle, matrix) {
        (Some(t), Some(m)) => t.transform(m),
        (t, _) => {
            let mut empty = Triangle::degenerate();
            if let Some(t) = t {
                empty.color = t.color;
            }
            empty
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Fixed;

    fn unit_triangle() -> Triangle<'static> {
        Triangle::new(
            Vertex::from_vec(Vec3::from_int(0, 0, 0)),
            Vertex::from_vec(Vec3::from_int(1, 0, 0)),
            Vertex::from_vec(Vec3::from_int(0, 1, 0)),
        )
    }

    #[test]
    fn test_new_defaults() {
        let t = unit_triangle();
        assert!(!t.face_culled);
        assert_eq!(t.render_mode(), RenderMode::Flat);
        assert!(t.texture().is_none());
        assert_eq!(t.color, Color::WHITE);
    }

    #[test]
    fn test_normal_from_winding() {
        let t = unit_triangle();
        assert_eq!(t.normal(), Vec3::from_int(0, 0, 1));
        assert!(!t.is_facing_camera());

        // Swapping the two non-origin vertices flips the winding
        let flipped = Triangle::new(
            Vertex::from_vec(Vec3::from_int(0, 0, 0)),
            Vertex::from_vec(Vec3::from_int(0, 1, 0)),
            Vertex::from_vec(Vec3::from_int(1, 0, 0)),
        );
        assert_eq!(flipped.normal(), Vec3::from_int(0, 0, -1));
        assert!(flipped.is_facing_camera());
    }

    #[test]
    fn test_degenerate_triangle_normal_is_zero() {
        let p = Vertex::from_vec(Vec3::from_int(2, 2, 2));
        let t = Triangle::new(p, p, p);
        assert_eq!(t.normal(), Vec3::ZERO);
    }

    #[test]
    fn test_transform_recomputes_normal() {
        let trig = crate::math::TrigTable::new();
        let t = unit_triangle();
        // Half turn about X flips the face over
        let m = Mat4::rotation_x(&trig, 128);
        let turned = t.transform(&m);
        assert!((turned.normal().z + Fixed::ONE).abs() <= Fixed::from_raw(5));
        assert!(turned.is_facing_camera());
    }

    #[test]
    fn test_transform_preserves_properties() {
        let tex = Texture::new(4, 4);
        let mut t = unit_triangle();
        t.set_color(Color::RED);
        t.set_texture(Some(&tex));

        let m = Mat4::translation(Fixed::from_int(1), Fixed::ZERO, Fixed::ZERO);
        let moved = t.transform(&m);
        assert_eq!(moved.color, Color::RED);
        assert_eq!(moved.render_mode(), RenderMode::Textured);
        assert!(moved.texture().is_some());
        assert_eq!(moved.vertices[1].position, Vec3::from_int(2, 0, 0));
    }

    #[test]
    fn test_transform_triangle_absent_inputs() {
        let t = unit_triangle();
        let m = Mat4::identity();

        let no_triangle = transform_triangle(None, Some(&m));
        assert!(no_triangle.face_culled);
        assert_eq!(no_triangle.render_mode(), RenderMode::Flat);
        assert_eq!(no_triangle.vertices[0].position, Vec3::ZERO);

        let no_matrix = transform_triangle(Some(&t), None);
        assert!(no_matrix.face_culled);
        assert!(no_matrix.texture().is_none());

        let both = transform_triangle(Some(&t), Some(&m));
        assert!(!both.face_culled);
        assert_eq!(both.normal(), t.normal());
    }

    #[test]
    fn test_transform_triangle_absent_matrix_keeps_color() {
        let mut t = unit_triangle();
        t.set_color(Color::BLUE);
        let fallback = transform_triangle(Some(&t), None);
        assert_eq!(fallback.color, Color::BLUE);
    }

    #[test]
    fn test_set_texture_promotes_mode() {
        let tex = Texture::new(4, 4);
        let mut t = unit_triangle();
        assert_eq!(t.render_mode(), RenderMode::Flat);

        t.set_texture(Some(&tex));
        assert_eq!(t.render_mode(), RenderMode::Textured);
    }

    #[test]
    fn test_detach_texture_keeps_mode() {
        let tex = Texture::new(4, 4);
        let mut t = unit_triangle();
        t.set_texture(Some(&tex));
        t.set_texture(None);
        // Detaching does not force the mode back to flat
        assert_eq!(t.render_mode(), RenderMode::Textured);
        assert!(t.texture().is_none());
    }

    #[test]
    fn test_set_render_mode_requires_texture() {
        let tex = Texture::new(4, 4);
        let mut t = unit_triangle();

        t.set_render_mode(RenderMode::Textured);
        assert_eq!(t.render_mode(), RenderMode::Flat);

        t.set_texture(Some(&tex));
        t.set_render_mode(RenderMode::Flat);
        assert_eq!(t.render_mode(), RenderMode::Flat);
        t.set_render_mode(RenderMode::Textured);
        assert_eq!(t.render_mode(), RenderMode::Textured);
    }
}

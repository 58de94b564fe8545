//! 4x4 matrix operations for 3D transformations
//!
//! Row-major, fixed-point. A valid affine transform keeps (0,0,0,1) in the
//! bottom row; translation lives in column 3.

use std::fmt;
use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

use super::fixed::Fixed;
use super::trig::{Angle, TrigTable};
use super::vector::{Vec3, Vec4};

/// Comparison tolerance for `equals`/`is_identity`: 5 raw units,
/// about 0.000076. Fixed-point pipelines accumulate rounding, so exact
/// equality is not the contract.
const MATRIX_EPSILON: Fixed = Fixed::from_raw(5);

/// Row-major 4x4 fixed-point matrix
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mat4 {
    m: [[Fixed; 4]; 4],
}

impl Mat4 {
    /// All-zero matrix
    pub const fn zero() -> Self {
        Self {
            m: [[Fixed::ZERO; 4]; 4],
        }
    }

    /// Identity matrix: 1 on the diagonal, 0 elsewhere
    pub fn identity() -> Self {
        let mut result = Self::zero();
        for i in 0..4 {
            result.m[i][i] = Fixed::ONE;
        }
        result
    }

    /// Element read; out-of-range indices return zero
    pub fn get(&self, row: usize, col: usize) -> Fixed {
        if row < 4 && col < 4 {
            self.m[row][col]
        } else {
            Fixed::ZERO
        }
    }

    /// Element write; out-of-range indices are silently ignored
    pub fn set(&mut self, row: usize, col: usize, value: Fixed) {
        if row < 4 && col < 4 {
            self.m[row][col] = value;
        }
    }

    /// Element-wise scale by a fixed-point scalar
    pub fn scale(&self, s: Fixed) -> Mat4 {
        let mut result = Self::zero();
        for row in 0..4 {
            for col in 0..4 {
                result.m[row][col] = self.m[row][col] * s;
            }
        }
        result
    }

    /// Element-wise comparison within the fixed epsilon
    pub fn equals(&self, other: &Mat4) -> bool {
        for row in 0..4 {
            for col in 0..4 {
                if (self.m[row][col] - other.m[row][col]).abs() > MATRIX_EPSILON {
                    return false;
                }
            }
        }
        true
    }

    /// Identity check within the fixed epsilon
    pub fn is_identity(&self) -> bool {
        self.equals(&Mat4::identity())
    }

    /// Full 4x4 * 4x1 product. Translation in column 3 displaces the
    /// result only when v.w == 1 (points), not when v.w == 0 (directions).
    pub fn mul_vec4(&self, v: Vec4) -> Vec4 {
        let rows = &self.m;
        Vec4 {
            x: rows[0][0] * v.x + rows[0][1] * v.y + rows[0][2] * v.z + rows[0][3] * v.w,
            y: rows[1][0] * v.x + rows[1][1] * v.y + rows[1][2] * v.z + rows[1][3] * v.w,
            z: rows[2][0] * v.x + rows[2][1] * v.y + rows[2][2] * v.z + rows[2][3] * v.w,
            w: rows[3][0] * v.x + rows[3][1] * v.y + rows[3][2] * v.z + rows[3][3] * v.w,
        }
    }

    /// Transform a 3D vector as a point: the translation column seeds each
    /// component, then the 3x3 linear part accumulates on top. Directions
    /// must go through `mul_vec4` with w = 0 instead.
    pub fn mul_vec3(&self, v: Vec3) -> Vec3 {
        let rows = &self.m;
        Vec3 {
            x: rows[0][3] + rows[0][0] * v.x + rows[0][1] * v.y + rows[0][2] * v.z,
            y: rows[1][3] + rows[1][0] * v.x + rows[1][1] * v.y + rows[1][2] * v.z,
            z: rows[2][3] + rows[2][0] * v.x + rows[2][1] * v.y + rows[2][2] * v.z,
        }
    }

    /// Translation by (x, y, z): identity with column 3 set
    pub fn translation(x: Fixed, y: Fixed, z: Fixed) -> Mat4 {
        let mut result = Self::identity();
        result.m[0][3] = x;
        result.m[1][3] = y;
        result.m[2][3] = z;
        result
    }

    /// Scaling by (x, y, z): diagonal (x, y, z, 1)
    pub fn scaling(x: Fixed, y: Fixed, z: Fixed) -> Mat4 {
        let mut result = Self::identity();
        result.m[0][0] = x;
        result.m[1][1] = y;
        result.m[2][2] = z;
        result
    }

    /// Rotation about the X axis by an 8-bit angle
    pub fn rotation_x(trig: &TrigTable, angle: Angle) -> Mat4 {
        let s = trig.sine(angle);
        let c = trig.cosine(angle);
        let mut result = Self::identity();
        result.m[1][1] = c;
        result.m[1][2] = -s;
        result.m[2][1] = s;
        result.m[2][2] = c;
        result
    }

    /// Rotation about the Y axis by an 8-bit angle
    pub fn rotation_y(trig: &TrigTable, angle: Angle) -> Mat4 {
        let s = trig.sine(angle);
        let c = trig.cosine(angle);
        let mut result = Self::identity();
        result.m[0][0] = c;
        result.m[0][2] = s;
        result.m[2][0] = -s;
        result.m[2][2] = c;
        result
    }

    /// Rotation about the Z axis by an 8-bit angle
    pub fn rotation_z(trig: &TrigTable, angle: Angle) -> Mat4 {
        let s = trig.sine(angle);
        let c = trig.cosine(angle);
        let mut result = Self::identity();
        result.m[0][0] = c;
        result.m[0][1] = -s;
        result.m[1][0] = s;
        result.m[1][1] = c;
        result
    }
}

impl Add for Mat4 {
    type Output = Mat4;
    fn add(self, other: Mat4) -> Mat4 {
        let mut result = Mat4::zero();
        for row in 0..4 {
            for col in 0..4 {
                result.m[row][col] = self.m[row][col] + other.m[row][col];
            }
        }
        result
    }
}

impl Sub for Mat4 {
    type Output = Mat4;
    fn sub(self, other: Mat4) -> Mat4 {
        let mut result = Mat4::zero();
        for row in 0..4 {
            for col in 0..4 {
                result.m[row][col] = self.m[row][col] - other.m[row][col];
            }
        }
        result
    }
}

impl Mul for Mat4 {
    type Output = Mat4;

    /// Standard matrix product: associative, not commutative
    fn mul(self, other: Mat4) -> Mat4 {
        let mut result = Mat4::zero();
        for row in 0..4 {
            for col in 0..4 {
                let mut sum = Fixed::ZERO;
                for k in 0..4 {
                    sum = sum + self.m[row][k] * other.m[k][col];
                }
                result.m[row][col] = sum;
            }
        }
        result
    }
}

impl fmt::Display for Mat4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..4 {
            write!(f, "[")?;
            for col in 0..4 {
                write!(f, "{:8.4}", self.m[row][col].to_f32())?;
                if col < 3 {
                    write!(f, ", ")?;
                }
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        let m = Mat4::identity();
        assert!(m.is_identity());
        assert_eq!(m.get(0, 0), Fixed::ONE);
        assert_eq!(m.get(0, 1), Fixed::ZERO);
        assert_eq!(m.get(3, 3), Fixed::ONE);
    }

    #[test]
    fn test_get_set_bounds() {
        let mut m = Mat4::zero();
        m.set(1, 2, Fixed::from_int(7));
        assert_eq!(m.get(1, 2), Fixed::from_int(7));

        // Out-of-range writes are ignored, reads return zero
        m.set(4, 0, Fixed::ONE);
        m.set(0, 17, Fixed::ONE);
        assert_eq!(m.get(4, 0), Fixed::ZERO);
        assert_eq!(m.get(0, 17), Fixed::ZERO);
        assert!(m.equals(&{
            let mut expected = Mat4::zero();
            expected.set(1, 2, Fixed::from_int(7));
            expected
        }));
    }

    #[test]
    fn test_add_sub_scale() {
        let a = Mat4::identity();
        let b = Mat4::identity();
        let sum = a + b;
        assert_eq!(sum.get(0, 0), Fixed::from_int(2));
        assert_eq!((sum - b).get(0, 0), Fixed::ONE);
        assert_eq!(a.scale(Fixed::from_int(3)).get(2, 2), Fixed::from_int(3));
    }

    #[test]
    fn test_mul_identity() {
        let trig = TrigTable::new();
        let a = Mat4::rotation_z(&trig, 32) * Mat4::translation(
            Fixed::from_int(1),
            Fixed::from_int(2),
            Fixed::from_int(3),
        );
        let i = Mat4::identity();
        assert!((a * i).equals(&a));
        assert!((i * a).equals(&a));
    }

    #[test]
    fn test_mul_not_commutative() {
        let t = Mat4::translation(Fixed::from_int(5), Fixed::ZERO, Fixed::ZERO);
        let trig = TrigTable::new();
        let r = Mat4::rotation_z(&trig, 64);
        let tr = t * r;
        let rt = r * t;
        assert!(!tr.equals(&rt));
    }

    #[test]
    fn test_translation_point_vs_direction() {
        let t = Mat4::translation(Fixed::from_int(10), Fixed::from_int(-2), Fixed::from_int(4));

        let point = Vec4::from_int(1, 1, 1, 1);
        let moved = t.mul_vec4(point);
        assert_eq!(moved.x, Fixed::from_int(11));
        assert_eq!(moved.y, Fixed::from_int(-1));
        assert_eq!(moved.z, Fixed::from_int(5));

        let direction = Vec4::from_int(1, 1, 1, 0);
        let unmoved = t.mul_vec4(direction);
        assert_eq!(unmoved.x, Fixed::ONE);
        assert_eq!(unmoved.y, Fixed::ONE);
        assert_eq!(unmoved.z, Fixed::ONE);
    }

    #[test]
    fn test_mul_vec3_is_point_transform() {
        let t = Mat4::translation(Fixed::from_int(1), Fixed::from_int(2), Fixed::from_int(3));
        let v = Vec3::from_int(1, 0, 0);
        assert_eq!(t.mul_vec3(v), Vec3::from_int(2, 2, 3));
    }

    #[test]
    fn test_scaling() {
        let s = Mat4::scaling(Fixed::from_int(2), Fixed::from_int(3), Fixed::from_int(4));
        let v = Vec3::from_int(1, 1, 1);
        assert_eq!(s.mul_vec3(v), Vec3::from_int(2, 3, 4));
    }

    #[test]
    fn test_rotation_z_quarter_turn() {
        let trig = TrigTable::new();
        // 64 angle units = 90 degrees: +X rotates onto +Y
        let r = Mat4::rotation_z(&trig, 64);
        let v = r.mul_vec3(Vec3::from_int(1, 0, 0));
        assert!((v.x).abs() <= Fixed::from_raw(5));
        assert!((v.y - Fixed::ONE).abs() <= Fixed::from_raw(5));
        assert_eq!(v.z, Fixed::ZERO);
    }

    #[test]
    fn test_rotation_x_quarter_turn() {
        let trig = TrigTable::new();
        // +Y rotates onto +Z
        let r = Mat4::rotation_x(&trig, 64);
        let v = r.mul_vec3(Vec3::from_int(0, 1, 0));
        assert!((v.y).abs() <= Fixed::from_raw(5));
        assert!((v.z - Fixed::ONE).abs() <= Fixed::from_raw(5));
    }

    #[test]
    fn test_rotation_y_quarter_turn() {
        let trig = TrigTable::new();
        // +Z rotates onto +X
        let r = Mat4::rotation_y(&trig, 64);
        let v = r.mul_vec3(Vec3::from_int(0, 0, 1));
        assert!((v.z).abs() <= Fixed::from_raw(5));
        assert!((v.x - Fixed::ONE).abs() <= Fixed::from_raw(5));
    }

    #[test]
    fn test_rotation_full_turn_is_identity() {
        let trig = TrigTable::new();
        // Four quarter turns compose back to the identity
        let q = Mat4::rotation_z(&trig, 64);
        let full = q * q * q * q;
        assert!(full.is_identity());
    }

    #[test]
    fn test_display() {
        let text = Mat4::identity().to_string();
        assert!(text.contains("1.0000"));
        assert_eq!(text.lines().count(), 4);
    }
}

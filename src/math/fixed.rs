//! 16.16 fixed-point number system
//!
//! A signed 32-bit integer with 16 integer bits and 16 fractional bits.
//! Range -32768.0 to +32767.99998474121094, precision 1/65536.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// Number of fractional bits
pub const FIXED_SHIFT: u32 = 16;

/// Mask for the fractional part
pub const FIXED_FRAC_MASK: i32 = 0xFFFF;

/// 16.16 fixed-point scalar
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Fixed(i32);

impl Fixed {
    pub const ZERO: Fixed = Fixed(0);
    pub const HALF: Fixed = Fixed(1 << 15);
    pub const ONE: Fixed = Fixed(1 << 16);
    /// Pi, rounded to the nearest representable value
    pub const PI: Fixed = Fixed(205_887);
    /// Sentinel returned by division when the divisor is zero
    pub const DIV_ZERO: Fixed = Fixed(0x7FFF_FFFF);

    /// Build from raw 16.16 bits
    pub const fn from_raw(bits: i32) -> Self {
        Fixed(bits)
    }

    /// Raw 16.16 bits
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Convert an integer, saturating to the representable range
    /// (-32768..=32767) instead of wrapping into the wrong sign.
    pub fn from_int(n: i32) -> Self {
        Fixed(n.clamp(-32768, 32767) << FIXED_SHIFT)
    }

    /// Integer part, truncated toward zero
    pub fn to_int(self) -> i32 {
        self.0 / (1 << FIXED_SHIFT)
    }

    /// Convert a float, rounding to nearest (ties away from zero).
    /// For offline table generation and tests; not for the hot path.
    pub fn from_f32(f: f32) -> Self {
        let scaled = f * (1 << FIXED_SHIFT) as f32;
        Fixed((scaled + if f >= 0.0 { 0.5 } else { -0.5 }) as i32)
    }

    /// Convert to float. For table generation and tests only.
    pub fn to_f32(self) -> f32 {
        self.0 as f32 / (1 << FIXED_SHIFT) as f32
    }

    /// Absolute value
    pub fn abs(self) -> Self {
        Fixed(self.0.wrapping_abs())
    }

    /// Sign as -1, 0 or 1
    pub fn sign(self) -> i32 {
        self.0.signum()
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Integer square root via Newton's method.
    ///
    /// Negative input returns 0 (saturating, not an error); 0 and 1.0 are
    /// returned unchanged. Otherwise runs a fixed 6 iterations of
    /// `guess = (guess + x/guess) / 2` seeded with `x >> 1`. The fixed
    /// iteration count keeps the result bit-reproducible and bounded-time.
    pub fn sqrt(self) -> Self {
        if self.0 < 0 {
            return Fixed::ZERO;
        }
        if self == Fixed::ZERO || self == Fixed::ONE {
            return self;
        }

        let mut guess = Fixed(self.0 >> 1);
        for _ in 0..6 {
            guess = Fixed((guess.0.wrapping_add((self / guess).0)) >> 1);
        }

        guess
    }
}

impl Add for Fixed {
    type Output = Fixed;
    fn add(self, other: Fixed) -> Fixed {
        // Same scale on both sides, so plain integer addition
        Fixed(self.0.wrapping_add(other.0))
    }
}

impl Sub for Fixed {
    type Output = Fixed;
    fn sub(self, other: Fixed) -> Fixed {
        Fixed(self.0.wrapping_sub(other.0))
    }
}

impl Neg for Fixed {
    type Output = Fixed;
    fn neg(self) -> Fixed {
        Fixed(self.0.wrapping_neg())
    }
}

impl Mul for Fixed {
    type Output = Fixed;

    /// Widen to 64 bits, multiply, shift back to the 16.16 scale.
    /// Results outside the representable range wrap via the 32-bit
    /// truncation of the shifted product; this is documented behavior,
    /// not an error path.
    fn mul(self, other: Fixed) -> Fixed {
        let product = (self.0 as i64) * (other.0 as i64);
        Fixed((product >> FIXED_SHIFT) as i32)
    }
}

impl Div for Fixed {
    type Output = Fixed;

    /// Widened division preserving fractional precision, truncating
    /// toward zero. Division by zero returns `Fixed::DIV_ZERO`.
    fn div(self, other: Fixed) -> Fixed {
        if other.0 == 0 {
            return Fixed::DIV_ZERO;
        }
        let quotient = ((self.0 as i64) << FIXED_SHIFT) / (other.0 as i64);
        Fixed(quotient as i32)
    }
}

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_f32().fmt(f)
    }
}

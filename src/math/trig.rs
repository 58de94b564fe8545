//! Trigonometric lookup tables
//!
//! Angles are 8-bit: 256 steps per full turn (64 = 90 degrees), so angle
//! arithmetic wraps by construction of the storage width. Tables are
//! generated once with float math; all lookups afterwards are pure
//! fixed-point.

use super::fixed::Fixed;

/// 8-bit wrapping angle: 256 steps per full turn
pub type Angle = u8;

/// Entries per table, one per representable angle
pub const TRIG_TABLE_SIZE: usize = 256;

/// Sentinel stored for tangent at its singularities (90 and 270 degrees)
pub const TAN_INVALID: Fixed = Fixed::from_raw(0x7FFF_FFFF);

/// Cosine magnitude below which tangent is treated as singular
const TAN_COS_EPSILON: f32 = 0.0001;

/// Sine and tangent lookup tables.
///
/// Starts zeroed; `init` populates it. Lookups on a zeroed table return
/// fixed-point zero (a caller contract, not a runtime check). Once
/// initialized the table is read-only.
pub struct TrigTable {
    sine: [Fixed; TRIG_TABLE_SIZE],
    tangent: [Fixed; TRIG_TABLE_SIZE],
}

impl TrigTable {
    /// Zeroed, uninitialized table
    pub const fn empty() -> Self {
        Self {
            sine: [Fixed::ZERO; TRIG_TABLE_SIZE],
            tangent: [Fixed::ZERO; TRIG_TABLE_SIZE],
        }
    }

    /// Populate the tables. Float math is confined to this one-time pass.
    pub fn init(&mut self) {
        let step = std::f32::consts::TAU / TRIG_TABLE_SIZE as f32;

        for i in 0..TRIG_TABLE_SIZE {
            let radians = i as f32 * step;
            self.sine[i] = Fixed::from_f32(radians.sin());

            self.tangent[i] = encode_tangent(radians.sin(), radians.cos());
        }
    }

    /// Zeroed-then-initialized table in one step
    pub fn new() -> Self {
        let mut table = Self::empty();
        table.init();
        table
    }

    /// Sine of an 8-bit angle (direct lookup)
    pub fn sine(&self, angle: Angle) -> Fixed {
        self.sine[angle as usize]
    }

    /// Cosine of an 8-bit angle: sine shifted a quarter turn
    pub fn cosine(&self, angle: Angle) -> Fixed {
        self.sine[angle.wrapping_add(64) as usize]
    }

    /// Tangent of an 8-bit angle; `TAN_INVALID` at the singularities
    pub fn tangent(&self, angle: Angle) -> Fixed {
        self.tangent[angle as usize]
    }

    /// Read-only view of the sine table, for inspection and tests
    pub fn sine_table(&self) -> &[Fixed; TRIG_TABLE_SIZE] {
        &self.sine
    }

    /// Read-only view of the tangent table, for inspection and tests
    pub fn tangent_table(&self) -> &[Fixed; TRIG_TABLE_SIZE] {
        &self.tangent
    }
}

/// Encode a sin/cos pair as a tangent table entry: the invalid sentinel
/// near the singularities, otherwise the ratio saturated to one raw unit
/// below the sentinel so a merely-huge tangent never reads as invalid.
fn encode_tangent(sin: f32, cos: f32) -> Fixed {
    if cos.abs() < TAN_COS_EPSILON {
        // Near 90/270 degrees the ratio has no usable value
        return TAN_INVALID;
    }
    Fixed::from_f32(sin / cos).min(Fixed::from_raw(i32::MAX - 1))
}

impl Default for TrigTable {
    fn default() -> Self {
        Self::new()
    }
}

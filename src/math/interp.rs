//! Interpolation helpers and inverse-cosine approximations
//!
//! Two arccos strategies coexist: a coarse 13-entry table with linear
//! interpolation (degree output) and a dense scan of the 256-entry cosine
//! table (angle-unit output). They do not agree bit-for-bit; the table
//! scan is the canonical one for pipeline use.

use super::fixed::Fixed;
use super::trig::{Angle, TrigTable};

/// Linear interpolation between a and b; t is clamped to [0, 1]
pub fn linear_interp(a: Fixed, b: Fixed, t: Fixed) -> Fixed {
    let t = t.clamp(Fixed::ZERO, Fixed::ONE);
    a + t * (b - a)
}

/// Cosine values at 15-degree steps from 0 to 180 degrees
const ARCCOS_TABLE: [Fixed; 13] = [
    Fixed::from_raw(65536),
    Fixed::from_raw(63303),
    Fixed::from_raw(56756),
    Fixed::from_raw(46341),
    Fixed::from_raw(32768),
    Fixed::from_raw(16962),
    Fixed::from_raw(0),
    Fixed::from_raw(-16962),
    Fixed::from_raw(-32768),
    Fixed::from_raw(-46341),
    Fixed::from_raw(-56756),
    Fixed::from_raw(-63303),
    Fixed::from_raw(-65536),
];

/// Degrees between adjacent table entries
const ARCCOS_STEP_DEGREES: Fixed = Fixed::from_raw(15 << 16);

/// Coarse arccos: bracket x in the 13-entry cosine table and interpolate
/// linearly between the bracketing angles. Returns degrees (0 to 180).
///
/// Inputs outside [-1, 1] return 0.
pub fn arccos_interp(x: Fixed) -> Fixed {
    if x > Fixed::ONE || x < -Fixed::ONE {
        return Fixed::ZERO;
    }
    if x == Fixed::ONE {
        return Fixed::ZERO;
    }
    if x == Fixed::ZERO {
        return Fixed::from_int(90);
    }
    if x == -Fixed::ONE {
        return Fixed::from_int(180);
    }

    // Cosine decreases over the table, so find the first entry below x
    for i in 0..ARCCOS_TABLE.len() - 1 {
        let upper = ARCCOS_TABLE[i];
        let lower = ARCCOS_TABLE[i + 1];
        if x <= upper && x >= lower {
            let base = ARCCOS_STEP_DEGREES * Fixed::from_int(i as i32);
            let fraction = (upper - x) / (upper - lower);
            return base + ARCCOS_STEP_DEGREES * fraction;
        }
    }

    Fixed::ZERO
}

/// Dense arccos: scan the 256-entry cosine table (angles 0..=128, covering
/// 0 to 180 degrees) for the closest match. Returns an 8-bit angle unit.
///
/// Inputs outside [-1, 1] return 0.
pub fn arccos_scan(trig: &TrigTable, x: Fixed) -> Angle {
    if x > Fixed::ONE || x < -Fixed::ONE {
        return 0;
    }
    if x == Fixed::ONE {
        return 0;
    }
    if x == Fixed::ZERO {
        return 64;
    }
    if x == -Fixed::ONE {
        return 128;
    }

    let mut best_angle: Angle = 0;
    let mut best_distance = Fixed::DIV_ZERO;
    for angle in 0..=128u8 {
        let distance = (trig.cosine(angle) - x).abs();
        if distance < best_distance {
            best_distance = distance;
            best_angle = angle;
        }
    }

    best_angle
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_interp_endpoints() {
        let a = Fixed::from_int(10);
        let b = Fixed::from_int(20);
        assert_eq!(linear_interp(a, b, Fixed::ZERO), a);
        assert_eq!(linear_interp(a, b, Fixed::ONE), b);
        assert_eq!(linear_interp(a, b, Fixed::HALF), Fixed::from_int(15));
    }

    #[test]
    fn test_linear_interp_clamps_t() {
        let a = Fixed::from_int(10);
        let b = Fixed::from_int(20);
        assert_eq!(linear_interp(a, b, Fixed::from_int(5)), b);
        assert_eq!(linear_interp(a, b, Fixed::from_int(-5)), a);
    }

    #[test]
    fn test_arccos_interp_special_cases() {
        assert_eq!(arccos_interp(Fixed::ONE), Fixed::ZERO);
        assert_eq!(arccos_interp(Fixed::ZERO), Fixed::from_int(90));
        assert_eq!(arccos_interp(-Fixed::ONE), Fixed::from_int(180));
    }

    #[test]
    fn test_arccos_interp_out_of_range() {
        assert_eq!(arccos_interp(Fixed::from_int(2)), Fixed::ZERO);
        assert_eq!(arccos_interp(Fixed::from_int(-2)), Fixed::ZERO);
    }

    #[test]
    fn test_arccos_interp_table_entries() {
        // Table entries land exactly on their angle
        assert_eq!(arccos_interp(Fixed::HALF), Fixed::from_int(60));
        assert_eq!(arccos_interp(-Fixed::HALF), Fixed::from_int(120));
    }

    #[test]
    fn test_arccos_interp_between_entries() {
        // arccos(0.7) is 45.57 degrees; the coarse table gives ~45.5
        let angle = arccos_interp(Fixed::from_f32(0.7));
        assert!((angle.to_f32() - 45.57).abs() < 0.5);
    }

    #[test]
    fn test_arccos_scan_special_cases() {
        let trig = TrigTable::new();
        assert_eq!(arccos_scan(&trig, Fixed::ONE), 0);
        assert_eq!(arccos_scan(&trig, Fixed::ZERO), 64);
        assert_eq!(arccos_scan(&trig, -Fixed::ONE), 128);
        assert_eq!(arccos_scan(&trig, Fixed::from_int(3)), 0);
    }

    #[test]
    fn test_arccos_scan_nearest_entry() {
        let trig = TrigTable::new();
        // 60 degrees is 42.67 angle units; the closest table cosine to
        // 0.5 sits at 43
        assert_eq!(arccos_scan(&trig, Fixed::HALF), 43);
    }

    #[test]
    fn test_arccos_strategies_roughly_agree() {
        let trig = TrigTable::new();
        for x in [-0.9f32, -0.3, 0.2, 0.8] {
            let degrees = arccos_interp(Fixed::from_f32(x)).to_f32();
            let units = arccos_scan(&trig, Fixed::from_f32(x)) as f32;
            let scan_degrees = units * 360.0 / 256.0;
            assert!(
                (degrees - scan_degrees).abs() < 2.0,
                "strategies diverged at {}: {} vs {}",
                x,
                degrees,
                scan_degrees
            );
        }
    }
}

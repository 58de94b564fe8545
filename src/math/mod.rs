//! Fixed-point math for 3D rendering
//!
//! Everything here is built on the 16.16 fixed-point scalar; no
//! floating-point is used outside table generation and conversions.

mod fixed;
mod interp;
mod matrix;
mod trig;
mod vector;

pub use fixed::*;
pub use interp::*;
pub use matrix::*;
pub use trig::*;
pub use vector::*;

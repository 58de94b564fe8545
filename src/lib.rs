//! Dusty Engine: DOS-era fixed-point software 3D engine core
//!
//! Deterministic 3D math for machines without an FPU:
//! - 16.16 fixed-point arithmetic (no floats on the hot path)
//! - Angle-indexed sine/cosine/tangent lookup tables (256 steps per turn)
//! - 2D/3D/4D vector and 4x4 matrix algebra
//! - Vertex/triangle transform stage with back-face classification

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod math;
pub mod pipeline;
pub mod services;

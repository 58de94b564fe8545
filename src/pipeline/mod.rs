//! Vertex/triangle transform stage
//!
//! Applies the fixed-point math primitives to model data: positions with
//! attached normals/colors/texture coordinates, face normals from winding
//! order, and camera-facing classification in view space.

mod triangle;
mod types;
mod vertex;

pub use triangle::*;
pub use types::*;
pub use vertex::*;

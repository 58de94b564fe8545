//! Platform service objects consumed by the game loop
//!
//! The math core itself never touches these; they replace the interrupt
//! handlers of the original hardware with explicit, injectable polled
//! state.

mod input;
mod timing;

pub use input::*;
pub use timing::*;

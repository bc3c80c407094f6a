//! Core grid types shared by the navigator and the simulation harness.

mod coord;
mod direction;

pub use coord::GridCoord;
pub use direction::Direction;

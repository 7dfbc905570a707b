//! Geometry types shared by the window core
//!
//! - [`Vec2`]: positions, pointer coordinates and deltas
//! - [`Size`]: window dimensions

mod size;
mod vec2;

pub use size::Size;
pub use vec2::Vec2;

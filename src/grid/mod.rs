//! Coordinate handling: axis construction and normalization to a canonical grid.

pub mod axis;
pub mod normalize;

pub use axis::*;
pub use normalize::*;

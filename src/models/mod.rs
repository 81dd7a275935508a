//! Sinusoidal spatiotemporal model family.
//!
//! Evaluators are small, pure functions over coordinate matrices; the dispatcher
//! picks one from an explicit selector or the parameter vector length.

pub mod dispatch;
pub mod model;

pub use dispatch::*;
pub use model::*;

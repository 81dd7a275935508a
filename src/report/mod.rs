//! Terminal formatting for evaluated fields and dispersion weights.

pub mod format;

pub use format::*;

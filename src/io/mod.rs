//! Input/output helpers.
//!
//! - parameter set JSON loading (`params`)
//! - field exports (CSV/JSON) (`field`)

pub mod field;
pub mod params;

pub use field::*;
pub use params::*;

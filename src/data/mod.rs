//! Synthetic observation data for exercising a fitting driver.

pub mod sample;

pub use sample::*;

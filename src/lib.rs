//! `wavefield` library crate.
//!
//! Closed-form sinusoidal spatiotemporal models and dispersion weighting.
//!
//! The binary (`wf`) is a thin wrapper around this library so that:
//!
//! - core evaluation is testable without spawning processes
//! - a fitting driver can call the engine directly as its forward model

pub mod app;
pub mod cli;
pub mod compose;
pub mod data;
pub mod dispersion;
pub mod domain;
pub mod error;
pub mod grid;
pub mod io;
pub mod models;
pub mod report;

pub use compose::{DispersionWeight, apply_dispersion};
pub use dispersion::dispersion;
pub use domain::{CanonicalGrid, Coordinates, DispersionKind, Field, Hyperparams, ModelKind};
pub use error::ModelError;
pub use grid::normalize_coordinates;
pub use models::{evaluate, evaluate_expanded, evaluate_reduced, evaluate_simple};

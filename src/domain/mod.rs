//! Domain types shared by the engine and the CLI.
//!
//! This module defines:
//!
//! - model variant enums (`ModelKind`, `VariantSelector`)
//! - dispersion naming and hyperparameters (`DispersionKind`, `Hyperparams`, `WeightAxis`)
//! - coordinate representations (`AxisInput`, `CanonicalGrid`, `Coordinates`)
//! - run configuration (`ParameterSet`, `EvalConfig`, `DispersionSpec`)

pub mod types;

pub use types::*;

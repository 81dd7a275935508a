//! Dispersion (amplitude weighting) library.
//!
//! Weights are computed independently of the model and combined with a field by
//! elementwise multiplication (see [`crate::compose`]).
//!
//! - univariate kinds: one weight per coordinate value, any input shape
//! - bivariate kinds: one weight per `(x, t)` pair, input `[N, 2]`, output `[N, 1]`

pub mod bivariate;
pub mod univariate;

use nalgebra::DMatrix;

use crate::compose::DispersionWeight;
use crate::domain::{CanonicalGrid, DispersionKind, Hyperparams, WeightAxis};
use crate::error::ModelError;
use crate::grid::check_paired;

pub use bivariate::Bivariate;
pub use univariate::Univariate;

/// Name-keyed entry point: parse `kind` and compute weights over `coordinate`.
///
/// Fails with `UnknownDispersionKind` for unrecognised names.
pub fn dispersion(
    kind: &str,
    coordinate: &DMatrix<f64>,
    hyper: &Hyperparams,
) -> Result<DMatrix<f64>, ModelError> {
    weights(kind.parse()?, coordinate, hyper)
}

/// Compute weights for a known kind.
///
/// Univariate output has the shape of `coordinate`. Bivariate kinds require
/// `[N, 2]` pairs and return `[N, 1]`.
pub fn weights(
    kind: DispersionKind,
    coordinate: &DMatrix<f64>,
    hyper: &Hyperparams,
) -> Result<DMatrix<f64>, ModelError> {
    if let Some(f) = Univariate::resolve(kind, hyper)? {
        return Ok(coordinate.map(|mu| f.eval(mu)));
    }
    let Some(f) = Bivariate::resolve(kind, hyper)? else {
        return Err(ModelError::UnknownDispersionKind(kind.name().to_string()));
    };
    check_paired(coordinate)?;
    Ok(DMatrix::from_fn(coordinate.nrows(), 1, |i, _| {
        f.eval(coordinate[(i, 0)], coordinate[(i, 1)])
    }))
}

/// Univariate weights along one axis, oriented for broadcasting.
///
/// `WeightAxis::X` yields a row weight (one per column), `WeightAxis::T` a column
/// weight (one per row). Bivariate kinds and `WeightAxis::Xt` are rejected; use
/// [`grid_weight`] for those.
pub fn axis_weight(
    kind: DispersionKind,
    values: &[f64],
    axis: WeightAxis,
    hyper: &Hyperparams,
) -> Result<DispersionWeight, ModelError> {
    let Some(f) = Univariate::resolve(kind, hyper)? else {
        return Err(ModelError::shape(format!(
            "bivariate kind '{kind}' needs (x, t) pairs, not a single axis"
        )));
    };
    let w: Vec<f64> = values.iter().map(|&mu| f.eval(mu)).collect();
    match axis {
        WeightAxis::X => Ok(DispersionWeight::Row(w)),
        WeightAxis::T => Ok(DispersionWeight::Column(w)),
        WeightAxis::Xt => Err(ModelError::shape(format!(
            "univariate kind '{kind}' weights a single axis (x or t)"
        ))),
    }
}

/// Weights at every point of a grid, matching the field shape exactly.
///
/// Bivariate kinds use both coordinates; univariate kinds are rejected because
/// their axis would be ambiguous.
pub fn grid_weight(
    kind: DispersionKind,
    grid: &CanonicalGrid,
    hyper: &Hyperparams,
) -> Result<DispersionWeight, ModelError> {
    let Some(f) = Bivariate::resolve(kind, hyper)? else {
        // Surface a missing scalar before the axis complaint.
        Univariate::resolve(kind, hyper)?;
        return Err(ModelError::shape(format!(
            "univariate kind '{kind}' weights a single axis (x or t)"
        )));
    };
    Ok(DispersionWeight::Field(grid.x().zip_map(grid.t(), |x, t| f.eval(x, t))))
}

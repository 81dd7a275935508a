//! Coordinate normalization.
//!
//! Two accepted input forms are unified into a [`CanonicalGrid`]:
//!
//! - two axis vectors: gridded by outer product (`meshgrid`)
//! - two congruent matrices: passed through unchanged
//!
//! Paired `[N, 2]` samples never go through here; evaluators consume them directly
//! and no gridding is performed on them.

use nalgebra::DMatrix;

use crate::domain::{AxisInput, CanonicalGrid};
use crate::error::ModelError;
use crate::grid::meshgrid;

/// Normalize coordinate inputs into a canonical grid.
///
/// Grid inputs are trusted to follow the row = time, column = space layout.
pub fn normalize_coordinates(
    x: impl Into<AxisInput>,
    t: impl Into<AxisInput>,
) -> Result<CanonicalGrid, ModelError> {
    match (x.into(), t.into()) {
        (AxisInput::Vector(x), AxisInput::Vector(t)) => Ok(meshgrid(&x, &t)),
        (AxisInput::Grid(x), AxisInput::Grid(t)) => {
            if x.shape() != t.shape() {
                return Err(ModelError::shape(format!(
                    "coordinate grids are not congruent: x is {:?}, t is {:?}",
                    x.shape(),
                    t.shape()
                )));
            }
            CanonicalGrid::new(x, t)
        }
        (AxisInput::Vector(x), AxisInput::Grid(t)) => Err(ModelError::shape(format!(
            "cannot mix an axis vector (len {}) with a grid {:?}",
            x.len(),
            t.shape()
        ))),
        (AxisInput::Grid(x), AxisInput::Vector(t)) => Err(ModelError::shape(format!(
            "cannot mix a grid {:?} with an axis vector (len {})",
            x.shape(),
            t.len()
        ))),
    }
}

/// Stack equal-length `x` and `t` samples into an `[N, 2]` paired matrix.
pub fn pair_samples(x: &[f64], t: &[f64]) -> Result<DMatrix<f64>, ModelError> {
    if x.len() != t.len() {
        return Err(ModelError::shape(format!(
            "paired samples need equal lengths: x has {}, t has {}",
            x.len(),
            t.len()
        )));
    }
    Ok(DMatrix::from_fn(x.len(), 2, |i, j| if j == 0 { x[i] } else { t[i] }))
}

/// Validate an `[N, 2]` paired coordinate matrix.
pub fn check_paired(xt: &DMatrix<f64>) -> Result<(), ModelError> {
    if xt.ncols() != 2 {
        return Err(ModelError::shape(format!(
            "paired coordinates must be [N, 2], got {:?}",
            xt.shape()
        )));
    }
    Ok(())
}

/// Flatten a grid into `[N, 2]` pairs in column-major order.
///
/// `DMatrix::from_column_slice(rows, cols, ..)` on the evaluated column restores
/// the grid layout.
pub fn grid_to_paired(grid: &CanonicalGrid) -> DMatrix<f64> {
    let n = grid.x().len();
    let mut out = DMatrix::zeros(n, 2);
    for (i, (&x, &t)) in grid.x().iter().zip(grid.t().iter()).enumerate() {
        out[(i, 0)] = x;
        out[(i, 1)] = t;
    }
    out
}

/// View the columns of a paired matrix as an `[N, 1]` grid.
pub fn paired_to_grid(xt: &DMatrix<f64>) -> Result<CanonicalGrid, ModelError> {
    check_paired(xt)?;
    CanonicalGrid::new(xt.columns(0, 1).into_owned(), xt.columns(1, 1).into_owned())
}

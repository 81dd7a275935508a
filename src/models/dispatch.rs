//! Variant selection and delegation.
//!
//! An explicit variant is the primary path: the parameter count is validated
//! against that variant only. Without one, the variant is inferred from the
//! parameter count (5 → simple, 8 → reduced, 9 → expanded) with the same
//! validation.

use nalgebra::DMatrix;
use tracing::debug;

use crate::domain::{Coordinates, Field, ModelKind};
use crate::error::ModelError;
use crate::grid::{grid_to_paired, paired_to_grid};
use crate::models::{check_param_count, evaluate_expanded, evaluate_reduced, evaluate_simple};

/// Decide which variant a parameter vector is evaluated with.
pub fn resolve_variant(
    params: &[f64],
    variant: Option<ModelKind>,
) -> Result<ModelKind, ModelError> {
    match variant {
        Some(kind) => {
            check_param_count(kind, params)?;
            Ok(kind)
        }
        None => ModelKind::from_param_count(params.len()).ok_or_else(|| ModelError::ParameterCount {
            context: "inferred model".to_string(),
            expected: ModelKind::ALL.iter().map(|k| k.param_count()).collect(),
            actual: params.len(),
        }),
    }
}

/// Evaluate `params` over `coords`, selecting the variant explicitly or by length.
///
/// Grid coordinates yield a field of the grid's shape; paired coordinates yield
/// an `[N, 1]` column.
pub fn evaluate(
    params: &[f64],
    coords: &Coordinates,
    variant: Option<ModelKind>,
) -> Result<Field, ModelError> {
    let kind = resolve_variant(params, variant)?;
    debug!(
        model = kind.display_name(),
        explicit = variant.is_some(),
        points = coords.len(),
        "evaluating model"
    );

    let field = match (kind, coords) {
        (ModelKind::Simple, Coordinates::Grid(grid)) => {
            evaluate_simple(params, grid.x(), grid.t())?
        }
        (ModelKind::Reduced, Coordinates::Grid(grid)) => {
            evaluate_reduced(params, grid.x(), grid.t())?
        }
        (ModelKind::Simple, Coordinates::Paired(xt)) => {
            let grid = paired_to_grid(xt)?;
            evaluate_simple(params, grid.x(), grid.t())?
        }
        (ModelKind::Reduced, Coordinates::Paired(xt)) => {
            let grid = paired_to_grid(xt)?;
            evaluate_reduced(params, grid.x(), grid.t())?
        }
        (ModelKind::Expanded, Coordinates::Paired(xt)) => evaluate_expanded(params, xt)?,
        (ModelKind::Expanded, Coordinates::Grid(grid)) => {
            let (rows, cols) = grid.shape();
            let column = evaluate_expanded(params, &grid_to_paired(grid))?;
            DMatrix::from_column_slice(rows, cols, column.as_slice())
        }
    };

    debug!(shape = ?field.shape(), "model evaluated");
    Ok(field)
}

//! Combining dispersion weights with a model field.
//!
//! Weights multiply the field elementwise. Orientation is explicit:
//!
//! - `Row`: one weight per spatial column, repeated down every temporal row
//! - `Column`: one weight per temporal row, repeated across every spatial column
//! - `Field`: one weight per point; must match the field shape exactly

use nalgebra::DMatrix;

use crate::domain::Field;
use crate::error::ModelError;

/// A dispersion weight with its broadcasting orientation.
#[derive(Debug, Clone, PartialEq)]
pub enum DispersionWeight {
    /// Spatial-axis weight, length `nx`.
    Row(Vec<f64>),
    /// Temporal-axis weight, length `nt`.
    Column(Vec<f64>),
    /// Per-point weight, same shape as the field.
    Field(DMatrix<f64>),
}

impl DispersionWeight {
    /// Expand into a full matrix of shape `(rows, cols)`.
    pub fn broadcast(&self, rows: usize, cols: usize) -> Result<DMatrix<f64>, ModelError> {
        match self {
            DispersionWeight::Row(w) => {
                if w.len() != cols {
                    return Err(ModelError::shape(format!(
                        "row weight has {} entries but the field has {cols} columns",
                        w.len()
                    )));
                }
                Ok(DMatrix::from_fn(rows, cols, |_, j| w[j]))
            }
            DispersionWeight::Column(w) => {
                if w.len() != rows {
                    return Err(ModelError::shape(format!(
                        "column weight has {} entries but the field has {rows} rows",
                        w.len()
                    )));
                }
                Ok(DMatrix::from_fn(rows, cols, |i, _| w[i]))
            }
            DispersionWeight::Field(w) => {
                if w.shape() != (rows, cols) {
                    return Err(ModelError::shape(format!(
                        "field weight is {:?} but the field is {:?}",
                        w.shape(),
                        (rows, cols)
                    )));
                }
                Ok(w.clone())
            }
        }
    }
}

/// Multiply `field` by `weight` elementwise after broadcasting.
pub fn apply_dispersion(field: &Field, weight: &DispersionWeight) -> Result<Field, ModelError> {
    let (rows, cols) = field.shape();
    let w = weight.broadcast(rows, cols)?;
    Ok(field.component_mul(&w))
}

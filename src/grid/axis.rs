//! Axis helpers.
//!
//! Grids follow `meshgrid` semantics with the temporal axis as rows:
//! `X[i, j] = x[j]`, `T[i, j] = t[i]`.

use nalgebra::DMatrix;

use crate::domain::CanonicalGrid;
use crate::error::ModelError;

/// Generate `steps` evenly spaced points between `start` and `end` (inclusive).
pub fn linspace(start: f64, end: f64, steps: usize) -> Result<Vec<f64>, ModelError> {
    if !(start.is_finite() && end.is_finite()) {
        return Err(ModelError::shape(format!(
            "invalid axis range: start={start}, end={end} (must be finite)"
        )));
    }
    if steps < 2 {
        return Err(ModelError::shape("axis steps must be >= 2"));
    }

    let step = (end - start) / (steps as f64 - 1.0);
    let mut out: Vec<f64> = (0..steps).map(|i| start + step * i as f64).collect();
    // Pin the endpoint exactly; accumulated rounding can miss it by an ulp.
    out[steps - 1] = end;
    Ok(out)
}

/// Outer-product grid of shape `[t.len(), x.len()]`.
pub fn meshgrid(x: &[f64], t: &[f64]) -> CanonicalGrid {
    let (nt, nx) = (t.len(), x.len());
    let xg = DMatrix::from_fn(nt, nx, |_, j| x[j]);
    let tg = DMatrix::from_fn(nt, nx, |i, _| t[i]);
    CanonicalGrid::from_congruent(xg, tg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_includes_endpoints() {
        let v = linspace(-1.0, 3.0, 5).unwrap();
        assert_eq!(v, vec![-1.0, 0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn linspace_rejects_degenerate_requests() {
        assert!(linspace(0.0, 1.0, 1).is_err());
        assert!(linspace(f64::NAN, 1.0, 4).is_err());
    }

    #[test]
    fn meshgrid_puts_time_on_rows() {
        let grid = meshgrid(&[10.0, 20.0, 30.0], &[1.0, 2.0]);
        assert_eq!(grid.shape(), (2, 3));
        assert_eq!(grid.x()[(1, 2)], 30.0);
        assert_eq!(grid.t()[(1, 2)], 2.0);
        assert_eq!(grid.x()[(0, 0)], 10.0);
        assert_eq!(grid.t()[(0, 0)], 1.0);
    }
}

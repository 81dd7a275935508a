//! Closed-form evaluation for the simple / reduced / expanded variants.
//!
//! Each variant is a sinusoid `A * sin(phase(x, t)) + c`:
//!
//! - simple:   `phase = k*x + b*t + o`
//! - reduced:  `phase = (k0 + k1*x)*x + (b0 + b1*t)*t + mu*x*t + o`
//! - expanded: `phase = (k0 + k1*x + k2*t)*x + (b0 + b1*x + b2*t)*t + o`
//!
//! Parameter vector length is the only structural check; values are never
//! range-checked.

use nalgebra::DMatrix;
use rayon::prelude::*;

use crate::domain::{Field, ModelKind};
use crate::error::ModelError;
use crate::grid::check_paired;

/// Point count at which elementwise evaluation switches to rayon.
pub const PAR_THRESHOLD: usize = 4096;

/// Evaluate a single point for the given model kind.
///
/// # Panics
/// Panics if `params` is shorter than `model.param_count()`. The public
/// evaluators check the length before calling this.
pub fn predict(model: ModelKind, x: f64, t: f64, params: &[f64]) -> f64 {
    match model {
        ModelKind::Simple => {
            let [a, k, b, o, c] = [params[0], params[1], params[2], params[3], params[4]];
            a * (k * x + b * t + o).sin() + c
        }
        ModelKind::Reduced => {
            let (a, k0, k1, b0, b1) = (params[0], params[1], params[2], params[3], params[4]);
            let (mu, o, c) = (params[5], params[6], params[7]);
            a * ((k0 + k1 * x) * x + (b0 + b1 * t) * t + mu * x * t + o).sin() + c
        }
        ModelKind::Expanded => {
            let (a, k0, k1, k2) = (params[0], params[1], params[2], params[3]);
            let (b0, b1, b2, o, c) = (params[4], params[5], params[6], params[7], params[8]);
            a * ((k0 + k1 * x + k2 * t) * x + (b0 + b1 * x + b2 * t) * t + o).sin() + c
        }
    }
}

/// Fail with `ParameterCount` unless `params` fits `model` exactly.
pub fn check_param_count(model: ModelKind, params: &[f64]) -> Result<(), ModelError> {
    if params.len() != model.param_count() {
        return Err(ModelError::ParameterCount {
            context: format!("{} model", model.display_name()),
            expected: vec![model.param_count()],
            actual: params.len(),
        });
    }
    Ok(())
}

/// `Y = A * sin(k*X + b*T + o) + c` over a grid; params `[A, k, b, o, c]`.
pub fn evaluate_simple(
    params: &[f64],
    x: &DMatrix<f64>,
    t: &DMatrix<f64>,
) -> Result<Field, ModelError> {
    check_param_count(ModelKind::Simple, params)?;
    evaluate_grid(ModelKind::Simple, params, x, t)
}

/// Reduced-dispersion model over a grid; params `[A, k0, k1, b0, b1, mu, o, c]`.
pub fn evaluate_reduced(
    params: &[f64],
    x: &DMatrix<f64>,
    t: &DMatrix<f64>,
) -> Result<Field, ModelError> {
    check_param_count(ModelKind::Reduced, params)?;
    evaluate_grid(ModelKind::Reduced, params, x, t)
}

/// Expanded-dispersion model over `[N, 2]` paired coordinates; output is `[N, 1]`.
///
/// Params `[A, k0, k1, k2, b0, b1, b2, o, c]`. No gridding is performed.
pub fn evaluate_expanded(params: &[f64], xt: &DMatrix<f64>) -> Result<Field, ModelError> {
    check_param_count(ModelKind::Expanded, params)?;
    check_paired(xt)?;

    // Column-major storage: column 0 is the first `n` entries, column 1 the next `n`.
    let n = xt.nrows();
    let (xs, ts) = xt.as_slice().split_at(n);
    let values = map_points(ModelKind::Expanded, params, xs, ts);
    Ok(DMatrix::from_vec(n, 1, values))
}

/// Shared grid path for any variant (length already checked by the caller).
pub(crate) fn evaluate_grid(
    model: ModelKind,
    params: &[f64],
    x: &DMatrix<f64>,
    t: &DMatrix<f64>,
) -> Result<Field, ModelError> {
    if x.shape() != t.shape() {
        return Err(ModelError::shape(format!(
            "x grid {:?} and t grid {:?} differ in shape",
            x.shape(),
            t.shape()
        )));
    }
    let (rows, cols) = x.shape();
    let values = map_points(model, params, x.as_slice(), t.as_slice());
    Ok(DMatrix::from_vec(rows, cols, values))
}

fn map_points(model: ModelKind, params: &[f64], xs: &[f64], ts: &[f64]) -> Vec<f64> {
    if xs.len() >= PAR_THRESHOLD {
        xs.par_iter()
            .zip(ts.par_iter())
            .map(|(&x, &t)| predict(model, x, t, params))
            .collect()
    } else {
        xs.iter()
            .zip(ts.iter())
            .map(|(&x, &t)| predict(model, x, t, params))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_4, PI};

    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::grid::{linspace, meshgrid, normalize_coordinates, pair_samples};

    #[test]
    fn simple_matches_closed_form_on_two_by_two() {
        let params = [2.0, 1.5, 2.0, FRAC_PI_4, 0.5];
        let grid = normalize_coordinates(vec![0.0, 1.0], vec![0.0, 1.0]).unwrap();
        let y = evaluate_simple(&params, grid.x(), grid.t()).unwrap();

        assert_eq!(y.shape(), (2, 2));
        let x = [0.0, 1.0];
        let t = [0.0, 1.0];
        for i in 0..2 {
            for j in 0..2 {
                let expected = 2.0 * (1.5 * x[j] + 2.0 * t[i] + FRAC_PI_4).sin() + 0.5;
                assert_relative_eq!(y[(i, j)], expected, epsilon = 1e-12);
            }
        }
        assert_relative_eq!(y[(0, 0)], 1.914, epsilon = 1e-3);
        assert_relative_eq!(y[(1, 1)], -1.3204, epsilon = 1e-4);
    }

    #[test]
    fn normalized_vectors_match_independent_meshgrid() {
        let x = linspace(-2.0, 3.0, 7).unwrap();
        let t = linspace(0.0, 1.0, 4).unwrap();
        let params = [1.3, 0.7, -2.1, 0.2, 0.05];

        let grid = normalize_coordinates(x.clone(), t.clone()).unwrap();
        assert_eq!(grid.shape(), (4, 7));

        let xg = DMatrix::from_fn(4, 7, |_, j| x[j]);
        let tg = DMatrix::from_fn(4, 7, |i, _| t[i]);
        let via_normalizer = evaluate_simple(&params, grid.x(), grid.t()).unwrap();
        let via_meshgrid = evaluate_simple(&params, &xg, &tg).unwrap();
        assert_eq!(via_normalizer, via_meshgrid);
    }

    #[test]
    fn reduced_collapses_to_simple_without_dispersion_terms() {
        let mut rng = StdRng::seed_from_u64(7);
        let grid = meshgrid(&linspace(-5.0, 5.0, 11).unwrap(), &linspace(0.0, 2.0, 6).unwrap());

        for _ in 0..50 {
            let [a, k, b, o, c]: [f64; 5] = std::array::from_fn(|_| rng.gen_range(-3.0..3.0));
            let simple = evaluate_simple(&[a, k, b, o, c], grid.x(), grid.t()).unwrap();
            let reduced =
                evaluate_reduced(&[a, k, 0.0, b, 0.0, 0.0, o, c], grid.x(), grid.t()).unwrap();
            for (s, r) in simple.iter().zip(reduced.iter()) {
                assert_relative_eq!(*s, *r, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn reduced_includes_quadratic_and_cross_terms() {
        let params = [1.0, 0.0, 1.0, 0.0, 0.5, 0.25, 0.0, 0.0];
        let x = DMatrix::from_element(1, 1, 2.0);
        let t = DMatrix::from_element(1, 1, 1.0);
        let y = evaluate_reduced(&params, &x, &t).unwrap();
        // phase = 1*4 + 0.5*1 + 0.25*2*1 = 5.0
        assert_relative_eq!(y[(0, 0)], 5.0_f64.sin(), epsilon = 1e-12);
    }

    #[test]
    fn expanded_returns_one_value_per_pair() {
        let params = [2.0, 1.0, 0.1, 0.2, 0.5, 0.3, 0.05, PI / 6.0, 1.0];
        let xt = pair_samples(&[0.0, 1.0, 2.0], &[0.0, 0.5, 1.0]).unwrap();
        let y = evaluate_expanded(&params, &xt).unwrap();

        assert_eq!(y.shape(), (3, 1));
        for i in 0..3 {
            let (x, t) = (xt[(i, 0)], xt[(i, 1)]);
            let phase = (1.0 + 0.1 * x + 0.2 * t) * x + (0.5 + 0.3 * x + 0.05 * t) * t + PI / 6.0;
            assert_relative_eq!(y[(i, 0)], 2.0 * phase.sin() + 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn expanded_rejects_non_paired_input() {
        let params = [1.0; 9];
        let err = evaluate_expanded(&params, &DMatrix::zeros(4, 3)).unwrap_err();
        assert!(matches!(err, ModelError::Shape(_)));
    }

    #[test]
    fn wrong_lengths_are_parameter_count_errors() {
        let grid = meshgrid(&[0.0, 1.0], &[0.0]);
        let err = evaluate_simple(&[1.0; 4], grid.x(), grid.t()).unwrap_err();
        assert!(matches!(err, ModelError::ParameterCount { actual: 4, .. }));
        let err = evaluate_reduced(&[1.0; 5], grid.x(), grid.t()).unwrap_err();
        assert!(matches!(err, ModelError::ParameterCount { actual: 5, .. }));
        let err = evaluate_expanded(&[1.0; 8], &DMatrix::zeros(2, 2)).unwrap_err();
        assert!(matches!(err, ModelError::ParameterCount { actual: 8, .. }));
    }

    #[test]
    fn parallel_path_matches_serial_predictions() {
        let grid = meshgrid(&linspace(0.0, 10.0, 128).unwrap(), &linspace(0.0, 5.0, 64).unwrap());
        assert!(grid.x().len() >= PAR_THRESHOLD);
        let params = [1.0, 0.3, 0.01, -0.4, 0.02, 0.005, 0.1, 0.0];
        let y = evaluate_reduced(&params, grid.x(), grid.t()).unwrap();
        for ((&x, &t), &v) in grid.x().iter().zip(grid.t().iter()).zip(y.iter()) {
            assert_eq!(v, predict(ModelKind::Reduced, x, t, &params));
        }
    }
}

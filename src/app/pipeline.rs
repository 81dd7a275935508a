//! Shared "eval pipeline": coordinates -> model field -> dispersion weighting.
//!
//! Keeping this separate from `app` lets the workflow be tested without any
//! printing or file output.

use tracing::debug;

use crate::compose::{DispersionWeight, apply_dispersion};
use crate::dispersion::{axis_weight, grid_weight, weights};
use crate::domain::{Coordinates, DispersionSpec, EvalConfig, Field, ModelKind, WeightAxis};
use crate::error::{AppError, ModelError};
use crate::grid::{normalize_coordinates, pair_samples};
use crate::models::{evaluate, resolve_variant};

/// All computed outputs of a single `wf eval` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub model: ModelKind,
    /// Model output after dispersion weighting, if any.
    pub field: Field,
}

/// Execute the evaluation pipeline and return the computed outputs.
pub fn run_eval(config: &EvalConfig) -> Result<RunOutput, AppError> {
    let coords = if config.paired {
        Coordinates::Paired(pair_samples(&config.x, &config.t)?)
    } else {
        Coordinates::Grid(normalize_coordinates(config.x.clone(), config.t.clone())?)
    };

    let model = resolve_variant(&config.params, config.selector.to_kind())?;
    let raw = evaluate(&config.params, &coords, Some(model))?;

    let Some(spec) = &config.dispersion else {
        return Ok(RunOutput { model, field: raw });
    };

    let weight = dispersion_weight(spec, config, &coords)?;
    let field = apply_dispersion(&raw, &weight)?;
    debug!(kind = spec.kind.name(), axis = ?spec.axis, "applied dispersion");

    Ok(RunOutput { model, field })
}

/// Build a weight oriented for the run's coordinates.
///
/// Paired runs produce one weight per sample (a column), whichever axis is used.
fn dispersion_weight(
    spec: &DispersionSpec,
    config: &EvalConfig,
    coords: &Coordinates,
) -> Result<DispersionWeight, ModelError> {
    let (kind, hyper) = (spec.kind, &spec.hyper);
    match (coords, spec.axis) {
        (Coordinates::Grid(_), WeightAxis::X) => axis_weight(kind, &config.x, WeightAxis::X, hyper),
        (Coordinates::Grid(_), WeightAxis::T) => axis_weight(kind, &config.t, WeightAxis::T, hyper),
        (Coordinates::Grid(grid), WeightAxis::Xt) => grid_weight(kind, grid, hyper),
        // One weight per sample row, so both single-axis cases use column orientation.
        (Coordinates::Paired(_), WeightAxis::X) => {
            axis_weight(kind, &config.x, WeightAxis::T, hyper)
        }
        (Coordinates::Paired(_), WeightAxis::T) => {
            axis_weight(kind, &config.t, WeightAxis::T, hyper)
        }
        (Coordinates::Paired(xt), WeightAxis::Xt) => {
            if !spec.kind.is_bivariate() {
                return Err(ModelError::shape(format!(
                    "univariate kind '{}' weights a single axis (x or t)",
                    spec.kind
                )));
            }
            Ok(DispersionWeight::Field(weights(spec.kind, xt, &spec.hyper)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::domain::{DispersionKind, Hyperparams, VariantSelector};

    fn config() -> EvalConfig {
        EvalConfig {
            selector: VariantSelector::Auto,
            params: vec![1.0, 0.0, 0.0, std::f64::consts::FRAC_PI_2, 0.0],
            x: vec![0.0, 1.0, 2.0, 5.0],
            t: vec![0.0, 1.0],
            paired: false,
            dispersion: None,
            precision: 4,
            export_csv: None,
            export_json: None,
        }
    }

    #[test]
    fn no_dispersion_returns_model_field() {
        let cfg = config();
        let run = run_eval(&cfg).unwrap();
        assert_eq!(run.model, ModelKind::Simple);
        assert_eq!(run.field.shape(), (2, 4));

        let grid = normalize_coordinates(cfg.x.clone(), cfg.t.clone()).unwrap();
        assert_eq!(run.field, evaluate(&cfg.params, &Coordinates::Grid(grid), None).unwrap());
    }

    #[test]
    fn spatial_weight_broadcasts_over_time() {
        // The model is constant 1.0, so the field equals the weight.
        let cfg = EvalConfig {
            dispersion: Some(DispersionSpec {
                kind: DispersionKind::Linear,
                axis: WeightAxis::X,
                hyper: Hyperparams::alpha(0.5),
            }),
            ..config()
        };
        let run = run_eval(&cfg).unwrap();
        for i in 0..2 {
            let row: Vec<f64> = run.field.row(i).iter().copied().collect();
            assert_eq!(row, vec![1.0, 0.5, 0.0, 0.0]);
        }
    }

    #[test]
    fn temporal_weight_broadcasts_over_space() {
        let cfg = EvalConfig {
            dispersion: Some(DispersionSpec {
                kind: DispersionKind::Exponential,
                axis: WeightAxis::T,
                hyper: Hyperparams::alpha(1.0),
            }),
            ..config()
        };
        let run = run_eval(&cfg).unwrap();
        for j in 0..4 {
            assert_relative_eq!(run.field[(0, j)], 1.0);
            assert_relative_eq!(run.field[(1, j)], (-1.0_f64).exp());
        }
    }

    #[test]
    fn bivariate_weight_on_pairs() {
        let cfg = EvalConfig {
            params: vec![1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, std::f64::consts::FRAC_PI_2, 0.0],
            x: vec![0.0, 1.0],
            t: vec![0.0, 1.0],
            paired: true,
            dispersion: Some(DispersionSpec {
                kind: DispersionKind::GaussianEnvelope,
                axis: WeightAxis::Xt,
                hyper: Hyperparams::default().with_sigma(1.0),
            }),
            ..config()
        };
        let run = run_eval(&cfg).unwrap();
        assert_eq!(run.model, ModelKind::Expanded);
        assert_eq!(run.field.shape(), (2, 1));
        assert_relative_eq!(run.field[(0, 0)], 1.0);
        assert_relative_eq!(run.field[(1, 0)], (-1.0_f64).exp());
    }

    #[test]
    fn univariate_kind_on_both_axes_is_rejected() {
        let cfg = EvalConfig {
            dispersion: Some(DispersionSpec {
                kind: DispersionKind::Gaussian,
                axis: WeightAxis::Xt,
                hyper: Hyperparams::alpha(1.0),
            }),
            ..config()
        };
        assert_eq!(run_eval(&cfg).unwrap_err().exit_code(), 2);
    }
}

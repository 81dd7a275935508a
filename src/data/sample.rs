//! Synthetic noisy observations drawn from a known model.
//!
//! Sample locations are uniform over the configured `(x, t)` box; observations are
//! the model value plus Gaussian noise. Everything is driven by one seeded
//! `StdRng`, so the same config always yields the same sample.

use nalgebra::DMatrix;
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{Coordinates, Field, ModelKind};
use crate::error::AppError;
use crate::models::{evaluate, resolve_variant};

/// Settings for synthetic sample generation.
#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub count: usize,
    pub x_min: f64,
    pub x_max: f64,
    pub t_min: f64,
    pub t_max: f64,
    /// Standard deviation of the additive Gaussian noise.
    pub noise_sd: f64,
    pub seed: u64,
}

#[derive(Debug, Clone)]
pub struct SampleData {
    pub model: ModelKind,
    /// `[N, 2]` sample locations.
    pub xt: DMatrix<f64>,
    /// Noise-free model values, `[N, 1]`.
    pub y_true: Field,
    /// Noisy observations, `[N, 1]`.
    pub y_obs: Field,
}

/// Draw `config.count` noisy observations of `params` evaluated as `variant`.
pub fn generate_observations(
    params: &[f64],
    variant: Option<ModelKind>,
    config: &SampleConfig,
) -> Result<SampleData, AppError> {
    if config.count == 0 {
        return Err(AppError::new(2, "Sample count must be > 0."));
    }
    let valid_range = |lo: f64, hi: f64| lo.is_finite() && hi.is_finite() && hi > lo;
    if !valid_range(config.x_min, config.x_max) || !valid_range(config.t_min, config.t_max) {
        return Err(AppError::new(2, "Invalid x/t range for sample generation."));
    }
    if !(config.noise_sd.is_finite() && config.noise_sd >= 0.0) {
        return Err(AppError::new(2, "Noise standard deviation must be finite and >= 0."));
    }

    let model = resolve_variant(params, variant)?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let normal = Normal::new(0.0, config.noise_sd)
        .map_err(|e| AppError::new(4, format!("Noise distribution error: {e}")))?;

    let mut xt = DMatrix::zeros(config.count, 2);
    for i in 0..config.count {
        xt[(i, 0)] = rng.gen_range(config.x_min..=config.x_max);
        xt[(i, 1)] = rng.gen_range(config.t_min..=config.t_max);
    }

    let y_true = evaluate(params, &Coordinates::Paired(xt.clone()), Some(model))?;
    let y_obs = y_true.map(|y| y + normal.sample(&mut rng));

    Ok(SampleData {
        model,
        xt,
        y_true,
        y_obs,
    })
}

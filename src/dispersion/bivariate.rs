//! Coupled spatial + temporal weighting functions over `(x, t)` pairs.

use crate::dispersion::univariate::{exponential, inverse_power_law, require};
use crate::domain::{DispersionKind, Hyperparams};
use crate::error::ModelError;

/// `exponential(x, alpha) * inverse_power_law(t, alpha)`.
///
/// Asymmetric: x decays exponentially while t decays by inverse power law.
pub fn multiplicative(x: f64, t: f64, alpha: f64) -> f64 {
    exponential(x, alpha) * inverse_power_law(t, alpha)
}

/// `exp(-alpha*x^2 - alpha*t^2 - beta*x*t)`
pub fn bivariate(x: f64, t: f64, alpha: f64, beta: f64) -> f64 {
    (-alpha * x * x - alpha * t * t - beta * x * t).exp()
}

/// `exp(-(x^2 + t^2) / (2*sigma^2))`
pub fn gaussian_envelope(x: f64, t: f64, sigma: f64) -> f64 {
    (-(x * x + t * t) / (2.0 * sigma * sigma)).exp()
}

/// `(1 + alpha*x^2 + alpha*t^2)^(-gamma)`
pub fn power_law(x: f64, t: f64, alpha: f64, gamma: f64) -> f64 {
    (1.0 + alpha * x * x + alpha * t * t).powf(-gamma)
}

/// A bivariate kind with its hyperparameters resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bivariate {
    Multiplicative { alpha: f64 },
    Bivariate { alpha: f64, beta: f64 },
    GaussianEnvelope { sigma: f64 },
    PowerLaw { alpha: f64, gamma: f64 },
}

impl Bivariate {
    /// Resolve `kind` against `hyper`.
    ///
    /// Returns `Ok(None)` for univariate kinds.
    pub fn resolve(kind: DispersionKind, hyper: &Hyperparams) -> Result<Option<Self>, ModelError> {
        let resolved = match kind {
            DispersionKind::Multiplicative => Bivariate::Multiplicative {
                alpha: require(kind, "alpha", hyper.alpha)?,
            },
            DispersionKind::Bivariate => Bivariate::Bivariate {
                alpha: require(kind, "alpha", hyper.alpha)?,
                beta: require(kind, "beta", hyper.beta)?,
            },
            DispersionKind::GaussianEnvelope => Bivariate::GaussianEnvelope {
                sigma: require(kind, "sigma", hyper.sigma)?,
            },
            DispersionKind::PowerLaw => Bivariate::PowerLaw {
                alpha: require(kind, "alpha", hyper.alpha)?,
                gamma: require(kind, "gamma", hyper.gamma)?,
            },
            _ => return Ok(None),
        };
        Ok(Some(resolved))
    }

    pub fn eval(self, x: f64, t: f64) -> f64 {
        match self {
            Bivariate::Multiplicative { alpha } => multiplicative(x, t, alpha),
            Bivariate::Bivariate { alpha, beta } => bivariate(x, t, alpha, beta),
            Bivariate::GaussianEnvelope { sigma } => gaussian_envelope(x, t, sigma),
            Bivariate::PowerLaw { alpha, gamma } => power_law(x, t, alpha, gamma),
        }
    }
}

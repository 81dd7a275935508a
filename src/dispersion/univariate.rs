//! Single-axis weighting functions.
//!
//! Each function maps one coordinate value `mu` to a weight, mostly in `[0, 1]`.
//! `quadratic` is the exception: it goes negative once `alpha * mu^2 > 1`.

use crate::domain::{DispersionKind, Hyperparams};
use crate::error::ModelError;

/// `max(0, 1 - alpha*mu)`
pub fn linear(mu: f64, alpha: f64) -> f64 {
    (1.0 - alpha * mu).max(0.0)
}

/// `exp(-alpha*mu)`
pub fn exponential(mu: f64, alpha: f64) -> f64 {
    (-alpha * mu).exp()
}

/// `(1 + alpha*mu^2)^(-1/2)`
pub fn inverse_power_law(mu: f64, alpha: f64) -> f64 {
    1.0 / (1.0 + alpha * mu * mu).sqrt()
}

/// `1 - alpha*mu^2`
pub fn quadratic(mu: f64, alpha: f64) -> f64 {
    1.0 - alpha * mu * mu
}

/// `exp(-alpha*mu^2)`
pub fn gaussian(mu: f64, alpha: f64) -> f64 {
    (-alpha * mu * mu).exp()
}

/// `exp(-(mu - mu0)^2 / (2*sigma^2))`; exactly `1.0` at `mu == mu0`.
pub fn gaussian_bump(mu: f64, mu0: f64, sigma: f64) -> f64 {
    let d = mu - mu0;
    (-(d * d) / (2.0 * sigma * sigma)).exp()
}

/// `1 / (1 + alpha*ln(1 + |mu|))`
pub fn logarithmic(mu: f64, alpha: f64) -> f64 {
    1.0 / (1.0 + alpha * mu.abs().ln_1p())
}

/// `1 / (1 + exp(alpha*mu))`
pub fn sigmoid(mu: f64, alpha: f64) -> f64 {
    1.0 / (1.0 + (alpha * mu).exp())
}

/// `(1 - tanh(alpha*mu)) / 2`
pub fn tanh(mu: f64, alpha: f64) -> f64 {
    (1.0 - (alpha * mu).tanh()) / 2.0
}

/// A univariate kind with its hyperparameters resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Univariate {
    Linear { alpha: f64 },
    Exponential { alpha: f64 },
    InversePowerLaw { alpha: f64 },
    Quadratic { alpha: f64 },
    Gaussian { alpha: f64 },
    GaussianBump { mu0: f64, sigma: f64 },
    Logarithmic { alpha: f64 },
    Sigmoid { alpha: f64 },
    Tanh { alpha: f64 },
}

impl Univariate {
    /// Resolve `kind` against `hyper`.
    ///
    /// Returns `Ok(None)` for bivariate kinds.
    pub fn resolve(kind: DispersionKind, hyper: &Hyperparams) -> Result<Option<Self>, ModelError> {
        let alpha = || require(kind, "alpha", hyper.alpha);
        let resolved = match kind {
            DispersionKind::Linear => Univariate::Linear { alpha: alpha()? },
            DispersionKind::Exponential => Univariate::Exponential { alpha: alpha()? },
            DispersionKind::InversePowerLaw => Univariate::InversePowerLaw { alpha: alpha()? },
            DispersionKind::Quadratic => Univariate::Quadratic { alpha: alpha()? },
            DispersionKind::Gaussian => Univariate::Gaussian { alpha: alpha()? },
            DispersionKind::GaussianBump => Univariate::GaussianBump {
                mu0: require(kind, "mu0", hyper.mu0)?,
                sigma: require(kind, "sigma", hyper.sigma)?,
            },
            DispersionKind::Logarithmic => Univariate::Logarithmic { alpha: alpha()? },
            DispersionKind::Sigmoid => Univariate::Sigmoid { alpha: alpha()? },
            DispersionKind::Tanh => Univariate::Tanh { alpha: alpha()? },
            DispersionKind::Multiplicative
            | DispersionKind::Bivariate
            | DispersionKind::GaussianEnvelope
            | DispersionKind::PowerLaw => return Ok(None),
        };
        Ok(Some(resolved))
    }

    pub fn eval(self, mu: f64) -> f64 {
        match self {
            Univariate::Linear { alpha } => linear(mu, alpha),
            Univariate::Exponential { alpha } => exponential(mu, alpha),
            Univariate::InversePowerLaw { alpha } => inverse_power_law(mu, alpha),
            Univariate::Quadratic { alpha } => quadratic(mu, alpha),
            Univariate::Gaussian { alpha } => gaussian(mu, alpha),
            Univariate::GaussianBump { mu0, sigma } => gaussian_bump(mu, mu0, sigma),
            Univariate::Logarithmic { alpha } => logarithmic(mu, alpha),
            Univariate::Sigmoid { alpha } => sigmoid(mu, alpha),
            Univariate::Tanh { alpha } => tanh(mu, alpha),
        }
    }
}

pub(crate) fn require(
    kind: DispersionKind,
    name: &'static str,
    value: Option<f64>,
) -> Result<f64, ModelError> {
    value.ok_or(ModelError::MissingHyperparameter {
        kind: kind.name(),
        name,
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    #[test]
    fn linear_clamps_at_zero() {
        let out: Vec<f64> = [0.0, 1.0, 2.0, 5.0].iter().map(|&mu| linear(mu, 0.5)).collect();
        assert_eq!(out, vec![1.0, 0.5, 0.0, 0.0]);
    }

    #[test]
    fn quadratic_goes_negative_past_root() {
        assert_relative_eq!(quadratic(1.0, 0.25), 0.75);
        assert!(quadratic(3.0, 0.25) < 0.0);
    }

    #[test]
    fn closed_forms_at_reference_points() {
        assert_relative_eq!(exponential(2.0, 0.5), (-1.0_f64).exp());
        assert_relative_eq!(inverse_power_law(2.0, 0.75), 0.5);
        assert_relative_eq!(gaussian(1.0, 2.0), (-2.0_f64).exp());
        assert_relative_eq!(logarithmic(-(std::f64::consts::E - 1.0), 1.0), 0.5, epsilon = 1e-12);
        assert_relative_eq!(sigmoid(0.0, 3.0), 0.5);
        assert_relative_eq!(tanh(0.0, 3.0), 0.5);
    }

    #[test]
    fn decaying_kinds_stay_in_unit_interval() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..2000 {
            let alpha = rng.gen_range(0.1..2.0);
            let mu: f64 = rng.gen_range(-5.0..5.0);

            let e = exponential(mu.abs(), alpha);
            assert!(e > 0.0 && e <= 1.0, "exponential({mu}, {alpha}) = {e}");
            let g = gaussian(mu, alpha);
            assert!(g > 0.0 && g <= 1.0, "gaussian({mu}, {alpha}) = {g}");
            let s = sigmoid(mu, alpha);
            assert!(s > 0.0 && s < 1.0, "sigmoid({mu}, {alpha}) = {s}");
            let th = tanh(mu, alpha);
            assert!(th > 0.0 && th < 1.0, "tanh({mu}, {alpha}) = {th}");
        }
    }

    #[test]
    fn gaussian_bump_peaks_at_center_and_decays() {
        let (mu0, sigma) = (1.5, 0.8);
        assert_eq!(gaussian_bump(mu0, mu0, sigma), 1.0);

        let mut prev = 1.0;
        for step in 1..50 {
            let d = step as f64 * 0.1;
            let right = gaussian_bump(mu0 + d, mu0, sigma);
            let left = gaussian_bump(mu0 - d, mu0, sigma);
            assert_relative_eq!(left, right, epsilon = 1e-15);
            assert!(right < prev);
            prev = right;
        }
    }

    #[test]
    fn resolve_reports_missing_scalars() {
        let err =
            Univariate::resolve(DispersionKind::Gaussian, &Hyperparams::default()).unwrap_err();
        assert_eq!(
            err,
            ModelError::MissingHyperparameter {
                kind: "gaussian",
                name: "alpha"
            }
        );

        let hyper = Hyperparams::default().with_mu0(0.0);
        let err = Univariate::resolve(DispersionKind::GaussianBump, &hyper).unwrap_err();
        assert_eq!(
            err,
            ModelError::MissingHyperparameter {
                kind: "gaussian_bump",
                name: "sigma"
            }
        );
    }

    #[test]
    fn resolve_skips_bivariate_kinds() {
        let hyper = Hyperparams::alpha(1.0);
        assert_eq!(Univariate::resolve(DispersionKind::PowerLaw, &hyper), Ok(None));
    }
}

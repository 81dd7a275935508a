//! Shared domain types.
//!
//! Everything here is created fresh per call and owned by the caller; the engine
//! keeps no state between evaluations.

use std::path::PathBuf;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use clap::ValueEnum;
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Real-valued output of a model evaluation, same shape as its coordinates.
///
/// For a grid of shape `[nt, nx]`, row `i` is the spatial profile at temporal index `i`.
pub type Field = DMatrix<f64>;

/// Concrete model variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    /// `A * sin(k*x + b*t + o) + c`
    Simple,
    /// Quadratic self terms plus a single `mu*x*t` coupling.
    Reduced,
    /// Fully expanded coupling on paired coordinates.
    Expanded,
}

impl ModelKind {
    pub const ALL: [ModelKind; 3] = [ModelKind::Simple, ModelKind::Reduced, ModelKind::Expanded];

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            ModelKind::Simple => "simple",
            ModelKind::Reduced => "reduced-dispersion",
            ModelKind::Expanded => "expanded-dispersion",
        }
    }

    /// Required parameter vector length.
    pub fn param_count(self) -> usize {
        match self {
            ModelKind::Simple => 5,
            ModelKind::Reduced => 8,
            ModelKind::Expanded => 9,
        }
    }

    /// Parameter names in vector order.
    pub fn param_names(self) -> &'static [&'static str] {
        match self {
            ModelKind::Simple => &["A", "k", "b", "o", "c"],
            ModelKind::Reduced => &["A", "k0", "k1", "b0", "b1", "mu", "o", "c"],
            ModelKind::Expanded => &["A", "k0", "k1", "k2", "b0", "b1", "b2", "o", "c"],
        }
    }

    /// Infer the variant from a parameter vector length.
    pub fn from_param_count(len: usize) -> Option<ModelKind> {
        ModelKind::ALL.into_iter().find(|kind| kind.param_count() == len)
    }
}

/// Which variant to evaluate.
///
/// `Auto` infers the variant from the parameter vector length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum VariantSelector {
    #[default]
    Auto,
    Simple,
    Reduced,
    Expanded,
}

impl VariantSelector {
    pub fn to_kind(self) -> Option<ModelKind> {
        match self {
            VariantSelector::Auto => None,
            VariantSelector::Simple => Some(ModelKind::Simple),
            VariantSelector::Reduced => Some(ModelKind::Reduced),
            VariantSelector::Expanded => Some(ModelKind::Expanded),
        }
    }
}

impl From<ModelKind> for VariantSelector {
    fn from(value: ModelKind) -> Self {
        match value {
            ModelKind::Simple => VariantSelector::Simple,
            ModelKind::Reduced => VariantSelector::Reduced,
            ModelKind::Expanded => VariantSelector::Expanded,
        }
    }
}

/// Named dispersion (amplitude weighting) functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum DispersionKind {
    Linear,
    Exponential,
    #[value(name = "inverse_power_law")]
    InversePowerLaw,
    Quadratic,
    Gaussian,
    #[value(name = "gaussian_bump")]
    GaussianBump,
    Logarithmic,
    Sigmoid,
    Tanh,
    Multiplicative,
    Bivariate,
    #[value(name = "gaussian_envelope")]
    GaussianEnvelope,
    #[value(name = "power_law")]
    PowerLaw,
}

impl DispersionKind {
    pub const ALL: [DispersionKind; 13] = [
        DispersionKind::Linear,
        DispersionKind::Exponential,
        DispersionKind::InversePowerLaw,
        DispersionKind::Quadratic,
        DispersionKind::Gaussian,
        DispersionKind::GaussianBump,
        DispersionKind::Logarithmic,
        DispersionKind::Sigmoid,
        DispersionKind::Tanh,
        DispersionKind::Multiplicative,
        DispersionKind::Bivariate,
        DispersionKind::GaussianEnvelope,
        DispersionKind::PowerLaw,
    ];

    /// Canonical lookup name.
    pub fn name(self) -> &'static str {
        match self {
            DispersionKind::Linear => "linear",
            DispersionKind::Exponential => "exponential",
            DispersionKind::InversePowerLaw => "inverse_power_law",
            DispersionKind::Quadratic => "quadratic",
            DispersionKind::Gaussian => "gaussian",
            DispersionKind::GaussianBump => "gaussian_bump",
            DispersionKind::Logarithmic => "logarithmic",
            DispersionKind::Sigmoid => "sigmoid",
            DispersionKind::Tanh => "tanh",
            DispersionKind::Multiplicative => "multiplicative",
            DispersionKind::Bivariate => "bivariate",
            DispersionKind::GaussianEnvelope => "gaussian_envelope",
            DispersionKind::PowerLaw => "power_law",
        }
    }

    /// Bivariate kinds consume `(x, t)` pairs instead of a single axis.
    pub fn is_bivariate(self) -> bool {
        matches!(
            self,
            DispersionKind::Multiplicative
                | DispersionKind::Bivariate
                | DispersionKind::GaussianEnvelope
                | DispersionKind::PowerLaw
        )
    }
}

impl FromStr for DispersionKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        DispersionKind::ALL
            .into_iter()
            .find(|kind| kind.name() == needle)
            .ok_or_else(|| ModelError::UnknownDispersionKind(needle.to_string()))
    }
}

impl std::fmt::Display for DispersionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Scalar hyperparameters for the dispersion library.
///
/// Each kind reads only the scalars it needs; unused ones are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Hyperparams {
    pub alpha: Option<f64>,
    pub beta: Option<f64>,
    pub gamma: Option<f64>,
    pub mu0: Option<f64>,
    pub sigma: Option<f64>,
}

impl Hyperparams {
    pub fn alpha(alpha: f64) -> Self {
        Self {
            alpha: Some(alpha),
            ..Self::default()
        }
    }

    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = Some(beta);
        self
    }

    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = Some(gamma);
        self
    }

    pub fn with_mu0(mut self, mu0: f64) -> Self {
        self.mu0 = Some(mu0);
        self
    }

    pub fn with_sigma(mut self, sigma: f64) -> Self {
        self.sigma = Some(sigma);
        self
    }
}

/// Which coordinate(s) a dispersion weight is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum WeightAxis {
    /// Spatial axis only; broadcast across temporal rows.
    X,
    /// Temporal axis only; broadcast across spatial columns.
    T,
    /// Both coordinates at every point (required for bivariate kinds).
    Xt,
}

/// One coordinate argument to the normalizer: an axis vector or a pre-built grid.
#[derive(Debug, Clone, PartialEq)]
pub enum AxisInput {
    Vector(Vec<f64>),
    Grid(DMatrix<f64>),
}

impl From<Vec<f64>> for AxisInput {
    fn from(value: Vec<f64>) -> Self {
        AxisInput::Vector(value)
    }
}

impl From<DMatrix<f64>> for AxisInput {
    fn from(value: DMatrix<f64>) -> Self {
        AxisInput::Grid(value)
    }
}

/// Spatial and temporal coordinate of every evaluation point.
///
/// Invariant: `x` and `t` always have the same shape.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalGrid {
    x: DMatrix<f64>,
    t: DMatrix<f64>,
}

impl CanonicalGrid {
    pub fn new(x: DMatrix<f64>, t: DMatrix<f64>) -> Result<Self, ModelError> {
        if x.shape() != t.shape() {
            return Err(ModelError::shape(format!(
                "grid shapes differ: x is {:?}, t is {:?}",
                x.shape(),
                t.shape()
            )));
        }
        Ok(Self { x, t })
    }

    /// Build from matrices the caller constructed with identical dimensions.
    pub(crate) fn from_congruent(x: DMatrix<f64>, t: DMatrix<f64>) -> Self {
        debug_assert_eq!(x.shape(), t.shape());
        Self { x, t }
    }

    pub fn x(&self) -> &DMatrix<f64> {
        &self.x
    }

    pub fn t(&self) -> &DMatrix<f64> {
        &self.t
    }

    /// `(rows, cols)`; rows index time, columns index space.
    pub fn shape(&self) -> (usize, usize) {
        self.x.shape()
    }
}

/// Coordinates handed to the dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub enum Coordinates {
    /// Normalized grid; output has the grid's shape.
    Grid(CanonicalGrid),
    /// `[N, 2]` samples, column 0 = x, column 1 = t; output is `[N, 1]`.
    Paired(DMatrix<f64>),
}

impl Coordinates {
    /// Number of evaluation points.
    pub fn len(&self) -> usize {
        match self {
            Coordinates::Grid(grid) => grid.x().len(),
            Coordinates::Paired(xt) => xt.nrows(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A parameter vector plus an optional explicit variant, as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<ModelKind>,
    pub params: Vec<f64>,
}

/// Dispersion weighting requested for a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispersionSpec {
    pub kind: DispersionKind,
    pub axis: WeightAxis,
    pub hyper: Hyperparams,
}

/// A full `wf eval` run as understood by the application layer.
///
/// Derived from CLI flags; immutable once built.
#[derive(Debug, Clone)]
pub struct EvalConfig {
    pub selector: VariantSelector,
    pub params: Vec<f64>,

    /// Spatial axis values.
    pub x: Vec<f64>,
    /// Temporal axis values.
    pub t: Vec<f64>,
    /// Treat `x`/`t` as paired samples instead of axes.
    pub paired: bool,

    pub dispersion: Option<DispersionSpec>,

    /// Decimal places in terminal output.
    pub precision: usize,
    pub export_csv: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
}

/// An evaluated field as saved to JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldFile {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    pub model: ModelKind,
    pub params: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dispersion: Option<DispersionSpec>,
    pub x: Vec<f64>,
    pub t: Vec<f64>,
    pub paired: bool,
    /// Row-major values: `values[i][j]` is the point at temporal index `i`, spatial index `j`.
    /// Paired runs store one single-element row per sample.
    pub values: Vec<Vec<f64>>,
}

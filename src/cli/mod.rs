//! Command-line parsing for the `wf` field evaluator.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the evaluation code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{DispersionKind, Hyperparams, VariantSelector, WeightAxis};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "wf", version, about = "Sinusoidal spatiotemporal model evaluator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Evaluate a model over a grid (or paired samples), optionally weighted by dispersion.
    Eval(EvalArgs),
    /// Print dispersion weights for a list of coordinate values.
    Dispersion(DispersionArgs),
    /// Generate noisy synthetic observations from a model as CSV.
    Sample(SampleArgs),
}

/// Where the parameter vector comes from.
#[derive(Debug, Args, Clone)]
pub struct ParamArgs {
    /// Which model variant to evaluate (`auto` infers it from the parameter count).
    #[arg(long, value_enum, default_value_t = VariantSelector::Auto)]
    pub model: VariantSelector,

    /// Comma-separated parameter vector, e.g. `2,1.5,2,0.785,0.5`.
    #[arg(short = 'p', long, allow_hyphen_values = true, conflicts_with = "params_file")]
    pub params: Option<String>,

    /// JSON parameter set (`{"model": "...", "params": [...]}`).
    #[arg(long, value_name = "JSON")]
    pub params_file: Option<PathBuf>,
}

/// Dispersion hyperparameters.
#[derive(Debug, Args, Clone, Default)]
pub struct HyperArgs {
    #[arg(long, allow_hyphen_values = true)]
    pub alpha: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    pub beta: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    pub gamma: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    pub mu0: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    pub sigma: Option<f64>,
}

impl HyperArgs {
    pub fn to_hyperparams(&self) -> Hyperparams {
        Hyperparams {
            alpha: self.alpha,
            beta: self.beta,
            gamma: self.gamma,
            mu0: self.mu0,
            sigma: self.sigma,
        }
    }
}

/// Options for `wf eval`.
#[derive(Debug, Parser, Clone)]
pub struct EvalArgs {
    #[command(flatten)]
    pub params: ParamArgs,

    /// Explicit spatial values (comma-separated). Overrides the x range.
    #[arg(long, allow_hyphen_values = true)]
    pub x: Option<String>,

    /// Explicit temporal values (comma-separated). Overrides the t range.
    #[arg(long, allow_hyphen_values = true)]
    pub t: Option<String>,

    /// Spatial range start.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub x_min: f64,

    /// Spatial range end.
    #[arg(long, default_value_t = 1.0, allow_hyphen_values = true)]
    pub x_max: f64,

    /// Number of spatial points.
    #[arg(long, default_value_t = 11)]
    pub nx: usize,

    /// Temporal range start.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub t_min: f64,

    /// Temporal range end.
    #[arg(long, default_value_t = 1.0, allow_hyphen_values = true)]
    pub t_max: f64,

    /// Number of temporal points.
    #[arg(long, default_value_t = 6)]
    pub nt: usize,

    /// Treat x/t as paired samples (equal lengths) instead of grid axes.
    #[arg(long)]
    pub paired: bool,

    /// Dispersion weighting applied to the model output.
    #[arg(long, value_enum)]
    pub dispersion: Option<DispersionKind>,

    /// Axis the dispersion weight is computed over (`xt` for bivariate kinds).
    #[arg(long, value_enum, default_value_t = WeightAxis::X)]
    pub axis: WeightAxis,

    #[command(flatten)]
    pub hyper: HyperArgs,

    /// Decimal places in terminal output.
    #[arg(long, default_value_t = 4)]
    pub precision: usize,

    /// Export the field to CSV (`x,t,y` rows).
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the field (model + params + values) to JSON.
    #[arg(long = "export-json")]
    pub export_json: Option<PathBuf>,
}

/// Options for `wf dispersion`.
#[derive(Debug, Parser, Clone)]
pub struct DispersionArgs {
    /// Dispersion kind name (e.g. `gaussian_bump`).
    pub kind: String,

    /// Coordinate values (comma-separated); the x column for bivariate kinds.
    #[arg(long, allow_hyphen_values = true)]
    pub mu: String,

    /// Temporal values paired with `--mu` (bivariate kinds only).
    #[arg(long, allow_hyphen_values = true)]
    pub t: Option<String>,

    #[command(flatten)]
    pub hyper: HyperArgs,

    /// Decimal places in terminal output.
    #[arg(long, default_value_t = 4)]
    pub precision: usize,
}

/// Options for `wf sample`.
#[derive(Debug, Parser, Clone)]
pub struct SampleArgs {
    #[command(flatten)]
    pub params: ParamArgs,

    /// Number of observations.
    #[arg(short = 'n', long, default_value_t = 100)]
    pub count: usize,

    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub x_min: f64,

    #[arg(long, default_value_t = 1.0, allow_hyphen_values = true)]
    pub x_max: f64,

    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub t_min: f64,

    #[arg(long, default_value_t = 1.0, allow_hyphen_values = true)]
    pub t_max: f64,

    /// Standard deviation of the additive Gaussian noise.
    #[arg(long, default_value_t = 0.1)]
    pub noise: f64,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Write CSV here instead of stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_eval_with_dispersion() {
        let cli = Cli::try_parse_from([
            "wf",
            "eval",
            "--model",
            "simple",
            "-p",
            "2,1.5,2,0.785,0.5",
            "--x",
            "0,1",
            "--t",
            "0,1",
            "--dispersion",
            "gaussian_bump",
            "--mu0",
            "-0.5",
            "--sigma",
            "1",
        ])
        .unwrap();
        let Command::Eval(args) = cli.command else {
            panic!("expected eval");
        };
        assert_eq!(args.params.model, VariantSelector::Simple);
        assert_eq!(args.dispersion, Some(DispersionKind::GaussianBump));
        assert_eq!(args.hyper.mu0, Some(-0.5));
        assert_eq!(args.axis, WeightAxis::X);
    }

    #[test]
    fn params_and_params_file_conflict() {
        let res = Cli::try_parse_from(["wf", "eval", "-p", "1,2,3,4,5", "--params-file", "p.json"]);
        assert!(res.is_err());
    }
}

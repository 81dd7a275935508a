//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - initialises logging
//! - parses CLI arguments into immutable configs
//! - runs the evaluation pipeline
//! - prints reports and writes optional exports

use std::fs::File;
use std::io::{BufWriter, Write};

use clap::Parser;
use nalgebra::DMatrix;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{Command, DispersionArgs, EvalArgs, ParamArgs, SampleArgs};
use crate::data::{SampleConfig, generate_observations};
use crate::domain::{DispersionKind, DispersionSpec, EvalConfig, ParameterSet};
use crate::error::{AppError, ModelError};
use crate::grid::{linspace, pair_samples};
use crate::io::{parse_number_list, read_parameter_set};

pub mod pipeline;

/// Entry point for the `wf` binary.
pub fn run() -> Result<(), AppError> {
    init_tracing();
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Eval(args) => handle_eval(args),
        Command::Dispersion(args) => handle_dispersion(args),
        Command::Sample(args) => handle_sample(args),
    }
}

/// Log to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // A subscriber may already be installed (e.g. when embedded); keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}

fn handle_eval(args: EvalArgs) -> Result<(), AppError> {
    let config = eval_config_from_args(&args)?;
    let run = pipeline::run_eval(&config)?;

    println!("{}", crate::report::format_run_summary(&config, run.model));
    println!("{}", crate::report::format_field(&config, &run.field, config.precision));

    if let Some(path) = &config.export_csv {
        crate::io::write_field_csv(path, &config, &run.field)?;
        info!(path = %path.display(), "wrote field CSV");
    }
    if let Some(path) = &config.export_json {
        crate::io::write_field_json(path, &config, run.model, &run.field)?;
        info!(path = %path.display(), "wrote field JSON");
    }

    Ok(())
}

fn handle_dispersion(args: DispersionArgs) -> Result<(), AppError> {
    let kind: DispersionKind = args.kind.parse()?;
    let mu = parse_number_list(&args.mu)?;
    let hyper = args.hyper.to_hyperparams();

    let t = args.t.as_deref().map(parse_number_list).transpose()?;
    let coordinate = dispersion_coordinate(kind, &mu, t.as_deref())?;
    let w = crate::dispersion::weights(kind, &coordinate, &hyper)?;

    println!("{}", crate::report::format_weights(kind, &mu, w.as_slice(), args.precision));
    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let set = parameter_set_from_args(&args.params)?;
    let config = SampleConfig {
        count: args.count,
        x_min: args.x_min,
        x_max: args.x_max,
        t_min: args.t_min,
        t_max: args.t_max,
        noise_sd: args.noise,
        seed: args.seed,
    };
    let sample = generate_observations(&set.params, set.model, &config)?;
    info!(model = sample.model.display_name(), n = config.count, "generated observations");

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path).map_err(|e| {
            AppError::new(2, format!("Failed to create sample CSV '{}': {e}", path.display()))
        })?)),
        None => Box::new(std::io::stdout().lock()),
    };
    let write_err =
        |e: std::io::Error| AppError::new(2, format!("Failed to write sample CSV: {e}"));

    writeln!(out, "x,t,y_obs,y_true").map_err(write_err)?;
    for i in 0..sample.xt.nrows() {
        writeln!(
            out,
            "{},{},{:.12},{:.12}",
            sample.xt[(i, 0)],
            sample.xt[(i, 1)],
            sample.y_obs[(i, 0)],
            sample.y_true[(i, 0)]
        )
        .map_err(write_err)?;
    }
    out.flush().map_err(write_err)?;
    Ok(())
}

/// Coordinates for `wf dispersion`: a single column for univariate kinds,
/// `[N, 2]` pairs for bivariate kinds.
fn dispersion_coordinate(
    kind: DispersionKind,
    mu: &[f64],
    t: Option<&[f64]>,
) -> Result<DMatrix<f64>, ModelError> {
    match (kind.is_bivariate(), t) {
        (true, Some(t)) => pair_samples(mu, t),
        (false, None) => Ok(DMatrix::from_column_slice(mu.len(), 1, mu)),
        (true, None) => Err(ModelError::Shape(format!(
            "bivariate kind '{kind}' needs --t values paired with --mu"
        ))),
        (false, Some(_)) => Err(ModelError::Shape(format!(
            "univariate kind '{kind}' weights a single axis; drop --t"
        ))),
    }
}

/// Resolve the parameter vector from inline values or a JSON file.
///
/// An explicit `--model` overrides the file's `model` field.
pub fn parameter_set_from_args(args: &ParamArgs) -> Result<ParameterSet, AppError> {
    let mut set = match (&args.params, &args.params_file) {
        (Some(raw), _) => ParameterSet {
            model: None,
            params: parse_number_list(raw)?,
        },
        (None, Some(path)) => read_parameter_set(path)?,
        (None, None) => return Err(AppError::new(2, "Provide --params or --params-file.")),
    };
    if let Some(kind) = args.model.to_kind() {
        set.model = Some(kind);
    }
    Ok(set)
}

pub fn eval_config_from_args(args: &EvalArgs) -> Result<EvalConfig, AppError> {
    let set = parameter_set_from_args(&args.params)?;

    let x = match &args.x {
        Some(raw) => parse_number_list(raw)?,
        None => linspace(args.x_min, args.x_max, args.nx)?,
    };
    let t = match &args.t {
        Some(raw) => parse_number_list(raw)?,
        None => linspace(args.t_min, args.t_max, args.nt)?,
    };

    let dispersion = args.dispersion.map(|kind| DispersionSpec {
        kind,
        axis: args.axis,
        hyper: args.hyper.to_hyperparams(),
    });

    Ok(EvalConfig {
        selector: set.model.map(Into::into).unwrap_or_default(),
        params: set.params,
        x,
        t,
        paired: args.paired,
        dispersion,
        precision: args.precision,
        export_csv: args.export.clone(),
        export_json: args.export_json.clone(),
    })
}

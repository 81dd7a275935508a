//! Parameter set files.
//!
//! A parameter set is a JSON object:
//!
//! ```text
//! { "model": "reduced", "params": [1.0, 0.8, 0.01, 2.0, 0.0, 0.05, 0.0, 0.0] }
//! ```
//!
//! `model` is optional; without it the variant is inferred from the length.

use std::fs::File;
use std::path::Path;

use crate::domain::ParameterSet;
use crate::error::AppError;

/// Read a parameter set JSON file.
pub fn read_parameter_set(path: &Path) -> Result<ParameterSet, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(2, format!("Failed to open parameter file '{}': {e}", path.display()))
    })?;
    let set: ParameterSet = serde_json::from_reader(file).map_err(|e| {
        AppError::new(2, format!("Invalid parameter file '{}': {e}", path.display()))
    })?;
    if let Some(bad) = set.params.iter().find(|v| !v.is_finite()) {
        return Err(AppError::new(2, format!("Parameter file contains a non-finite value: {bad}")));
    }
    Ok(set)
}

/// Parse a comma-separated list of numbers, e.g. `"2,1.5,2,0.785,0.5"`.
pub fn parse_number_list(raw: &str) -> Result<Vec<f64>, AppError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f64>()
                .map_err(|e| AppError::new(2, format!("Invalid number '{s}': {e}")))
        })
        .collect()
}

//! Field exports.
//!
//! - CSV: one `x,t,y` row per evaluation point, easy to load in a spreadsheet
//! - JSON: `domain::FieldFile`, the run's model, parameters and values

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::Utc;

use crate::domain::{EvalConfig, Field, FieldFile, ModelKind};
use crate::error::AppError;

/// `(x, t, y)` for every evaluated point, time-major for grids.
pub fn field_points(config: &EvalConfig, field: &Field) -> Vec<(f64, f64, f64)> {
    if config.paired {
        return (0..field.nrows())
            .map(|k| (config.x[k], config.t[k], field[(k, 0)]))
            .collect();
    }
    let mut out = Vec::with_capacity(field.len());
    for (i, &t) in config.t.iter().enumerate() {
        for (j, &x) in config.x.iter().enumerate() {
            out.push((x, t, field[(i, j)]));
        }
    }
    out
}

/// Assemble the JSON representation of an evaluated field.
pub fn build_field_file(config: &EvalConfig, model: ModelKind, field: &Field) -> FieldFile {
    let values = field
        .row_iter()
        .map(|row| row.iter().copied().collect())
        .collect();
    FieldFile {
        tool: "wf".to_string(),
        generated_at: Utc::now(),
        model,
        params: config.params.clone(),
        dispersion: config.dispersion.clone(),
        x: config.x.clone(),
        t: config.t.clone(),
        paired: config.paired,
        values,
    }
}

/// Write a field JSON file.
pub fn write_field_json(
    path: &Path,
    config: &EvalConfig,
    model: ModelKind,
    field: &Field,
) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(2, format!("Failed to create field JSON '{}': {e}", path.display()))
    })?;
    serde_json::to_writer_pretty(BufWriter::new(file), &build_field_file(config, model, field))
        .map_err(|e| AppError::new(2, format!("Failed to write field JSON: {e}")))?;
    Ok(())
}

/// Write a field CSV file.
pub fn write_field_csv(path: &Path, config: &EvalConfig, field: &Field) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(2, format!("Failed to create field CSV '{}': {e}", path.display()))
    })?;
    let mut out = BufWriter::new(file);

    writeln!(out, "x,t,y")
        .map_err(|e| AppError::new(2, format!("Failed to write field CSV header: {e}")))?;
    for (x, t, y) in field_points(config, field) {
        writeln!(out, "{x},{t},{y:.12}")
            .map_err(|e| AppError::new(2, format!("Failed to write field CSV row: {e}")))?;
    }
    out.flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush field CSV: {e}")))?;
    Ok(())
}

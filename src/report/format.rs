//! Formatted terminal output.
//!
//! Formatting lives here so the evaluation code stays free of presentation
//! concerns and output changes stay localized.

use crate::domain::{DispersionKind, EvalConfig, Field, ModelKind};
use crate::io::field_points;

/// Header block: chosen model, named parameters and any dispersion weighting.
pub fn format_run_summary(config: &EvalConfig, model: ModelKind) -> String {
    let mut out = String::new();

    out.push_str("=== wf - spatiotemporal field ===\n");
    let how = if config.selector.to_kind().is_some() { "explicit" } else { "inferred" };
    out.push_str(&format!("Model: {} ({how})\n", model.display_name()));
    let named: Vec<String> = model
        .param_names()
        .iter()
        .zip(config.params.iter())
        .map(|(name, v)| format!("{name}={v:.6}"))
        .collect();
    out.push_str(&format!("Params: {}\n", named.join(" ")));

    if config.paired {
        out.push_str(&format!("Points: n={} (paired)\n", config.x.len()));
    } else {
        out.push_str(&format!(
            "Grid: nt={} x nx={} | x=[{}, {}] | t=[{}, {}]\n",
            config.t.len(),
            config.x.len(),
            fmt_bound(config.x.first()),
            fmt_bound(config.x.last()),
            fmt_bound(config.t.first()),
            fmt_bound(config.t.last()),
        ));
    }

    if let Some(spec) = &config.dispersion {
        out.push_str(&format!("Dispersion: {} over {:?}", spec.kind, spec.axis));
        let h = &spec.hyper;
        for (name, value) in [
            ("alpha", h.alpha),
            ("beta", h.beta),
            ("gamma", h.gamma),
            ("mu0", h.mu0),
            ("sigma", h.sigma),
        ] {
            if let Some(v) = value {
                out.push_str(&format!(" {name}={v}"));
            }
        }
        out.push('\n');
    }

    out
}

/// Render a field as a table.
///
/// Grids print one row per temporal value with spatial values as columns;
/// paired runs print one `x t y` line per sample.
pub fn format_field(config: &EvalConfig, field: &Field, precision: usize) -> String {
    let width = precision + 8;
    let mut out = String::new();

    if config.paired {
        out.push_str(&format!("{:>width$} {:>width$} {:>width$}\n", "x", "t", "y"));
        for (x, t, y) in field_points(config, field) {
            out.push_str(&format!(
                "{x:>width$.precision$} {t:>width$.precision$} {y:>width$.precision$}\n"
            ));
        }
        return out;
    }

    out.push_str(&format!("{:>width$}", "t \\ x"));
    for x in &config.x {
        out.push_str(&format!(" {x:>width$.precision$}"));
    }
    out.push('\n');
    for (i, t) in config.t.iter().enumerate() {
        out.push_str(&format!("{t:>width$.precision$}"));
        for y in field.row(i).iter() {
            out.push_str(&format!(" {y:>width$.precision$}"));
        }
        out.push('\n');
    }
    out
}

/// Two-column listing of coordinate values and their weights.
pub fn format_weights(
    kind: DispersionKind,
    coords: &[f64],
    weights: &[f64],
    precision: usize,
) -> String {
    let width = precision + 8;
    let mut out = format!("{:>width$} {:>width$}\n", "mu", kind.name());
    for (mu, w) in coords.iter().zip(weights) {
        out.push_str(&format!("{mu:>width$.precision$} {w:>width$.precision$}\n"));
    }
    out
}

fn fmt_bound(v: Option<&f64>) -> String {
    v.map(|v| format!("{v}")).unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use nalgebra::DMatrix;

    use super::*;
    use crate::domain::{DispersionSpec, Hyperparams, VariantSelector, WeightAxis};

    fn config() -> EvalConfig {
        EvalConfig {
            selector: VariantSelector::Simple,
            params: vec![2.0, 1.5, 2.0, 0.785, 0.5],
            x: vec![0.0, 1.0],
            t: vec![0.0, 1.0],
            paired: false,
            dispersion: Some(DispersionSpec {
                kind: DispersionKind::Linear,
                axis: WeightAxis::X,
                hyper: Hyperparams::alpha(0.5),
            }),
            precision: 3,
            export_csv: None,
            export_json: None,
        }
    }

    #[test]
    fn summary_names_parameters() {
        let s = format_run_summary(&config(), ModelKind::Simple);
        assert!(s.contains("Model: simple (explicit)"));
        assert!(s.contains("A=2.000000 k=1.500000"));
        assert!(s.contains("Grid: nt=2 x nx=2"));
        assert!(s.contains("Dispersion: linear over X alpha=0.5"));
    }

    #[test]
    fn field_table_has_header_and_one_line_per_time() {
        let field = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let table = format_field(&config(), &field, 3);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("t \\ x"));
        assert!(lines[2].ends_with("4.000"));
    }

    #[test]
    fn weights_listing_pairs_values() {
        let s = format_weights(DispersionKind::Linear, &[0.0, 2.0], &[1.0, 0.0], 2);
        let lines: Vec<&str> = s.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].trim_end().ends_with("linear"));
        assert!(lines[2].trim_end().ends_with("0.00"));
    }
}

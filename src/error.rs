//! Error types.
//!
//! The library surface reports structural problems through [`ModelError`].
//! The binary wraps everything in [`AppError`], which carries a process exit code.

use thiserror::Error;

/// Structural failures raised by the evaluation engine.
///
/// Every variant is raised synchronously by the call that received the bad
/// input; nothing is retried or recovered.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// Coordinate inputs are neither two vectors nor two congruent grids
    /// (or a weight cannot be broadcast against a field).
    #[error("shape error: {0}")]
    Shape(String),

    /// Parameter vector length does not match the selected or inferred variant.
    #[error("parameter count error: {context} expects {expected:?} parameters, got {actual}")]
    ParameterCount {
        context: String,
        expected: Vec<usize>,
        actual: usize,
    },

    /// Unrecognised dispersion kind name.
    #[error("unknown dispersion kind '{0}'")]
    UnknownDispersionKind(String),

    /// A dispersion kind's required scalar was not supplied.
    #[error("dispersion kind '{kind}' requires hyperparameter '{name}'")]
    MissingHyperparameter {
        kind: &'static str,
        name: &'static str,
    },
}

impl ModelError {
    pub(crate) fn shape(message: impl Into<String>) -> Self {
        ModelError::Shape(message.into())
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<ModelError> for AppError {
    fn from(err: ModelError) -> Self {
        AppError::new(2, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_error_maps_to_input_exit_code() {
        let err: AppError = ModelError::UnknownDispersionKind("cubic".into()).into();
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.to_string(), "unknown dispersion kind 'cubic'");
    }

    #[test]
    fn parameter_count_message_lists_expected_lengths() {
        let err = ModelError::ParameterCount {
            context: "inferred model".into(),
            expected: vec![5, 8, 9],
            actual: 6,
        };
        assert_eq!(
            err.to_string(),
            "parameter count error: inferred model expects [5, 8, 9] parameters, got 6"
        );
    }
}

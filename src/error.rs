//! Error types for Stride Flux

use thiserror::Error;

/// Errors that can occur while reading packages or computing workouts
#[derive(Debug, Error)]
pub enum ComputeError {
    #[error("Invalid workout type: {0}")]
    InvalidWorkoutType(String),

    #[error("Missing parameter '{name}' (position {index}) for {workout}")]
    MissingParameter {
        workout: &'static str,
        name: &'static str,
        index: usize,
    },

    #[error("Invalid value {value} for '{name}': {reason}")]
    InvalidParameterValue {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("Too many parameters for {workout}: expected {expected}, got {actual}")]
    UnexpectedParameters {
        workout: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Failed to parse sensor package: {0}")]
    ParseError(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Encoding error: {0}")]
    EncodingError(String),
}

//! Error taxonomy for cave generation.
//!
//! Every pipeline error is an input-validation error raised before the grid is
//! allocated. Once a configuration validates, the stages cannot fail.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid dimensions {width}x{height}: width and height must be at least 1")]
    InvalidDimensions { width: usize, height: usize },

    #[error("parameter `{parameter}` = {value} is outside its range {min}..={max}")]
    InvalidThreshold {
        parameter: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },

    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl GenerationError {
    /// Name of the configuration field that failed validation, if any.
    pub fn parameter(&self) -> Option<&'static str> {
        match self {
            GenerationError::InvalidDimensions { width: 0, .. } => Some("width"),
            GenerationError::InvalidDimensions { .. } => Some("height"),
            GenerationError::InvalidThreshold { parameter, .. } => Some(*parameter),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, GenerationError>;

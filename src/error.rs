use quire_core::DocumentError;
use quire_style::StyleParseError;
use thiserror::Error;

/// Errors from configuring and running a whole generation.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Document generation failed: {0}")]
    Document(#[from] DocumentError),

    #[error("Invalid style: {0}")]
    Style(#[from] StyleParseError),

    #[error("Invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

//! Error handling for the skillbridge engine

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkillBridgeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Embedding generation error: {0}")]
    Embedding(String),

    #[error("Model loading error: {0}")]
    ModelLoading(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Taxonomy error: {0}")]
    Taxonomy(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, SkillBridgeError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for SkillBridgeError {
    fn from(err: anyhow::Error) -> Self {
        SkillBridgeError::Embedding(err.to_string())
    }
}

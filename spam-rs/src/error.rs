use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpamError {
    #[error("Model not loaded: {0}")]
    ModelUnavailable(String),

    #[error("Model scoring error: {0}")]
    Scoring(String),

    #[error("Model loading error: {0}")]
    ModelLoad(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SpamError>;

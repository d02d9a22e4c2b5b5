use thiserror::Error;

#[derive(Error, Debug)]
pub enum StaysError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Availability service error: {reason}")]
    Availability { reason: String },

    #[error("Property not found: {id}")]
    PropertyNotFound { id: u32 },

    #[error("Invalid parameters: {reason}")]
    InvalidParams { reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yml::Error),
}

pub type Result<T> = std::result::Result<T, StaysError>;

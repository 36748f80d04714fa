//! Error types for PteroNode

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PteroError {
    #[error("Remote inventory unavailable: {0}")]
    RemoteUnavailable(String),

    #[error("Invalid port spec: {0}")]
    InvalidPortSpec(String),

    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    #[error("Config file not found: {0}")]
    ConfigNotFound(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for PteroError {
    fn from(err: reqwest::Error) -> Self {
        PteroError::Api(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PteroError>;

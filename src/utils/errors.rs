use crate::service::ServiceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelcertError {
    #[error("Certificate service error: {0}")]
    Service(#[from] ServiceError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    Store(#[from] crate::store::StoreError),
}

pub type Result<T> = std::result::Result<T, RelcertError>;

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Failure talking to the certificate service
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("service returned {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Api {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("unexpected response: {0}")]
    Decode(String),
}

/// Error payload shape returned by the service
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: Option<String>,
}

impl ServiceError {
    /// Build an API error from a non-success status and its body text
    pub fn from_body(status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.trim().is_empty());
        Self::Api { status, message }
    }

    /// The human-readable message supplied by the service, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } => message.as_deref(),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status(),
            Self::Decode(_) => None,
        }
    }
}

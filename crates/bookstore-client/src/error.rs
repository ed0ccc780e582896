use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid base url: {0}")]
    InvalidUrl(String),

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("client builder: {0}")]
    Builder(String),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{operation}: expected status {expected}, got {actual}: {body}")]
    UnexpectedStatus {
        operation: &'static str,
        expected: StatusCode,
        actual: StatusCode,
        body: String,
    },

    #[error("{operation}: could not decode response body")]
    Decode {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl ClientError {
    /// The status the server actually answered with, if it answered.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::UnexpectedStatus { actual, .. } => Some(*actual),
            ClientError::Transport(e) => e.status(),
            _ => None,
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

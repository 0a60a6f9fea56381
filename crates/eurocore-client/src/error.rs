use thiserror::Error;

/// Errors that can occur when interacting with Eurocore
#[derive(Error, Debug)]
pub enum EurocoreError {
    #[error("Failed to build HTTP client")]
    Client(#[from] reqwest::Error),

    #[error("Request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {url} failed with status {status}: {body}")]
    Status { url: String, status: u16, body: String },

    #[error("Invalid response from {url}")]
    InvalidResponse {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Login response did not contain a token")]
    MissingToken,
}

pub type Result<T> = std::result::Result<T, EurocoreError>;

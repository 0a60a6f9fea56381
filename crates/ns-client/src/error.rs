use thiserror::Error;

/// Errors that can occur when talking to the NationStates API
#[derive(Error, Debug)]
pub enum NsClientError {
    #[error("Failed to build HTTP client")]
    Client(#[from] reqwest::Error),

    #[error("User agent must not be empty")]
    EmptyUserAgent,

    #[error("Request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {url} failed with status {status}")]
    Status { url: String, status: u16 },

    #[error("Field {field} not found in response from {url}")]
    MissingField { field: &'static str, url: String },

    #[error("Malformed XML response: {0}")]
    Xml(String),
}

pub type Result<T> = std::result::Result<T, NsClientError>;

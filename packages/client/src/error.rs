use thiserror::Error;

/// Application-level error type. Every error is recovered at the command
/// boundary that triggered the action; nothing is retried automatically.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Client-side field check failed. Surfaced inline, non-fatal.
    #[error("{0}")]
    Validation(String),

    /// The request never completed (DNS, connect, timeout, malformed body).
    #[error("Request failed: {0}")]
    Network(String),

    /// 401/403 from an authenticated endpoint. Both sessions are already
    /// cleared by the time this surfaces.
    #[error("Session expired. Please log in again")]
    Auth,

    /// Backend rejected the request; message passed through verbatim.
    #[error("{0}")]
    BusinessRule(String),

    /// Document generation failed. No partial file is written.
    #[error("Could not generate the certificate: {0}")]
    Render(String),

    #[error("Session store error: {0}")]
    Session(String),

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::Network(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;

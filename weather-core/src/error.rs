use thiserror::Error;

/// Failures surfaced to clients of the forecast operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProxyError {
    /// Required client input is missing.
    #[error("{0}")]
    Validation(String),

    /// The requested city could not be resolved.
    #[error("{0}")]
    NotFound(String),

    /// The upstream provider failed or answered with a non-success status.
    #[error("{0}")]
    Upstream(String),
}

impl ProxyError {
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound(message.into())
    }

    pub fn upstream<S: Into<String>>(message: S) -> Self {
        Self::Upstream(message.into())
    }
}

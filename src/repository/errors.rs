use thiserror::Error;

/// Failure of a repository call.
///
/// Every variant displays only the best available message so list pages can
/// show it to the user verbatim.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The HTTP layer failed: network error or non-2xx status.
    #[error("{0}")]
    Transport(String),

    /// The backend answered with an error discriminator.
    #[error("{0}")]
    Domain(String),

    /// The expected payload was missing or could not be decoded.
    #[error("{0}")]
    MalformedResponse(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl RepositoryError {
    pub fn message(&self) -> &str {
        match self {
            RepositoryError::Transport(message)
            | RepositoryError::Domain(message)
            | RepositoryError::MalformedResponse(message) => message,
        }
    }
}

use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure classes of a classification call. None of them is retried.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Rejected locally; nothing was sent.
    #[error("{0}")]
    Validation(String),

    /// The request did not complete or the reply could not be read.
    #[error("classification service unreachable: {0}")]
    Transport(#[source] BoxError),

    /// The service answered with a non-success status.
    #[error("classification service reported an error: {}", .message.as_deref().unwrap_or("Unknown error"))]
    Application { message: Option<String> },
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(Box::new(err))
    }
}

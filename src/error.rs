use thiserror::Error;

/// Failure at the store boundary. Network, auth, query and decode problems
/// all collapse into this one kind; callers only need to know that no data
/// came back and that the same call may be retried.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to fetch usage records: {0}")]
    FetchFailed(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        Self::FetchFailed(e.to_string())
    }
}

use thiserror::Error;

/// A single failed call against the content service.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("service returned {status}: {message}")]
    Service { status: u16, message: String },

    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Delivery failure with enough state for the caller to resume.
///
/// No rollback happens: after `AppendFailed` the page exists with
/// partial content, and `appended_chunks` counts the calls that were
/// confirmed (the create-page call included), so a retry can send only
/// the remaining chunks instead of recreating the page.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("page creation failed: {source}")]
    CreateFailed {
        #[source]
        source: ApiError,
    },

    #[error(
        "append failed on page {page_id} after {appended_chunks} of {total_chunks} chunks: {source}"
    )]
    AppendFailed {
        page_id: String,
        appended_chunks: usize,
        total_chunks: usize,
        #[source]
        source: ApiError,
    },
}

impl DeliveryError {
    /// Id of the page that was created before the failure, if any.
    pub fn page_id(&self) -> Option<&str> {
        match self {
            DeliveryError::CreateFailed { .. } => None,
            DeliveryError::AppendFailed { page_id, .. } => Some(page_id),
        }
    }
}

use thiserror::Error;

/// Failure of a whole conversion request.
///
/// Recoverable input defects (malformed markup, bad URLs, oversized
/// runs) never surface here; they degrade locally to plain text, a
/// dropped link, or a split block. This error means neither strategy
/// produced anything deliverable.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("no content could be converted")]
    NoContent,
}

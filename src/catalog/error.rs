use thiserror::Error;

/// Failures surfaced by the catalog layer.
///
/// `Transport` covers everything the HTTP client reports: connection
/// failures, non-success statuses and bodies that are not valid JSON.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected catalog payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("could not decode poster image: {0}")]
    Image(#[from] image::ImageError),

    #[error("invalid catalog request: {0}")]
    InvalidRequest(String),
}

impl CatalogError {
    /// HTTP status of a rejected request, when the service answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            CatalogError::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

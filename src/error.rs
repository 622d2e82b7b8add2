#[derive(thiserror::Error, Debug)]
pub enum OverlayError {
    #[error("Player name is required")]
    NameRequired,
    #[error("Player name can only contain letters, numbers, spaces, and hyphens")]
    InvalidName,
    #[error("{0}")]
    Upstream(String),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MeliError>;

#[derive(Debug, Error)]
pub enum MeliError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Token refresh failed (status {status}): {message}")]
    Auth { status: u16, message: String },

    /// The public search endpoint rejects app-scoped tokens with 403.
    /// Kept as its own variant so callers can fall back to manual IDs.
    #[error("Competitor discovery rejected by the marketplace")]
    DiscoveryUnavailable,
}

impl From<reqwest::Error> for MeliError {
    fn from(err: reqwest::Error) -> Self {
        MeliError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for MeliError {
    fn from(err: serde_json::Error) -> Self {
        MeliError::Parse(err.to_string())
    }
}

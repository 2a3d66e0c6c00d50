use thiserror::Error;

use anuncia_common::ValidationError;
use meli_client::MeliError;

pub type Result<T> = std::result::Result<T, ResearchError>;

/// Research pipeline errors. Per-competitor failures never surface here;
/// they are contained to the slot and reported in `failed_competitors`.
#[derive(Debug, Error)]
pub enum ResearchError {
    #[error(transparent)]
    InvalidInput(#[from] ValidationError),

    #[error("Competitor auto-discovery is unavailable; supply listing IDs manually")]
    DiscoveryUnavailable,

    #[error("Market research failed: {0}")]
    Fetch(MeliError),
}

impl From<MeliError> for ResearchError {
    fn from(err: MeliError) -> Self {
        match err {
            MeliError::DiscoveryUnavailable => ResearchError::DiscoveryUnavailable,
            other => ResearchError::Fetch(other),
        }
    }
}

use thiserror::Error;

/// Input-boundary failures. Raised before any network call is made.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid listing ID {0:?}: expected MLB followed by digits")]
    InvalidListingId(String),

    #[error("Missing credential: {0} must not be blank")]
    MissingCredential(&'static str),

    #[error("Missing required field: {0} must not be blank")]
    MissingField(&'static str),
}

pub mod config;
pub mod error;
pub mod types;

pub use config::Credentials;
pub use error::ValidationError;
pub use types::*;

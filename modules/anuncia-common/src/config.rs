use tracing::info;

use crate::error::ValidationError;

/// Mercado Livre application credentials for the refresh-token OAuth flow.
///
/// Constructed explicitly and validated up front: a blank field is rejected
/// here rather than surfacing later as a 400 from the token endpoint.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

impl Credentials {
    pub fn new(
        client_id: String,
        client_secret: String,
        refresh_token: String,
    ) -> Result<Self, ValidationError> {
        let creds = Self {
            client_id: client_id.trim().to_string(),
            client_secret: client_secret.trim().to_string(),
            refresh_token: refresh_token.trim().to_string(),
        };
        if creds.client_id.is_empty() {
            return Err(ValidationError::MissingCredential("client_id"));
        }
        if creds.client_secret.is_empty() {
            return Err(ValidationError::MissingCredential("client_secret"));
        }
        if creds.refresh_token.is_empty() {
            return Err(ValidationError::MissingCredential("refresh_token"));
        }
        Ok(creds)
    }

    /// Load credentials from `MELI_CLIENT_ID`, `MELI_CLIENT_SECRET` and
    /// `MELI_REFRESH_TOKEN`, reading a `.env` file first when present.
    pub fn from_env() -> Result<Self, ValidationError> {
        dotenvy::dotenv().ok();

        let creds = Self::new(
            std::env::var("MELI_CLIENT_ID").unwrap_or_default(),
            std::env::var("MELI_CLIENT_SECRET").unwrap_or_default(),
            std::env::var("MELI_REFRESH_TOKEN").unwrap_or_default(),
        )?;
        creds.log_keys();
        Ok(creds)
    }

    fn log_keys(&self) {
        fn preview(val: &str) -> String {
            let n = val.len().min(5);
            format!("{}...({} chars)", &val[..n], val.len())
        }

        info!("Credentials loaded:");
        info!("  MELI_CLIENT_ID: {}", preview(&self.client_id));
        info!("  MELI_CLIENT_SECRET: {}", preview(&self.client_secret));
        info!("  MELI_REFRESH_TOKEN: {}", preview(&self.refresh_token));
    }
}

pub mod auth;
pub mod error;
pub mod types;

pub use error::{MeliError, Result};
pub use types::{
    AttributeSpec, CategoryDetail, CategoryPrediction, CategorySettings, ItemAttribute,
    ItemDescription, ItemDetail, PathNode, SearchResultItem, ShippingInfo, TokenGrant, Trend,
};

use std::time::Duration;

use serde::de::DeserializeOwned;

use anuncia_common::Credentials;
use auth::TokenManager;
use types::SearchPage;

const BASE_URL: &str = "https://api.mercadolibre.com";

/// Site code for Mercado Livre Brazil. Listing IDs carry it as a prefix.
pub const SITE_ID: &str = "MLB";

/// Per-request timeout so a hung call cannot stall a research batch.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct MeliClient {
    client: reqwest::Client,
    base_url: String,
    tokens: TokenManager,
}

impl MeliClient {
    pub fn new(credentials: Credentials) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: BASE_URL.to_string(),
            tokens: TokenManager::new(credentials),
        }
    }

    /// Override the API base URL. Used by tests.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Popular search terms for a category, in upstream order.
    pub async fn trends(&self, category_id: &str) -> Result<Vec<Trend>> {
        tracing::debug!(category_id, "Fetching category trends");
        let url = format!("{}/trends/{}/{}", self.base_url, SITE_ID, category_id);
        self.get_json(url).await
    }

    /// Attribute schema for a category, required flags included.
    pub async fn category_attributes(&self, category_id: &str) -> Result<Vec<AttributeSpec>> {
        tracing::debug!(category_id, "Fetching category attributes");
        let url = format!("{}/categories/{}/attributes", self.base_url, category_id);
        self.get_json(url).await
    }

    /// Category name, taxonomy path and listing settings.
    pub async fn category_detail(&self, category_id: &str) -> Result<CategoryDetail> {
        let url = format!("{}/categories/{}", self.base_url, category_id);
        self.get_json(url).await
    }

    /// Predict categories for a product name via domain discovery.
    pub async fn predict_category(
        &self,
        name: &str,
        limit: u32,
    ) -> Result<Vec<CategoryPrediction>> {
        tracing::info!(name, limit, "Predicting category from product name");
        let token = self.tokens.bearer(&self.client, &self.base_url).await?;
        let url = format!("{}/sites/{}/domain_discovery/search", self.base_url, SITE_ID);
        let limit_s = limit.to_string();
        let resp = self
            .client
            .get(&url)
            .query(&[("q", name), ("limit", limit_s.as_str())])
            .bearer_auth(&token)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(MeliError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(resp.json().await?)
    }

    /// Active listings in a category. The public search endpoint rejects
    /// app-scoped tokens with 403; that case maps to `DiscoveryUnavailable`
    /// so callers can fall back to manual competitor IDs.
    pub async fn competitor_search(
        &self,
        category_id: &str,
        limit: u32,
    ) -> Result<Vec<SearchResultItem>> {
        tracing::debug!(category_id, limit, "Searching category listings");
        let token = self.tokens.bearer(&self.client, &self.base_url).await?;
        let url = format!("{}/sites/{}/search", self.base_url, SITE_ID);
        let limit_s = limit.to_string();
        let resp = self
            .client
            .get(&url)
            .query(&[("category", category_id), ("limit", limit_s.as_str())])
            .bearer_auth(&token)
            .send()
            .await?;

        let status = resp.status();
        if status.as_u16() == 403 {
            tracing::warn!(category_id, "Marketplace search rejected app credentials");
            return Err(MeliError::DiscoveryUnavailable);
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(MeliError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let page: SearchPage = resp.json().await?;
        Ok(page.results)
    }

    /// Listing detail for one item.
    pub async fn item(&self, item_id: &str) -> Result<ItemDetail> {
        let url = format!("{}/items/{}", self.base_url, item_id);
        self.get_json(url).await
    }

    /// Description for one item. Listings without one return 404 upstream.
    pub async fn item_description(&self, item_id: &str) -> Result<ItemDescription> {
        let url = format!("{}/items/{}/description", self.base_url, item_id);
        self.get_json(url).await
    }

    /// Authenticated GET returning parsed JSON.
    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T> {
        let token = self.tokens.bearer(&self.client, &self.base_url).await?;
        let resp = self.client.get(&url).bearer_auth(&token).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(MeliError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(resp.json().await?)
    }
}

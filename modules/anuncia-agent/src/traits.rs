// Trait seam between the research pipeline and the marketplace API.
//
// MarketDataSource abstracts MeliClient so the pipeline runs against
// MockMarketData in tests: no network, no credentials.

use async_trait::async_trait;

use meli_client::{
    AttributeSpec, CategoryDetail, ItemDescription, ItemDetail, MeliClient, Result,
    SearchResultItem, Trend,
};

#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Popular search terms for a category, upstream order preserved.
    async fn trends(&self, category_id: &str) -> Result<Vec<Trend>>;

    /// Attribute schema for a category.
    async fn category_attributes(&self, category_id: &str) -> Result<Vec<AttributeSpec>>;

    /// Category display details and settings.
    async fn category_detail(&self, category_id: &str) -> Result<CategoryDetail>;

    /// Competitor listings in a category. Yields `DiscoveryUnavailable`
    /// when the marketplace rejects the app's credentials.
    async fn competitor_search(
        &self,
        category_id: &str,
        limit: u32,
    ) -> Result<Vec<SearchResultItem>>;

    /// Listing detail for one item.
    async fn item(&self, item_id: &str) -> Result<ItemDetail>;

    /// Description for one item.
    async fn item_description(&self, item_id: &str) -> Result<ItemDescription>;
}

#[async_trait]
impl MarketDataSource for MeliClient {
    async fn trends(&self, category_id: &str) -> Result<Vec<Trend>> {
        self.trends(category_id).await
    }

    async fn category_attributes(&self, category_id: &str) -> Result<Vec<AttributeSpec>> {
        self.category_attributes(category_id).await
    }

    async fn category_detail(&self, category_id: &str) -> Result<CategoryDetail> {
        self.category_detail(category_id).await
    }

    async fn competitor_search(
        &self,
        category_id: &str,
        limit: u32,
    ) -> Result<Vec<SearchResultItem>> {
        self.competitor_search(category_id, limit).await
    }

    async fn item(&self, item_id: &str) -> Result<ItemDetail> {
        self.item(item_id).await
    }

    async fn item_description(&self, item_id: &str) -> Result<ItemDescription> {
        self.item_description(item_id).await
    }
}

// Test mocks for the research pipeline.
//
// One mock behind the one trait boundary:
// - MockMarketData (MarketDataSource) — HashMap-based key→response, with
//   configurable latency and a call counter for concurrency assertions
//
// Plus helpers for constructing wire types, product inputs and research
// fixtures.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use anuncia_common::{
    AttributeDef, CategorySummary, CompetitorInfo, ListingId, MarketResearchOutput, ProductInput,
};
use meli_client::{
    AttributeSpec, CategoryDetail, CategorySettings, ItemAttribute, ItemDescription, ItemDetail,
    MeliError, Result, SearchResultItem, ShippingInfo, Trend,
};

use crate::traits::MarketDataSource;

// ---------------------------------------------------------------------------
// MockMarketData
// ---------------------------------------------------------------------------

/// HashMap-based market data source. Returns `Err` for unregistered keys.
/// Builder pattern: `.on_trends()`, `.on_category()`, `.on_item()` and
/// friends. Counts every call so tests can assert no fetch happened, and
/// sleeps configured latencies so tests can observe concurrency.
pub struct MockMarketData {
    trends: HashMap<String, Vec<Trend>>,
    attributes: HashMap<String, Vec<AttributeSpec>>,
    categories: HashMap<String, CategoryDetail>,
    searches: HashMap<String, Vec<SearchResultItem>>,
    items: HashMap<String, ItemDetail>,
    descriptions: HashMap<String, ItemDescription>,
    search_forbidden: bool,
    item_latency: Option<Duration>,
    item_latencies: HashMap<String, Duration>,
    calls: AtomicUsize,
}

impl MockMarketData {
    pub fn new() -> Self {
        Self {
            trends: HashMap::new(),
            attributes: HashMap::new(),
            categories: HashMap::new(),
            searches: HashMap::new(),
            items: HashMap::new(),
            descriptions: HashMap::new(),
            search_forbidden: false,
            item_latency: None,
            item_latencies: HashMap::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn on_trends(mut self, category_id: &str, trends: Vec<Trend>) -> Self {
        self.trends.insert(category_id.to_string(), trends);
        self
    }

    pub fn on_attributes(mut self, category_id: &str, attributes: Vec<AttributeSpec>) -> Self {
        self.attributes.insert(category_id.to_string(), attributes);
        self
    }

    pub fn on_category(mut self, category_id: &str, detail: CategoryDetail) -> Self {
        self.categories.insert(category_id.to_string(), detail);
        self
    }

    pub fn on_search(mut self, category_id: &str, hits: Vec<SearchResultItem>) -> Self {
        self.searches.insert(category_id.to_string(), hits);
        self
    }

    pub fn on_item(mut self, item_id: &str, detail: ItemDetail) -> Self {
        self.items.insert(item_id.to_string(), detail);
        self
    }

    pub fn on_description(mut self, item_id: &str, desc: ItemDescription) -> Self {
        self.descriptions.insert(item_id.to_string(), desc);
        self
    }

    /// Make `competitor_search` fail the way the live endpoint does for
    /// app-scoped credentials.
    pub fn with_search_forbidden(mut self) -> Self {
        self.search_forbidden = true;
        self
    }

    /// Delay every item detail fetch.
    pub fn with_item_latency(mut self, latency: Duration) -> Self {
        self.item_latency = Some(latency);
        self
    }

    /// Delay the item detail fetch for one listing.
    pub fn with_latency_for(mut self, item_id: &str, latency: Duration) -> Self {
        self.item_latencies.insert(item_id.to_string(), latency);
        self
    }

    /// Total trait calls made against this mock.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn tick(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

fn not_registered(what: &str, key: &str) -> MeliError {
    MeliError::Api {
        status: 404,
        message: format!("MockMarketData: no {what} registered for {key}"),
    }
}

#[async_trait]
impl MarketDataSource for MockMarketData {
    async fn trends(&self, category_id: &str) -> Result<Vec<Trend>> {
        self.tick();
        self.trends
            .get(category_id)
            .cloned()
            .ok_or_else(|| not_registered("trends", category_id))
    }

    async fn category_attributes(&self, category_id: &str) -> Result<Vec<AttributeSpec>> {
        self.tick();
        self.attributes
            .get(category_id)
            .cloned()
            .ok_or_else(|| not_registered("attributes", category_id))
    }

    async fn category_detail(&self, category_id: &str) -> Result<CategoryDetail> {
        self.tick();
        self.categories
            .get(category_id)
            .cloned()
            .ok_or_else(|| not_registered("category", category_id))
    }

    async fn competitor_search(
        &self,
        category_id: &str,
        _limit: u32,
    ) -> Result<Vec<SearchResultItem>> {
        self.tick();
        if self.search_forbidden {
            return Err(MeliError::DiscoveryUnavailable);
        }
        self.searches
            .get(category_id)
            .cloned()
            .ok_or_else(|| not_registered("search", category_id))
    }

    async fn item(&self, item_id: &str) -> Result<ItemDetail> {
        self.tick();
        let latency = self
            .item_latencies
            .get(item_id)
            .copied()
            .or(self.item_latency);
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        self.items
            .get(item_id)
            .cloned()
            .ok_or_else(|| not_registered("item", item_id))
    }

    async fn item_description(&self, item_id: &str) -> Result<ItemDescription> {
        self.tick();
        self.descriptions
            .get(item_id)
            .cloned()
            .ok_or_else(|| not_registered("description", item_id))
    }
}

// ---------------------------------------------------------------------------
// Wire type helpers
// ---------------------------------------------------------------------------

/// Create a trend with just a keyword.
pub fn trend(keyword: &str) -> Trend {
    Trend {
        keyword: keyword.to_string(),
        url: None,
    }
}

/// Create a required attribute definition.
pub fn required_attr(id: &str, name: &str) -> AttributeSpec {
    AttributeSpec {
        id: id.to_string(),
        name: Some(name.to_string()),
        tags: HashMap::from([("required".to_string(), serde_json::Value::Bool(true))]),
    }
}

/// Create an optional attribute definition.
pub fn optional_attr(id: &str, name: &str) -> AttributeSpec {
    AttributeSpec {
        id: id.to_string(),
        name: Some(name.to_string()),
        tags: HashMap::new(),
    }
}

/// Create a category with an explicit title length limit.
pub fn category(id: &str, name: &str, max_title_length: u32) -> CategoryDetail {
    CategoryDetail {
        id: id.to_string(),
        name: name.to_string(),
        path_from_root: Vec::new(),
        settings: Some(CategorySettings {
            max_title_length: Some(max_title_length),
        }),
    }
}

/// Create a category whose settings came back empty.
pub fn category_without_settings(id: &str, name: &str) -> CategoryDetail {
    CategoryDetail {
        id: id.to_string(),
        name: name.to_string(),
        path_from_root: Vec::new(),
        settings: None,
    }
}

/// Create a listing detail with paid shipping and the given attributes.
pub fn item(id: &str, title: &str, price: f64, attrs: &[(&str, &str)]) -> ItemDetail {
    ItemDetail {
        id: id.to_string(),
        title: Some(title.to_string()),
        price: Some(price),
        listing_type_id: Some("gold_special".to_string()),
        shipping: Some(ShippingInfo {
            mode: Some("me2".to_string()),
            free_shipping: Some(false),
        }),
        attributes: attrs
            .iter()
            .map(|(id, value)| ItemAttribute {
                id: id.to_string(),
                name: None,
                value_name: Some(value.to_string()),
            })
            .collect(),
    }
}

/// Create a plain-text item description.
pub fn description(text: &str) -> ItemDescription {
    ItemDescription {
        plain_text: Some(text.to_string()),
    }
}

/// Create a search hit with just a listing ID.
pub fn search_hit(id: &str) -> SearchResultItem {
    SearchResultItem {
        id: id.to_string(),
        title: None,
        price: None,
    }
}

// ---------------------------------------------------------------------------
// Input and research fixtures
// ---------------------------------------------------------------------------

/// Create a product input. An empty ID slice means auto-discovery.
pub fn product(category_id: &str, name: &str, competitor_ids: &[&str]) -> ProductInput {
    ProductInput {
        category_id: category_id.to_string(),
        name: name.to_string(),
        brand: String::new(),
        model: String::new(),
        ean: String::new(),
        details: None,
        competitor_ids: if competitor_ids.is_empty() {
            None
        } else {
            Some(competitor_ids.iter().map(|s| s.to_string()).collect())
        },
    }
}

/// Create an attribute schema entry.
pub fn attr_def(id: &str, name: &str, required: bool) -> AttributeDef {
    AttributeDef {
        id: id.to_string(),
        name: name.to_string(),
        required,
    }
}

/// Create a competitor entry with the given listing attributes.
pub fn competitor(id: &str, attrs: &[(&str, &str)]) -> CompetitorInfo {
    CompetitorInfo {
        listing_id: ListingId::parse(id).expect("valid listing id"),
        title: None,
        price: None,
        listing_type: None,
        shipping_mode: None,
        free_shipping: None,
        attributes: attrs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        description: String::new(),
    }
}

/// Create an empty research output for a 60-character title category.
pub fn research_output() -> MarketResearchOutput {
    MarketResearchOutput {
        category: CategorySummary {
            id: "MLB1055".to_string(),
            name: "Fones de Ouvido".to_string(),
            max_title_length: 60,
        },
        trends: Vec::new(),
        attribute_schema: HashMap::new(),
        competitor_analysis: Vec::new(),
        failed_competitors: Vec::new(),
    }
}

// ---------------------------------------------------------------------------
// MockMarketData self-tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unregistered_keys_error() {
        let mock = MockMarketData::new();
        assert!(matches!(
            mock.trends("MLB1055").await,
            Err(MeliError::Api { status: 404, .. })
        ));
        assert!(matches!(
            mock.item("MLB1").await,
            Err(MeliError::Api { status: 404, .. })
        ));
    }

    #[tokio::test]
    async fn registered_responses_round_trip_and_count() {
        let mock = MockMarketData::new()
            .on_trends("MLB1055", vec![trend("fone bluetooth")])
            .on_item("MLB1", item("MLB1", "Fone X", 99.9, &[("BRAND", "Acme")]));

        let trends = mock.trends("MLB1055").await.unwrap();
        assert_eq!(trends[0].keyword, "fone bluetooth");

        let detail = mock.item("MLB1").await.unwrap();
        assert_eq!(detail.attributes[0].value_name.as_deref(), Some("Acme"));

        assert_eq!(mock.calls(), 2);
    }

    #[tokio::test]
    async fn forbidden_search_yields_discovery_unavailable() {
        let mock = MockMarketData::new().with_search_forbidden();
        assert!(matches!(
            mock.competitor_search("MLB1055", 5).await,
            Err(MeliError::DiscoveryUnavailable)
        ));
    }
}

// Market research pipeline: validate input, resolve the competitor set,
// fan out the API calls, aggregate into one MarketResearchOutput.
//
// Trends, category data and the competitor batch run concurrently. Each
// competitor is its own task; a failing competitor drops only its slot,
// while a failing trends or category leg fails the whole call.

use std::collections::HashMap;

use futures::future::join_all;
use tracing::{info, warn};

use anuncia_common::{
    AttributeDef, CategorySummary, CompetitorInfo, ListingId, MarketResearchOutput, ProductInput,
    DEFAULT_MAX_TITLE_LEN,
};
use meli_client::{AttributeSpec, CategoryDetail};

use crate::error::Result;
use crate::traits::MarketDataSource;

/// Competitors fetched when the caller supplies no IDs.
const DISCOVERY_LIMIT: u32 = 5;

/// Runs the research fan-out against a market data source.
pub struct Researcher<'a> {
    source: &'a dyn MarketDataSource,
}

impl<'a> Researcher<'a> {
    pub fn new(source: &'a dyn MarketDataSource) -> Self {
        Self { source }
    }

    /// Run the full research pass for one product.
    pub async fn run(&self, input: &ProductInput) -> Result<MarketResearchOutput> {
        input.validate()?;

        let ids = match input.manual_ids()? {
            Some(ids) => ids,
            None => self.discover_competitors(&input.category_id).await?,
        };

        info!(
            category = input.category_id.as_str(),
            competitors = ids.len(),
            "Starting market research"
        );

        let (trends, attributes, category, competitors) = tokio::join!(
            self.source.trends(&input.category_id),
            self.source.category_attributes(&input.category_id),
            self.source.category_detail(&input.category_id),
            self.fetch_competitors(&ids),
        );

        let trends: Vec<String> = trends?.into_iter().map(|t| t.keyword).collect();
        let attribute_schema = dedup_attributes(attributes?);
        let category = summarize_category(category?);
        let (competitor_analysis, failed_competitors) = competitors;

        info!(
            trends = trends.len(),
            attributes = attribute_schema.len(),
            fetched = competitor_analysis.len(),
            failed = failed_competitors.len(),
            "Market research complete"
        );

        Ok(MarketResearchOutput {
            category,
            trends,
            attribute_schema,
            competitor_analysis,
            failed_competitors,
        })
    }

    /// Auto-discover competitors via marketplace search. The search API
    /// rejects app-scoped credentials with 403, which surfaces as the
    /// typed DiscoveryUnavailable error rather than a generic API failure.
    async fn discover_competitors(&self, category_id: &str) -> Result<Vec<ListingId>> {
        info!(
            category = category_id,
            limit = DISCOVERY_LIMIT,
            "No competitor IDs supplied, attempting auto-discovery"
        );
        let found = self
            .source
            .competitor_search(category_id, DISCOVERY_LIMIT)
            .await?;
        found
            .into_iter()
            .map(|item| Ok(ListingId::parse(&item.id)?))
            .collect()
    }

    /// Fetch all competitors concurrently, one task per listing.
    /// Returns surviving entries in request order plus the IDs that failed.
    async fn fetch_competitors(&self, ids: &[ListingId]) -> (Vec<CompetitorInfo>, Vec<ListingId>) {
        let tasks = ids.iter().map(|id| self.fetch_competitor(id));
        let results = join_all(tasks).await;

        let mut fetched = Vec::new();
        let mut failed = Vec::new();
        for (id, result) in ids.iter().zip(results) {
            match result {
                Ok(info) => fetched.push(info),
                Err(e) => {
                    warn!(listing = id.as_str(), error = %e, "Competitor fetch failed, dropping slot");
                    failed.push(id.clone());
                }
            }
        }
        (fetched, failed)
    }

    /// Detail and description for one competitor, fetched concurrently.
    /// A missing description degrades to empty text; a missing detail
    /// fails the slot.
    async fn fetch_competitor(&self, id: &ListingId) -> meli_client::Result<CompetitorInfo> {
        let (detail, description) = tokio::join!(
            self.source.item(id.as_str()),
            self.source.item_description(id.as_str()),
        );
        let detail = detail?;

        let description = match description {
            Ok(d) => d.plain_text.unwrap_or_default(),
            Err(e) => {
                warn!(listing = id.as_str(), error = %e, "Description fetch failed, using empty text");
                String::new()
            }
        };

        let shipping_mode = detail.shipping.as_ref().and_then(|s| s.mode.clone());
        let free_shipping = detail.shipping.as_ref().and_then(|s| s.free_shipping);
        let attributes: HashMap<String, String> = detail
            .attributes
            .into_iter()
            .filter_map(|a| Some((a.id, a.value_name?)))
            .collect();

        Ok(CompetitorInfo {
            listing_id: id.clone(),
            title: detail.title,
            price: detail.price,
            listing_type: detail.listing_type_id,
            shipping_mode,
            free_shipping,
            attributes,
            description,
        })
    }
}

/// Collapse the raw attribute list into a map keyed by id. The marketplace
/// occasionally repeats ids; the first occurrence wins.
fn dedup_attributes(specs: Vec<AttributeSpec>) -> HashMap<String, AttributeDef> {
    let mut schema = HashMap::with_capacity(specs.len());
    for spec in specs {
        if schema.contains_key(&spec.id) {
            continue;
        }
        let required = spec.is_required();
        schema.insert(
            spec.id.clone(),
            AttributeDef {
                id: spec.id,
                name: spec.name.unwrap_or_default(),
                required,
            },
        );
    }
    schema
}

fn summarize_category(detail: CategoryDetail) -> CategorySummary {
    CategorySummary {
        id: detail.id,
        name: detail.name,
        max_title_length: detail
            .settings
            .and_then(|s| s.max_title_length)
            .unwrap_or(DEFAULT_MAX_TITLE_LEN),
    }
}

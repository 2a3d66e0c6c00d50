use std::collections::HashMap;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Marketplace default when category settings omit a title limit.
pub const DEFAULT_MAX_TITLE_LEN: u32 = 60;

// --- Listing identity ---

/// Normalized Mercado Livre listing identifier: `MLB` followed by digits.
///
/// Sellers paste these in several shapes (`MLB1234`, `mlb-1234`, or a full
/// listing URL); parsing accepts all of them and normalizes to uppercase
/// with the hyphen removed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingId(String);

impl ListingId {
    /// Parse a raw ID or a listing URL into normalized form.
    /// Rejected input never reaches the network.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let raw = raw.trim();
        let id_re = Regex::new(r"(?i)\bMLB-?\d+\b").expect("valid regex");

        let looks_like_url = raw.contains('/') || raw.contains('.');
        let candidate = if looks_like_url {
            id_re.find(raw).map(|m| m.as_str())
        } else {
            // Bare input must be the ID and nothing else.
            id_re
                .find(raw)
                .filter(|m| m.start() == 0 && m.end() == raw.len())
                .map(|m| m.as_str())
        };

        match candidate {
            Some(id) => Ok(Self(id.to_uppercase().replace('-', ""))),
            None => Err(ValidationError::InvalidListingId(raw.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ListingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// --- Product input ---

/// Product metadata supplied by the seller. Immutable once handed to
/// research.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductInput {
    pub category_id: String,
    /// Base product name, the seed for title drafting.
    pub name: String,
    pub brand: String,
    pub model: String,
    pub ean: String,
    /// Free-form notes woven into the description draft.
    #[serde(default)]
    pub details: Option<String>,
    /// Competitor listing IDs or URLs supplied by hand.
    /// `None` triggers marketplace auto-discovery.
    #[serde(default)]
    pub competitor_ids: Option<Vec<String>>,
}

impl ProductInput {
    /// Reject blank required fields before any network call.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.category_id.trim().is_empty() {
            return Err(ValidationError::MissingField("category_id"));
        }
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        Ok(())
    }

    /// Parse the manually supplied competitor IDs, if any.
    /// A single malformed entry fails the whole list.
    pub fn manual_ids(&self) -> Result<Option<Vec<ListingId>>, ValidationError> {
        match &self.competitor_ids {
            Some(raw) => raw
                .iter()
                .map(|r| ListingId::parse(r))
                .collect::<Result<Vec<_>, _>>()
                .map(Some),
            None => Ok(None),
        }
    }
}

// --- Research output ---

/// One competitor listing, fetched best-effort. Absent fields mean the
/// marketplace did not report them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorInfo {
    pub listing_id: ListingId,
    pub title: Option<String>,
    pub price: Option<f64>,
    pub listing_type: Option<String>,
    pub shipping_mode: Option<String>,
    pub free_shipping: Option<bool>,
    /// Attribute id to displayed value.
    #[serde(default)]
    pub attributes: HashMap<String, String>,
    #[serde(default)]
    pub description: String,
}

/// One attribute from the category schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeDef {
    pub id: String,
    pub name: String,
    pub required: bool,
}

/// Category identity plus the settings that drive drafting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub id: String,
    pub name: String,
    pub max_title_length: u32,
}

/// Aggregated market research for one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketResearchOutput {
    pub category: CategorySummary,
    /// Popular search terms, upstream order preserved.
    pub trends: Vec<String>,
    /// Attribute id to definition. No id appears twice.
    pub attribute_schema: HashMap<String, AttributeDef>,
    /// One entry per fetched competitor, request order preserved.
    /// Never longer than the requested ID list.
    pub competitor_analysis: Vec<CompetitorInfo>,
    /// IDs whose detail fetch failed and were dropped from the analysis.
    pub failed_competitors: Vec<ListingId>,
}

// --- Drafted ad content ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

/// Drafted ad content. Produced as a pure function of the product input
/// and the research output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdOutput {
    /// Title candidates, each within the category title limit.
    pub suggested_titles: Vec<String>,
    /// Attribute id to suggested value.
    pub suggested_attributes: HashMap<String, String>,
    /// Required attribute ids with no suggestion, sorted.
    pub missing_required_attributes: Vec<String>,
    pub suggested_description: String,
    pub suggested_faq: Vec<FaqEntry>,
}

use std::collections::HashMap;

use serde::Deserialize;

// --- OAuth ---

/// Response from the refresh-token grant. The marketplace rotates the
/// refresh token on every grant.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
    /// Lifetime in seconds. 21600 in practice.
    pub expires_in: i64,
    pub refresh_token: Option<String>,
}

// --- Trends ---

/// A popular search term for a category.
#[derive(Debug, Clone, Deserialize)]
pub struct Trend {
    pub keyword: String,
    pub url: Option<String>,
}

// --- Categories ---

/// An attribute definition from the category schema. Required/optional
/// is carried as a truthy `required` entry in `tags`.
#[derive(Debug, Clone, Deserialize)]
pub struct AttributeSpec {
    pub id: String,
    pub name: Option<String>,
    #[serde(default)]
    pub tags: HashMap<String, serde_json::Value>,
}

impl AttributeSpec {
    pub fn is_required(&self) -> bool {
        self.tags
            .get("required")
            .map(|v| v.as_bool().unwrap_or(true))
            .unwrap_or(false)
    }
}

/// A node in a category's path from the taxonomy root.
#[derive(Debug, Clone, Deserialize)]
pub struct PathNode {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategorySettings {
    pub max_title_length: Option<u32>,
}

/// Category details: display name, taxonomy path and listing settings.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryDetail {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub path_from_root: Vec<PathNode>,
    pub settings: Option<CategorySettings>,
}

/// One domain-discovery hit: a predicted category for a product name.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryPrediction {
    pub category_id: String,
    pub category_name: Option<String>,
    pub domain_id: Option<String>,
    pub domain_name: Option<String>,
}

// --- Search ---

/// Envelope for the site search endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub results: Vec<SearchResultItem>,
}

/// One listing from a site search page.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResultItem {
    pub id: String,
    pub title: Option<String>,
    pub price: Option<f64>,
}

// --- Items ---

/// An attribute as shown on a live listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemAttribute {
    pub id: String,
    pub name: Option<String>,
    pub value_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShippingInfo {
    pub mode: Option<String>,
    pub free_shipping: Option<bool>,
}

/// Listing detail for one item.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemDetail {
    pub id: String,
    pub title: Option<String>,
    pub price: Option<f64>,
    pub listing_type_id: Option<String>,
    pub shipping: Option<ShippingInfo>,
    #[serde(default)]
    pub attributes: Vec<ItemAttribute>,
}

/// Description for one item. `plain_text` is the useful field; the legacy
/// `text` field is empty on listings created after the format change.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemDescription {
    pub plain_text: Option<String>,
}

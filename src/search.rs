//! Product-list query normalization.
//!
//! A product list request selects items one of three ways: by collection,
//! by free-text query, or by an explicit SKU id list. The selection is a
//! tagged union discriminated by a `mode` field, and normalization turns
//! whichever variant arrived into one canonical query/count/sort/facets
//! tuple for the search call.

use serde::Deserialize;

use crate::config::AppConfig;
use crate::types::Facet;

/// Page size used when an id-list selection is empty.
pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// Facet key the platform uses for collection membership.
const COLLECTION_FACET_KEY: &str = "productClusterIds";

/// A product list request as the storefront sends it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListRequest {
    #[serde(flatten)]
    pub selection: ListSelection,

    /// Override the configured default for dropping out-of-stock items.
    #[serde(default)]
    pub hide_unavailable_items: Option<bool>,

    /// Enrich each product with its similar-products list.
    #[serde(default)]
    pub similars: bool,
}

/// The three mutually exclusive ways of selecting products.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum ListSelection {
    /// Everything in one collection, newest curation first.
    Collection {
        /// Collection (product cluster) id, e.g. "139".
        collection: String,
        /// Total number of items to return.
        count: u32,
        #[serde(default)]
        sort: Option<Sort>,
    },
    /// Free-text search.
    Query {
        query: String,
        /// Total number of items to return.
        count: u32,
        #[serde(default)]
        sort: Option<Sort>,
    },
    /// An explicit list of SKU ids.
    Ids { ids: Vec<String> },
}

/// Sort orders the search engine accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Sort {
    #[serde(rename = "price:asc")]
    PriceAsc,
    #[serde(rename = "price:desc")]
    PriceDesc,
    #[serde(rename = "orders:desc")]
    OrdersDesc,
    #[serde(rename = "name:asc")]
    NameAsc,
    #[serde(rename = "name:desc")]
    NameDesc,
    #[serde(rename = "release:desc")]
    ReleaseDesc,
    #[serde(rename = "discount:desc")]
    DiscountDesc,
    #[serde(rename = "relevance:desc")]
    RelevanceDesc,
}

impl Sort {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sort::PriceAsc => "price:asc",
            Sort::PriceDesc => "price:desc",
            Sort::OrdersDesc => "orders:desc",
            Sort::NameAsc => "name:asc",
            Sort::NameDesc => "name:desc",
            Sort::ReleaseDesc => "release:desc",
            Sort::DiscountDesc => "discount:desc",
            Sort::RelevanceDesc => "relevance:desc",
        }
    }
}

/// The canonical search tuple every selection normalizes to.
/// `sort` is the rendered parameter value, empty when unspecified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchArgs {
    pub query: String,
    pub count: u32,
    pub sort: String,
    pub selected_facets: Vec<Facet>,
}

impl ListSelection {
    /// Normalize the selection. Counts are taken at face value: an
    /// explicit zero stays zero; only an empty id list falls back to
    /// [`DEFAULT_PAGE_SIZE`].
    pub fn into_args(self) -> SearchArgs {
        match self {
            ListSelection::Ids { ids } => {
                let count = if ids.is_empty() {
                    DEFAULT_PAGE_SIZE
                } else {
                    ids.len() as u32
                };
                SearchArgs {
                    query: format!("sku:{}", ids.join(";")),
                    count,
                    sort: String::new(),
                    selected_facets: Vec::new(),
                }
            }
            ListSelection::Query { query, count, sort } => SearchArgs {
                query,
                count,
                sort: rendered_sort(sort),
                selected_facets: Vec::new(),
            },
            ListSelection::Collection {
                collection,
                count,
                sort,
            } => SearchArgs {
                query: String::new(),
                count,
                sort: rendered_sort(sort),
                selected_facets: vec![Facet::new(COLLECTION_FACET_KEY, collection)],
            },
        }
    }
}

fn rendered_sort(sort: Option<Sort>) -> String {
    sort.map(|s| s.as_str().to_string()).unwrap_or_default()
}

/// Configured default facets first, then whatever the caller selected.
pub fn with_default_facets(selected: Vec<Facet>, config: &AppConfig) -> Vec<Facet> {
    let mut facets = config.search.default_facets.clone();
    facets.extend(selected);
    facets
}

/// Query parameters for the search call: the normalized tuple over the
/// configured defaults.
pub fn search_params(
    args: &SearchArgs,
    hide_unavailable_items: bool,
    config: &AppConfig,
) -> Vec<(&'static str, String)> {
    vec![
        ("page", "1".to_string()),
        ("count", args.count.to_string()),
        ("query", args.query.clone()),
        ("sort", args.sort.clone()),
        ("fuzzy", config.search.fuzzy.clone()),
        ("locale", config.store.locale.clone()),
        (
            "hide-unavailable-items",
            hide_unavailable_items.to_string(),
        ),
    ]
}

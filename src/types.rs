//! Wire types for the upstream VTEX APIs and the normalized product schema.
//!
//! Upstream types mirror the JSON the platform actually returns (including
//! its historical field spellings, e.g. `commertialOffer`). Normalized types
//! are what this service emits to the storefront; they are derived data;
//! the source of truth stays upstream.

use serde::{Deserialize, Serialize};

/// The cart/session document VTEX calls an order form.
///
/// Kept opaque on purpose: every cart action round-trips the document from
/// the Checkout API without constructing or interpreting it locally.
pub type OrderForm = serde_json::Value;

/// A key/value filter applied to a product search query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facet {
    pub key: String,
    pub value: String,
}

impl Facet {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

// ── Upstream: Intelligent Search / Catalog ─────────────────────────

/// Envelope returned by the intelligent-search `product_search` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductSearchResult {
    #[serde(default)]
    pub products: Vec<SearchProduct>,
}

/// One product record as the search and cross-selling APIs return it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchProduct {
    pub product_id: String,
    pub product_name: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub link_text: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub product_reference: Option<String>,
    /// SKU variants. The first entry is the default presentation.
    #[serde(default)]
    pub items: Vec<SkuItem>,
}

/// A single SKU variant of an upstream product.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkuItem {
    pub item_id: String,
    pub name: String,
    #[serde(default)]
    pub ean: Option<String>,
    #[serde(default)]
    pub images: Vec<SkuImage>,
    #[serde(default)]
    pub sellers: Vec<Seller>,
    #[serde(default)]
    pub variations: Vec<SkuVariation>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SkuImage {
    #[serde(rename = "imageUrl")]
    pub url: String,
    #[serde(rename = "imageText", default)]
    pub alternate_name: Option<String>,
}

/// A variation attribute on a SKU (e.g. `Color: [Navy]`).
#[derive(Debug, Clone, Deserialize)]
pub struct SkuVariation {
    pub name: String,
    #[serde(default)]
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seller {
    pub seller_id: String,
    #[serde(default)]
    pub seller_default: bool,
    // VTEX spells it this way on the wire; not a typo on our side.
    #[serde(rename = "commertialOffer")]
    pub commercial_offer: CommercialOffer,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommercialOffer {
    #[serde(rename = "Price")]
    pub price: f64,
    #[serde(rename = "ListPrice", default)]
    pub list_price: f64,
    #[serde(rename = "AvailableQuantity", default)]
    pub available_quantity: i64,
}

impl CommercialOffer {
    pub fn availability(&self) -> ItemAvailability {
        if self.available_quantity > 0 {
            ItemAvailability::InStock
        } else {
            ItemAvailability::OutOfStock
        }
    }
}

// ── Normalized: what the storefront receives ───────────────────────

/// Normalized representation of a sellable item, one SKU variant deep.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "productID")]
    pub product_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub sku: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gtin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<Brand>,
    pub url: String,
    pub image: Vec<ImageObject>,
    pub offers: AggregateOffer,
    pub is_variant_of: ProductGroup,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub additional_property: Vec<PropertyValue>,
    /// Filled by the optional similar-products enrichment step.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_similar_to: Option<Vec<Product>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Brand {
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageObject {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternate_name: Option<String>,
}

/// The product group a SKU belongs to (the upstream product).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductGroup {
    #[serde(rename = "productGroupID")]
    pub product_group_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyValue {
    pub name: String,
    pub value: String,
}

/// Price summary across all sellers of the chosen SKU.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateOffer {
    pub price_currency: String,
    pub low_price: f64,
    pub high_price: f64,
    pub offer_count: usize,
    pub offers: Vec<Offer>,
}

/// One seller's offer for the chosen SKU.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub price: f64,
    pub list_price: f64,
    pub seller: String,
    pub availability: ItemAvailability,
    pub inventory_level: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ItemAvailability {
    #[serde(rename = "https://schema.org/InStock")]
    InStock,
    #[serde(rename = "https://schema.org/OutOfStock")]
    OutOfStock,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commercial_offer_availability_from_quantity() {
        let offer = CommercialOffer {
            price: 10.0,
            list_price: 12.0,
            available_quantity: 3,
        };
        assert_eq!(offer.availability(), ItemAvailability::InStock);

        let sold_out = CommercialOffer {
            available_quantity: 0,
            ..offer
        };
        assert_eq!(sold_out.availability(), ItemAvailability::OutOfStock);
    }

    #[test]
    fn search_product_parses_platform_spelling() {
        let json = serde_json::json!({
            "productId": "42",
            "productName": "Trail Shoe",
            "brand": "Acme",
            "linkText": "trail-shoe",
            "items": [{
                "itemId": "42-1",
                "name": "Trail Shoe 41",
                "ean": "7890000000000",
                "images": [{"imageUrl": "https://img/1.jpg", "imageText": "front"}],
                "sellers": [{
                    "sellerId": "1",
                    "sellerDefault": true,
                    "commertialOffer": {"Price": 99.9, "ListPrice": 129.9, "AvailableQuantity": 5}
                }],
                "variations": [{"name": "Size", "values": ["41"]}]
            }]
        });
        let product: SearchProduct = serde_json::from_value(json).unwrap();
        assert_eq!(product.product_id, "42");
        let sku = &product.items[0];
        assert_eq!(sku.sellers[0].commercial_offer.price, 99.9);
        assert_eq!(sku.variations[0].values, vec!["41"]);
    }

    #[test]
    fn search_result_tolerates_missing_products() {
        let result: ProductSearchResult = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(result.products.is_empty());
    }
}

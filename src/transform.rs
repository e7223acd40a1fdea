//! Upstream product → normalized product mapping.
//!
//! The mapping is one SKU deep: callers pick the variant (the list loader
//! always takes the first one) and get back the normalized shape with that
//! variant's identity, images, and per-seller offers.

use crate::types::{
    AggregateOffer, Brand, ImageObject, Offer, Product, ProductGroup, PropertyValue, SearchProduct,
    SkuItem,
};

/// Per-request inputs the mapping needs beyond the upstream record.
#[derive(Debug, Clone, Copy)]
pub struct TransformContext<'a> {
    /// Storefront origin for canonical product URLs.
    pub storefront_base: &'a str,
    /// Currency stamped on the offers.
    pub price_currency: &'a str,
}

/// Map one upstream product and a chosen SKU variant to the normalized
/// shape.
pub fn to_product(product: &SearchProduct, sku: &SkuItem, ctx: &TransformContext<'_>) -> Product {
    let mut offers: Vec<Offer> = sku
        .sellers
        .iter()
        .map(|seller| Offer {
            price: seller.commercial_offer.price,
            list_price: seller.commercial_offer.list_price,
            seller: seller.seller_id.clone(),
            availability: seller.commercial_offer.availability(),
            inventory_level: seller.commercial_offer.available_quantity,
        })
        .collect();
    offers.sort_by(|a, b| a.price.total_cmp(&b.price));

    let low_price = offers.first().map(|o| o.price).unwrap_or(0.0);
    let high_price = offers.last().map(|o| o.price).unwrap_or(0.0);

    let additional_property = sku
        .variations
        .iter()
        .flat_map(|variation| {
            variation.values.iter().map(move |value| PropertyValue {
                name: variation.name.clone(),
                value: value.clone(),
            })
        })
        .collect();

    let brand = (!product.brand.is_empty()).then(|| Brand {
        name: product.brand.clone(),
    });

    Product {
        product_id: sku.item_id.clone(),
        name: sku.name.clone(),
        description: product.description.clone(),
        sku: sku.item_id.clone(),
        gtin: sku.ean.clone(),
        brand,
        url: product_url(ctx.storefront_base, &product.link_text, &sku.item_id),
        image: sku
            .images
            .iter()
            .map(|img| ImageObject {
                url: img.url.clone(),
                alternate_name: img.alternate_name.clone(),
            })
            .collect(),
        offers: AggregateOffer {
            price_currency: ctx.price_currency.to_string(),
            low_price,
            high_price,
            offer_count: offers.len(),
            offers,
        },
        is_variant_of: ProductGroup {
            product_group_id: product.product_id.clone(),
            name: product.product_name.clone(),
            model: product.product_reference.clone(),
        },
        additional_property,
        is_similar_to: None,
    }
}

/// Map a product by its first SKU variant, the default presentation.
/// Upstream records without variants are malformed; they are logged and
/// skipped rather than failing the whole page.
pub fn first_sku_product(product: &SearchProduct, ctx: &TransformContext<'_>) -> Option<Product> {
    match product.items.first() {
        Some(sku) => Some(to_product(product, sku, ctx)),
        None => {
            tracing::warn!(product_id = %product.product_id, "upstream product has no SKUs, skipping");
            None
        }
    }
}

/// True when any seller of any variant has stock.
pub fn has_available_sku(product: &SearchProduct) -> bool {
    product.items.iter().any(|sku| {
        sku.sellers
            .iter()
            .any(|s| s.commercial_offer.available_quantity > 0)
    })
}

fn product_url(base: &str, link_text: &str, sku_id: &str) -> String {
    format!("{base}/{link_text}/p?skuId={sku_id}")
}

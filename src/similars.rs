//! Optional similar-products enrichment.
//!
//! Applied uniformly as a decorator after transformation: each product
//! gets one independent cross-selling lookup for its product group, and
//! the results land on `isSimilarTo`. Lookups for different products have
//! no ordering dependency and run concurrently; a single failed lookup
//! fails the whole page.

use crate::platform::{PlatformClient, UpstreamError};
use crate::transform::{first_sku_product, has_available_sku, TransformContext};
use crate::types::Product;

/// Attach the similar-products list to one normalized product.
pub async fn with_is_similar_to(
    platform: &PlatformClient,
    ctx: &TransformContext<'_>,
    mut product: Product,
    hide_unavailable_items: bool,
) -> Result<Product, UpstreamError> {
    let related = platform
        .similars(&product.is_variant_of.product_group_id)
        .await?;

    let similar = related
        .iter()
        .filter(|p| !hide_unavailable_items || has_available_sku(p))
        .filter_map(|p| first_sku_product(p, ctx))
        .collect();

    product.is_similar_to = Some(similar);
    Ok(product)
}

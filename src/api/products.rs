//! Product list loader handler.

use axum::{extract::State, http::HeaderMap, Json};
use futures::future::try_join_all;

use crate::search::{search_params, with_default_facets, ProductListRequest};
use crate::session::{get_segment, set_segment};
use crate::similars::with_is_similar_to;
use crate::transform::{first_sku_product, TransformContext};
use crate::types::Product;

use super::error::ApiError;
use super::AppState;

/// `POST /products`: normalize the selection, run one faceted search
/// upstream, and map each record to the normalized product shape. With
/// `similars` set, every product gets an independent enrichment lookup;
/// the page completes when all of them do.
pub(super) async fn product_list(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<serde_json::Value>,
) -> Result<(HeaderMap, Json<Vec<Product>>), ApiError> {
    let request: ProductListRequest = serde_json::from_value(payload.clone())
        .map_err(|_| ApiError::UnknownSelection(payload.to_string()))?;

    let segment = get_segment(&headers);
    let hide_unavailable_items = request
        .hide_unavailable_items
        .unwrap_or(state.config.search.hide_unavailable_items);

    let args = request.selection.into_args();
    tracing::debug!(
        query = %args.query,
        count = args.count,
        sort = %args.sort,
        "product search"
    );

    let facets = with_default_facets(args.selected_facets.clone(), &state.config);
    let params = search_params(&args, hide_unavailable_items, &state.config);
    let result = state
        .platform
        .product_search(&facets, &params, segment.as_deref())
        .await?;

    let storefront_base = state.config.store.storefront_base();
    let ctx = TransformContext {
        storefront_base: &storefront_base,
        price_currency: &state.config.store.price_currency,
    };

    // Order is preserved from upstream.
    let products: Vec<Product> = result
        .products
        .iter()
        .filter_map(|p| first_sku_product(p, &ctx))
        .collect();

    let products = if request.similars {
        try_join_all(products.into_iter().map(|product| {
            with_is_similar_to(&state.platform, &ctx, product, hide_unavailable_items)
        }))
        .await?
    } else {
        products
    };

    let mut out = HeaderMap::new();
    if let Some(token) = &segment {
        set_segment(token, &mut out);
    }
    Ok((out, Json(products)))
}

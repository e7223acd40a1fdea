//! Intelligent-search and cross-selling API operations.

use reqwest::header;

use crate::session::segment_cookie;
use crate::types::{Facet, ProductSearchResult, SearchProduct};

use super::{PlatformClient, UpstreamError};

/// Caching hint forwarded on search reads. The edge in front of the
/// platform understands it; this service just passes it through.
const SEARCH_CACHE_HINT: &str = "stale-while-revalidate";

impl PlatformClient {
    /// One GET against the faceted product-search endpoint. The segment
    /// token, when present, rides along as a cookie so results come back
    /// priced for the client's region.
    pub async fn product_search(
        &self,
        facets: &[Facet],
        params: &[(&str, String)],
        segment: Option<&str>,
    ) -> Result<ProductSearchResult, UpstreamError> {
        let mut url = self.paths().product_search(facets);
        {
            let mut query = url.query_pairs_mut();
            for (key, value) in params {
                query.append_pair(key, value);
            }
        }

        let mut req = self
            .http()
            .get(url)
            .header(header::CACHE_CONTROL, SEARCH_CACHE_HINT);
        if let Some(token) = segment {
            req = req.header(header::COOKIE, segment_cookie(token));
        }

        Ok(self.execute(req).await?.body)
    }

    /// Cross-selling "similars" for a product group.
    pub async fn similars(&self, product_id: &str) -> Result<Vec<SearchProduct>, UpstreamError> {
        let url = self.paths().crossselling_similars(product_id);
        Ok(self.execute(self.http().get(url)).await?.body)
    }
}

//! URL templates for the upstream VTEX APIs.
//!
//! Every logical operation maps to one fixed path under the store's API
//! base. Path parameters are pushed as proper URL segments so ids and
//! attachment names survive encoding.

use url::Url;

use crate::config::StoreConfig;
use crate::types::Facet;

/// Builds operation URLs against one store's API host.
#[derive(Debug, Clone)]
pub struct StorePaths {
    base: Url,
}

impl StorePaths {
    pub fn new(store: &StoreConfig) -> Result<Self, url::ParseError> {
        let base = Url::parse(&store.api_base())?;
        Ok(Self { base })
    }

    /// `POST /checkout/pub/orderForm`: current cart for the session,
    /// created upstream when none exists.
    pub fn order_form(&self) -> Url {
        self.join(&["checkout", "pub", "orderForm"])
    }

    /// `DELETE /checkout/pub/orderForm/{id}/items/{index}/attachments/{name}`
    pub fn item_attachment(&self, order_form_id: &str, index: u32, attachment: &str) -> Url {
        self.join(&[
            "checkout",
            "pub",
            "orderForm",
            order_form_id,
            "items",
            &index.to_string(),
            "attachments",
            attachment,
        ])
    }

    /// `GET /checkout/changeToAnonymousUser/{id}`
    pub fn change_to_anonymous_user(&self, order_form_id: &str) -> Url {
        self.join(&["checkout", "changeToAnonymousUser", order_form_id])
    }

    /// `GET /api/io/_v/api/intelligent-search/product_search/{facets}`
    ///
    /// Facets become alternating `key/value` path segments.
    pub fn product_search(&self, facets: &[Facet]) -> Url {
        let mut segments: Vec<&str> = vec![
            "api",
            "io",
            "_v",
            "api",
            "intelligent-search",
            "product_search",
        ];
        for facet in facets {
            segments.push(&facet.key);
            segments.push(&facet.value);
        }
        self.join(&segments)
    }

    /// `GET /api/catalog_system/pub/products/crossselling/similars/{id}`
    pub fn crossselling_similars(&self, product_id: &str) -> Url {
        self.join(&[
            "api",
            "catalog_system",
            "pub",
            "products",
            "crossselling",
            "similars",
            product_id,
        ])
    }

    fn join(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .expect("base URL cannot be a base")
            .pop_if_empty()
            .extend(segments);
        url
    }
}

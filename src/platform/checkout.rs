//! Checkout API operations: the order-form (cart) actions.
//!
//! Every operation forwards the session's cookie header so the platform
//! resolves the right cart, and returns the updated order-form document
//! together with whatever cookies the platform set.

use std::collections::BTreeMap;

use reqwest::header;
use serde::Serialize;

use crate::session::CheckoutSession;
use crate::types::OrderForm;

use super::{PlatformClient, UpstreamError, UpstreamResponse};

/// Order-form sections requested back from a mutation when the caller
/// doesn't say otherwise.
pub const DEFAULT_EXPECTED_SECTIONS: [&str; 15] = [
    "items",
    "totalizers",
    "clientProfileData",
    "shippingData",
    "paymentData",
    "sellers",
    "messages",
    "marketingData",
    "clientPreferencesData",
    "storePreferencesData",
    "giftRegistryData",
    "ratesAndBenefitsData",
    "openTextField",
    "commercialConditionData",
    "customData",
];

/// Body of the attachment deletion call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentRemoval {
    pub content: BTreeMap<String, String>,
    pub no_split_item: bool,
    pub expected_order_form_sections: Vec<String>,
}

impl AttachmentRemoval {
    /// Removal with the caller's content and the platform defaults:
    /// don't split the line, expect the full section list back.
    pub fn new(content: BTreeMap<String, String>) -> Self {
        Self {
            content,
            no_split_item: true,
            expected_order_form_sections: default_expected_sections(),
        }
    }
}

pub fn default_expected_sections() -> Vec<String> {
    DEFAULT_EXPECTED_SECTIONS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl PlatformClient {
    /// Fetch (or have the platform create) the cart for the given cookie
    /// context.
    pub async fn order_form(
        &self,
        cookie: &str,
    ) -> Result<UpstreamResponse<OrderForm>, UpstreamError> {
        let mut req = self.http().post(self.paths().order_form());
        if !cookie.is_empty() {
            req = req.header(header::COOKIE, cookie);
        }
        self.execute(req).await
    }

    /// Delete a named attachment from one cart line.
    pub async fn remove_item_attachment(
        &self,
        session: &CheckoutSession,
        index: u32,
        attachment: &str,
        removal: &AttachmentRemoval,
    ) -> Result<UpstreamResponse<OrderForm>, UpstreamError> {
        let url = self
            .paths()
            .item_attachment(&session.order_form_id, index, attachment);
        let req = self
            .http()
            .delete(url)
            .header(header::COOKIE, &session.cookie)
            .json(removal);
        self.execute(req).await
    }

    /// Detach the cart from its current user, making it anonymous.
    pub async fn change_to_anonymous_user(
        &self,
        session: &CheckoutSession,
    ) -> Result<UpstreamResponse<OrderForm>, UpstreamError> {
        let url = self.paths().change_to_anonymous_user(&session.order_form_id);
        let req = self.http().get(url).header(header::COOKIE, &session.cookie);
        self.execute(req).await
    }
}

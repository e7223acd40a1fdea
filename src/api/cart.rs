//! Cart action handlers.
//!
//! Each handler is the same thin shape: read the checkout session from the
//! inbound cookies, make one Checkout API call, mirror the upstream
//! `Set-Cookie` headers onto our response, and return the updated
//! order-form document untouched.

use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use serde::Deserialize;

use crate::platform::checkout::{default_expected_sections, AttachmentRemoval};
use crate::session::{proxy_set_cookie, raw_cookie_header, CheckoutSession};
use crate::types::OrderForm;

use super::error::ApiError;
use super::AppState;

/// Caller-facing body of the attachment removal action. Omitted fields
/// get the platform defaults.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RemoveItemAttachmentRequest {
    /// Attachment content being removed, key by key.
    #[serde(default)]
    content: BTreeMap<String, String>,
    /// Order-form sections wanted back; defaults to the full section list.
    expected_order_form_sections: Option<Vec<String>>,
    /// Whether the removal may split the cart line. Defaults to not
    /// splitting.
    no_split_item: Option<bool>,
}

/// `POST /cart`: the session's current cart, created upstream when the
/// session has none yet.
pub(super) async fn cart(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<(HeaderMap, Json<OrderForm>), ApiError> {
    let cookie = raw_cookie_header(&headers);
    let response = state.platform.order_form(&cookie).await?;

    let mut out = HeaderMap::new();
    proxy_set_cookie(&response.set_cookies, &mut out);
    Ok((out, Json(response.body)))
}

/// `DELETE /cart/items/{index}/attachments/{attachment}`: remove a named
/// attachment from one cart line. Index bounds are not checked here; the
/// platform is the authoritative validator and its failure is mirrored
/// back.
pub(super) async fn remove_item_attachment(
    State(state): State<AppState>,
    Path((index, attachment)): Path<(u32, String)>,
    headers: HeaderMap,
    Json(request): Json<RemoveItemAttachmentRequest>,
) -> Result<(HeaderMap, Json<OrderForm>), ApiError> {
    let session = CheckoutSession::from_headers(&headers).ok_or(ApiError::SessionRequired)?;

    let removal = AttachmentRemoval {
        content: request.content,
        no_split_item: request.no_split_item.unwrap_or(true),
        expected_order_form_sections: request
            .expected_order_form_sections
            .unwrap_or_else(default_expected_sections),
    };

    tracing::debug!(
        order_form_id = %session.order_form_id,
        index,
        attachment = %attachment,
        "removing item attachment"
    );
    let response = state
        .platform
        .remove_item_attachment(&session, index, &attachment, &removal)
        .await?;

    let mut out = HeaderMap::new();
    proxy_set_cookie(&response.set_cookies, &mut out);
    Ok((out, Json(response.body)))
}

/// `POST /cart/anonymize`: detach the cart from the current user.
pub(super) async fn anonymize(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<(HeaderMap, Json<OrderForm>), ApiError> {
    let session = CheckoutSession::from_headers(&headers).ok_or(ApiError::SessionRequired)?;

    tracing::debug!(order_form_id = %session.order_form_id, "resetting cart to anonymous user");
    let response = state.platform.change_to_anonymous_user(&session).await?;

    let mut out = HeaderMap::new();
    proxy_set_cookie(&response.set_cookies, &mut out);
    Ok((out, Json(response.body)))
}

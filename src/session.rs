//! Per-request session state carried in cookies.
//!
//! The checkout session lives entirely in the client's cookies: the
//! `checkout.vtex.com` cookie holds the order-form id, and the raw cookie
//! header is forwarded on every upstream call so the platform can resolve
//! or create the right cart. `Set-Cookie` headers coming back from the
//! platform are mirrored verbatim onto our response to keep the session
//! continuous. The `vtex_segment` cookie carries the opaque
//! region/pricing personalization token used by search.

use axum::http::{header, HeaderMap, HeaderValue};

/// Cookie holding the order-form id, as `__ofid=<id>`.
pub const CHECKOUT_COOKIE: &str = "checkout.vtex.com";

/// Cookie holding the opaque personalization segment token.
pub const SEGMENT_COOKIE: &str = "vtex_segment";

const ORDER_FORM_ID_PREFIX: &str = "__ofid=";

/// Session state extracted from an inbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSession {
    /// Id of the cart document upstream.
    pub order_form_id: String,
    /// The raw inbound cookie header, forwarded on upstream calls.
    pub cookie: String,
}

impl CheckoutSession {
    /// Extract the checkout session from the request headers. Returns None
    /// when the client has no checkout cookie yet (no cart was created for
    /// it upstream).
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let raw = raw_cookie_header(headers);
        let value = cookie_value(headers, CHECKOUT_COOKIE)?;
        let order_form_id = value.strip_prefix(ORDER_FORM_ID_PREFIX)?.to_string();
        if order_form_id.is_empty() {
            return None;
        }
        Some(Self {
            order_form_id,
            cookie: raw,
        })
    }
}

/// The full inbound cookie header, with multiple `Cookie` headers joined
/// the way a single one would look.
pub fn raw_cookie_header(headers: &HeaderMap) -> String {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Value of a single named cookie, if present.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .find_map(|pair| {
            let (k, v) = pair.trim().split_once('=')?;
            (k == name).then(|| v.to_string())
        })
}

/// The segment token from the inbound request, if the client has one.
pub fn get_segment(headers: &HeaderMap) -> Option<String> {
    cookie_value(headers, SEGMENT_COOKIE)
}

/// Cookie header value carrying the segment token on upstream search calls.
pub fn segment_cookie(token: &str) -> String {
    format!("{SEGMENT_COOKIE}={token}")
}

/// Re-set the segment cookie on the outbound response so the client keeps
/// its personalization context.
pub fn set_segment(token: &str, headers: &mut HeaderMap) {
    let cookie = format!("{SEGMENT_COOKIE}={token}; Path=/; Max-Age=31536000; SameSite=Lax");
    match HeaderValue::from_str(&cookie) {
        Ok(value) => {
            headers.append(header::SET_COOKIE, value);
        }
        Err(_) => tracing::warn!("segment token is not a valid header value, not re-setting"),
    }
}

/// Mirror upstream `Set-Cookie` headers onto the outbound response,
/// unchanged.
pub fn proxy_set_cookie(set_cookies: &[String], headers: &mut HeaderMap) {
    for cookie in set_cookies {
        match HeaderValue::from_str(cookie) {
            Ok(value) => {
                headers.append(header::SET_COOKIE, value);
            }
            Err(_) => tracing::warn!("dropping upstream set-cookie with invalid header value"),
        }
    }
}

#![allow(dead_code)]

//! Shared test harness: a mock upstream VTEX server plus app builders.
//!
//! The mock binds a real TCP port and answers the Checkout, search, and
//! cross-selling endpoints with canned fixtures while recording every
//! request it sees. The gateway under test points its store base URL at
//! the mock and is driven through the router directly.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    Json, Router,
};
use http_body_util::BodyExt;
use tokio::net::TcpListener;
use tower::ServiceExt;

use vtexgate::api::{router, AppState};
use vtexgate::config::AppConfig;
use vtexgate::platform::PlatformClient;

/// One request as the mock upstream saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: String,
    pub cookie: Option<String>,
    pub cache_control: Option<String>,
    pub body: Option<serde_json::Value>,
}

impl RecordedRequest {
    /// Value of one query parameter, if present.
    pub fn query_param(&self, name: &str) -> Option<String> {
        url::form_urlencoded::parse(self.query.as_bytes())
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    }
}

#[derive(Clone, Default)]
pub struct Recorded(Arc<Mutex<Vec<RecordedRequest>>>);

impl Recorded {
    pub fn all(&self) -> Vec<RecordedRequest> {
        self.0.lock().unwrap().clone()
    }

    pub fn last(&self) -> RecordedRequest {
        self.0
            .lock()
            .unwrap()
            .last()
            .expect("mock upstream saw no requests")
            .clone()
    }

    pub fn find(&self, path_fragment: &str) -> Option<RecordedRequest> {
        self.0
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.path.contains(path_fragment))
            .cloned()
    }

    fn push(&self, request: RecordedRequest) {
        self.0.lock().unwrap().push(request);
    }
}

/// The gateway under test plus the mock upstream's recording.
pub struct TestApp {
    pub router: Router,
    pub upstream: Recorded,
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(|_| {}).await
}

pub async fn spawn_app_with(configure: impl FnOnce(&mut AppConfig)) -> TestApp {
    let (addr, upstream) = spawn_mock_upstream().await;

    let mut config = AppConfig::default();
    config.store.account = "test".into();
    config.store.base_url = Some(format!("http://{addr}"));
    config.store.storefront_base_url = Some("https://shop.test".into());
    configure(&mut config);

    let platform = PlatformClient::new(&config.store).unwrap();
    let state = AppState {
        config: Arc::new(config),
        platform,
    };
    TestApp {
        router: router(state),
        upstream,
    }
}

/// Drive one request through the gateway router and collect the response.
pub async fn send(
    router: &Router,
    request: Request<Body>,
) -> (StatusCode, HeaderMap, serde_json::Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, headers, json)
}

pub fn json_request(
    method: &str,
    uri: &str,
    cookie: Option<&str>,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// All `Set-Cookie` values on a response.
pub fn set_cookies(headers: &HeaderMap) -> Vec<String> {
    headers
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}

// ── Mock upstream ──────────────────────────────────────────────────

/// Cookies the mock's checkout endpoints set on every response.
pub const UPSTREAM_SET_COOKIES: [&str; 2] = [
    "checkout.vtex.com=__ofid=OF123; Path=/; HttpOnly",
    "CheckoutDataAccess=data-token; Path=/; Secure",
];

/// Order-form id the error tests use to trigger a 404 from the mock.
pub const MISSING_ORDER_FORM: &str = "MISSING";

async fn spawn_mock_upstream() -> (SocketAddr, Recorded) {
    let recorded = Recorded::default();
    let app = Router::new()
        .fallback(mock_handler)
        .with_state(recorded.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (addr, recorded)
}

async fn mock_handler(State(recorded): State<Recorded>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let bytes = body.collect().await.unwrap().to_bytes();

    let path = parts.uri.path().to_string();
    let query = parts.uri.query().unwrap_or_default().to_string();
    recorded.push(RecordedRequest {
        method: parts.method.to_string(),
        path: path.clone(),
        query,
        cookie: header_value(&parts.headers, header::COOKIE),
        cache_control: header_value(&parts.headers, header::CACHE_CONTROL),
        body: serde_json::from_slice(&bytes).ok(),
    });

    if path.contains(MISSING_ORDER_FORM) {
        return (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": "orderForm not found"})),
        )
            .into_response();
    }

    if path == "/checkout/pub/orderForm" && parts.method == Method::POST {
        return order_form_response();
    }
    if path.starts_with("/checkout/pub/orderForm/") && path.contains("/attachments/") {
        return order_form_response();
    }
    if path.starts_with("/checkout/changeToAnonymousUser/") {
        return order_form_response();
    }
    if path.starts_with("/api/io/_v/api/intelligent-search/product_search") {
        return Json(serde_json::json!({ "products": search_products_fixture() })).into_response();
    }
    if path.starts_with("/api/catalog_system/pub/products/crossselling/similars/") {
        return Json(similars_fixture()).into_response();
    }

    StatusCode::NOT_FOUND.into_response()
}

fn header_value(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn order_form_response() -> Response {
    let mut response = Json(order_form_fixture()).into_response();
    for cookie in UPSTREAM_SET_COOKIES {
        response
            .headers_mut()
            .append(header::SET_COOKIE, HeaderValue::from_static(cookie));
    }
    response
}

// ── Fixtures ───────────────────────────────────────────────────────

pub fn order_form_fixture() -> serde_json::Value {
    serde_json::json!({
        "orderFormId": "OF123",
        "items": [],
        "totalizers": [],
        "clientProfileData": null
    })
}

/// Two products: "Runner" (in stock, two sellers) and "Walker" (sold out).
pub fn search_products_fixture() -> serde_json::Value {
    serde_json::json!([
        {
            "productId": "101",
            "productName": "Runner",
            "brand": "Acme",
            "linkText": "runner",
            "description": "A running shoe.",
            "items": [{
                "itemId": "101-1",
                "name": "Runner 41",
                "ean": "7891000000001",
                "images": [{"imageUrl": "https://img.test/runner.jpg", "imageText": "front"}],
                "sellers": [
                    {
                        "sellerId": "outlet",
                        "commertialOffer": {"Price": 179.9, "ListPrice": 249.9, "AvailableQuantity": 3}
                    },
                    {
                        "sellerId": "1",
                        "sellerDefault": true,
                        "commertialOffer": {"Price": 199.9, "ListPrice": 249.9, "AvailableQuantity": 10}
                    }
                ],
                "variations": [{"name": "Size", "values": ["41"]}]
            }]
        },
        {
            "productId": "102",
            "productName": "Walker",
            "brand": "Acme",
            "linkText": "walker",
            "items": [{
                "itemId": "102-1",
                "name": "Walker 40",
                "sellers": [{
                    "sellerId": "1",
                    "commertialOffer": {"Price": 99.0, "ListPrice": 99.0, "AvailableQuantity": 0}
                }]
            }]
        }
    ])
}

/// One available and one sold-out similar product.
pub fn similars_fixture() -> serde_json::Value {
    serde_json::json!([
        {
            "productId": "201",
            "productName": "Sprinter",
            "brand": "Acme",
            "linkText": "sprinter",
            "items": [{
                "itemId": "201-1",
                "name": "Sprinter 41",
                "sellers": [{
                    "sellerId": "1",
                    "commertialOffer": {"Price": 159.9, "ListPrice": 189.9, "AvailableQuantity": 7}
                }]
            }]
        },
        {
            "productId": "202",
            "productName": "Marathoner",
            "brand": "Acme",
            "linkText": "marathoner",
            "items": [{
                "itemId": "202-1",
                "name": "Marathoner 41",
                "sellers": [{
                    "sellerId": "1",
                    "commertialOffer": {"Price": 219.9, "ListPrice": 219.9, "AvailableQuantity": 0}
                }]
            }]
        }
    ])
}

//! HTTP surface of the gateway: the cart actions and the product loader,
//! plus health, auth, and the cross-cutting response layers.

pub mod auth;
mod cart;
pub mod error;
mod products;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderName, HeaderValue, Method},
    routing::{delete, get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::platform::PlatformClient;

/// Shared state for every handler: the resolved config and the upstream
/// client. Cloned per request; both members are cheap handles.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub platform: PlatformClient,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Build the service router. Adapter routes sit behind the optional
/// Bearer token; `/health` does not.
pub fn router(state: AppState) -> Router {
    let adapters = Router::new()
        .route("/cart", post(cart::cart))
        .route("/cart/anonymize", post(cart::anonymize))
        .route(
            "/cart/items/{index}/attachments/{attachment}",
            delete(cart::remove_item_attachment),
        )
        .route("/products", post(products::product_list))
        .with_state(state.clone());

    let adapters = match state.config.server.token.clone() {
        Some(token) => adapters.layer(axum::middleware::from_fn(move |req, next| {
            let t = token.clone();
            async move { auth::require_auth(t, req, next).await }
        })),
        None => adapters,
    };

    let router = Router::new()
        .route("/health", get(health))
        .merge(adapters)
        .layer(DefaultBodyLimit::max(1024 * 1024)) // 1 MB
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("no-referrer"),
        ));

    // Conditionally apply CORS if origins are configured.
    let cors_origins = &state.config.server.cors_origins;
    if cors_origins.is_empty() {
        router
    } else {
        let origins: Vec<HeaderValue> = cors_origins.iter().filter_map(|o| o.parse().ok()).collect();
        router.layer(
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
                .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
                .allow_credentials(true),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_state(token: Option<String>) -> AppState {
        let mut config = AppConfig::default();
        config.store.account = "test".into();
        config.server.token = token;
        let platform = PlatformClient::new(&config.store).unwrap();
        AppState {
            config: Arc::new(config),
            platform,
        }
    }

    #[tokio::test]
    async fn health_is_open() {
        let app = router(test_state(Some("secret".into())));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn adapter_routes_require_token_when_configured() {
        let app = router(test_state(Some("secret".into())));
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/cart")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn responses_carry_security_headers() {
        let app = router(test_state(None));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            response.headers().get("x-content-type-options").unwrap(),
            "nosniff"
        );
    }
}

//! HTTP client for the upstream VTEX APIs.
//!
//! One shared `reqwest` client with fixed connect/request timeouts issues
//! every outbound call. Each call forwards the per-request cookie header,
//! captures the upstream `Set-Cookie` headers for propagation, and decodes
//! the JSON body. Non-2xx responses surface as structured errors carrying
//! the upstream status and body; there is no retry and no fallback.

pub mod checkout;
pub mod paths;
pub mod search;

use std::sync::Arc;
use std::time::Duration;

use reqwest::header;
use serde::de::DeserializeOwned;

use crate::config::StoreConfig;
use self::paths::StorePaths;

/// Shared connect and request timeouts for upstream calls.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors surfaced by upstream calls.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("upstream returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid response from upstream: {0}")]
    Decode(String),
}

/// Errors constructing the client itself.
#[derive(Debug, thiserror::Error)]
pub enum ClientInitError {
    #[error("invalid store base URL: {0}")]
    BaseUrl(#[from] url::ParseError),
    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

/// A decoded upstream response plus the cookies the platform set on it.
#[derive(Debug)]
pub struct UpstreamResponse<T> {
    pub body: T,
    pub set_cookies: Vec<String>,
}

/// Client for one store's upstream APIs.
#[derive(Clone)]
pub struct PlatformClient {
    http: reqwest::Client,
    paths: Arc<StorePaths>,
}

impl PlatformClient {
    pub fn new(store: &StoreConfig) -> Result<Self, ClientInitError> {
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        let paths = Arc::new(StorePaths::new(store)?);
        Ok(Self { http, paths })
    }

    pub fn paths(&self) -> &StorePaths {
        &self.paths
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Send a prepared request, capture `Set-Cookie`, and decode the JSON
    /// body.
    pub(crate) async fn execute<T: DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
    ) -> Result<UpstreamResponse<T>, UpstreamError> {
        let resp = req.header(header::ACCEPT, "application/json").send().await?;

        let set_cookies: Vec<String> = resp
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok().map(str::to_string))
            .collect();

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "upstream call failed");
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp
            .json::<T>()
            .await
            .map_err(|e| UpstreamError::Decode(e.to_string()))?;
        Ok(UpstreamResponse { body, set_cookies })
    }
}

//! Commerce API client.
//!
//! Every call goes to `<API_URL>/<path>` with the `Client-Id` header, and
//! with a bearer token when made on behalf of a signed-in user. Transport
//! failures are logged here and surface only as [`Error::Network`].

use reqwest::header::{ACCEPT, CACHE_CONTROL};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shop_core::{ApiResponse, Error, Resource, Result};
use std::time::Instant;
use telemetry::{health, metrics};
use tracing::{debug, warn};
use url::Url;

use crate::config::CommerceApiConfig;

/// Header carrying the tenant identifier.
pub const CLIENT_ID_HEADER: &str = "Client-Id";

/// Client for the external commerce/content API.
#[derive(Clone)]
pub struct CommerceClient {
    /// Base URL without a trailing slash
    base_url: String,
    /// Value of the `Client-Id` header
    client_id: String,
    http_client: reqwest::Client,
}

impl CommerceClient {
    /// Creates a new client.
    pub fn new(config: &CommerceApiConfig) -> Result<Self> {
        let base = Url::parse(&config.url)
            .map_err(|e| Error::config(format!("invalid API url {:?}: {}", config.url, e)))?;

        if config.client_id.trim().is_empty() {
            return Err(Error::config("client id must not be empty"));
        }

        let http_client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| Error::config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base.as_str().trim_end_matches('/').to_string(),
            client_id: config.client_id.clone(),
            http_client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// `GET <path>` without any client-side caching.
    pub async fn get<T: DeserializeOwned>(
        &self,
        resource: Resource,
        path: &str,
        query: &[(&str, String)],
        token: Option<&str>,
    ) -> Result<ApiResponse<T>> {
        let request = self
            .request(Method::GET, path, token)
            .header(CACHE_CONTROL, "no-store")
            .query(query);
        self.send(resource, request, true).await
    }

    /// `POST <path>` with a JSON body.
    pub async fn post<B, T>(
        &self,
        resource: Resource,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<ApiResponse<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::POST, path, token).json(body);
        self.send(resource, request, true).await
    }

    /// `DELETE <path>`. The reply usually carries no item.
    pub async fn delete<T: DeserializeOwned>(
        &self,
        resource: Resource,
        path: &str,
        token: Option<&str>,
    ) -> Result<ApiResponse<T>> {
        let request = self.request(Method::DELETE, path, token);
        self.send(resource, request, false).await
    }

    /// Whether the API answers at all, regardless of the envelope.
    pub async fn ping(&self) -> bool {
        let request = self
            .request(Method::GET, "products", None)
            .query(&[("limit", "1")]);
        match request.send().await {
            Ok(response) => {
                debug!(status = %response.status(), "Commerce API reachable");
                true
            }
            Err(e) => {
                warn!(error = %e, "Commerce API unreachable");
                false
            }
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let request = self
            .http_client
            .request(method, self.url(path))
            .header(CLIENT_ID_HEADER, &self.client_id)
            .header(ACCEPT, "application/json");

        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        resource: Resource,
        request: RequestBuilder,
        require_item: bool,
    ) -> Result<ApiResponse<T>> {
        let start = Instant::now();
        metrics().proxy_requests.inc();

        let response = request
            .send()
            .await
            .map_err(|e| network_error(resource, &e))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| network_error(resource, &e))?;

        metrics()
            .proxy_latency_ms
            .observe(start.elapsed().as_millis() as u64);
        health().commerce_api.set_healthy();

        let envelope = match serde_json::from_slice::<ApiResponse<T>>(&body) {
            Ok(envelope) => envelope.normalize(require_item),
            Err(e) => {
                warn!(
                    resource = %resource,
                    status = %status,
                    error = %e,
                    "Commerce API returned an unreadable body"
                );
                ApiResponse::rejected("서버 응답을 처리할 수 없습니다.")
            }
        };

        if !envelope.is_ok() {
            metrics().proxy_rejections.inc();
            debug!(
                resource = %resource,
                status = %status,
                message = envelope.message.as_deref().unwrap_or(""),
                "Commerce API rejected request"
            );
        }

        Ok(envelope)
    }
}

fn network_error(resource: Resource, err: &reqwest::Error) -> Error {
    warn!(resource = %resource, error = %err, "Commerce API request failed");
    metrics().proxy_network_errors.inc();
    health().commerce_api.set_unhealthy(err.to_string());
    Error::network(resource)
}

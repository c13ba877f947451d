//! Dimensions Analytics API client.
//!
//! Provides an async HTTP client with:
//! - Connection pooling via reqwest
//! - Key-for-token authentication (one round trip per load)
//! - Iterative DSL queries paged with `limit`/`skip`
//!
//! There is deliberately no retry layer: a fetch either completes or its
//! failure surfaces immediately to the loader for classification.

use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use url::Url;

use crate::config::{Config, api};
use crate::error::{ClientError, ClientResult};
use crate::models::{AuthTokenResponse, DslResponse, QueryStats};

/// An authenticated DSL session.
#[derive(Clone)]
pub struct Session {
    token: String,
}

impl Session {
    /// The `Authorization` header value for this session.
    fn authorization(&self) -> String {
        format!("JWT {}", self.token)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}

/// Dimensions Analytics API client.
#[derive(Clone)]
pub struct DimensionsClient {
    /// Pooled HTTP client.
    client: Client,

    /// Key exchange endpoint.
    auth_url: Url,

    /// DSL query endpoint.
    dsl_url: Url,

    /// Records per page for iterative queries.
    page_size: usize,

    /// Page cap for iterative queries.
    max_pages: usize,
}

impl DimensionsClient {
    /// Create a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the endpoint is not a valid URL or HTTP client
    /// initialization fails.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let base = Url::parse(&config.endpoint)?;
        let auth_url = base.join(api::AUTH_PATH)?;
        let dsl_url = base.join(api::DSL_PATH)?;

        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(api::MAX_KEEPALIVE)
            .pool_idle_timeout(api::KEEPALIVE_EXPIRY)
            .gzip(true)
            .build()?;

        Ok(Self {
            client,
            auth_url,
            dsl_url,
            page_size: config.page_size,
            max_pages: config.max_pages,
        })
    }

    /// Exchange an API key for a session token.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` when the API rejects the key, or a transport
    /// error when it cannot be reached.
    pub async fn authenticate(&self, api_key: &str) -> ClientResult<Session> {
        let response = self
            .client
            .post(self.auth_url.clone())
            .json(&serde_json::json!({ "key": api_key }))
            .send()
            .await?;

        let response = handle_response(response).await?;
        let body: AuthTokenResponse =
            serde_json::from_slice(&response.bytes().await?).map_err(ClientError::from)?;

        Ok(Session { token: body.token })
    }

    /// Run a single DSL query.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn query(&self, session: &Session, dsl: &str) -> ClientResult<DslResponse> {
        tracing::debug!(bytes = dsl.len(), "Issuing DSL query");

        let response = self
            .client
            .post(self.dsl_url.clone())
            .header(AUTHORIZATION, session.authorization())
            .header(CONTENT_TYPE, "application/json")
            .body(dsl.to_string())
            .send()
            .await?;

        let response = handle_response(response).await?;
        serde_json::from_slice(&response.bytes().await?).map_err(ClientError::from)
    }

    /// Run a DSL query to exhaustion, paging with `limit`/`skip`.
    ///
    /// Pages are fetched sequentially until the reported total is reached,
    /// a short page arrives, or the page cap is hit. A failed page fails
    /// the whole query; no retry.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn query_iterative(&self, session: &Session, dsl: &str) -> ClientResult<DslResponse> {
        let mut publications = Vec::new();
        let mut total_count = 0;

        for page in 0..self.max_pages {
            let skip = page * self.page_size;
            let paged = format!("{dsl} limit {} skip {skip}", self.page_size);
            let response = self.query(session, &paged).await?;

            total_count = response.total_count().max(total_count);
            let fetched = response.publications.len();
            publications.extend(response.publications);

            tracing::debug!(page, fetched, total = total_count, "Fetched DSL page");

            if fetched < self.page_size || publications.len() >= total_count {
                break;
            }
        }

        total_count = total_count.max(publications.len());
        Ok(DslResponse { publications, stats: Some(QueryStats { total_count }) })
    }
}

/// Map API response status codes onto `ClientError` variants.
async fn handle_response(response: reqwest::Response) -> ClientResult<reqwest::Response> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    match status.as_u16() {
        401 | 403 => {
            let text = response.text().await.unwrap_or_default();
            Err(ClientError::unauthorized(text))
        }
        400 => {
            let text = response.text().await.unwrap_or_default();
            Err(ClientError::bad_request(text))
        }
        429 => {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
                .unwrap_or(60);

            Err(ClientError::rate_limited(retry_after))
        }
        500..=599 => {
            let text = response.text().await.unwrap_or_default();
            Err(ClientError::server(status.as_u16(), text))
        }
        _ => {
            let text = response.text().await.unwrap_or_default();
            Err(ClientError::UnexpectedStatus { status: status.as_u16(), message: text })
        }
    }
}

impl std::fmt::Debug for DimensionsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DimensionsClient")
            .field("dsl_url", &self.dsl_url.as_str())
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}

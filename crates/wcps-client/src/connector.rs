//! HTTP connector for a WCPS-capable OWS endpoint.
//!
//! Queries are posted as the `query` form field. Transient failures
//! (5xx, 429, timeouts, refused connections) are retried with exponential
//! backoff; any other non-2xx response is returned as
//! [`ClientError::Status`].

use std::future::Future;

use async_trait::async_trait;
use reqwest::{header, Client, Response, Url};
use tracing::{debug, info, instrument, warn};
use wcps_query::Query;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::transport::{Payload, QueryTransport};

/// Longest error body kept in [`ClientError::Status`].
const MAX_ERROR_BODY: usize = 2048;

/// Connection to one coverage server.
#[derive(Debug, Clone)]
pub struct Connector {
    client: Client,
    config: ClientConfig,
    endpoint: Url,
}

impl Connector {
    /// Create a connector. Fails if the server URL is not a valid http(s) URL.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let endpoint = config.validate()?;
        let client = Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(config.connect_timeout())
            .pool_max_idle_per_host(4)
            .tcp_nodelay(true)
            .build()?;

        Ok(Self {
            client,
            config,
            endpoint,
        })
    }

    /// Shorthand for a connector with default settings.
    pub fn from_url(server_url: impl Into<String>) -> ClientResult<Self> {
        Self::new(ClientConfig::new(server_url))
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Render `query` and submit it.
    pub async fn execute_query(&self, query: &Query) -> ClientResult<Payload> {
        let text = query.render()?;
        self.execute_raw(&text).await
    }

    /// Submit WCPS text verbatim.
    #[instrument(skip(self, query), fields(endpoint = %self.endpoint, query_len = query.len()))]
    pub async fn execute_raw(&self, query: &str) -> ClientResult<Payload> {
        debug!(query = %query, "Submitting WCPS query");

        let payload = self.with_retry(|| self.post_query(query)).await?;

        info!(
            bytes = payload.body.len(),
            content_type = payload.content_type.as_deref().unwrap_or("unknown"),
            "Query completed"
        );
        Ok(payload)
    }

    /// Fetch the WCS capabilities document.
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    pub async fn server_capabilities(&self) -> ClientResult<String> {
        let params = [
            ("SERVICE", "WCS"),
            ("VERSION", self.config.wcs_version.as_str()),
            ("REQUEST", "GetCapabilities"),
        ];
        self.with_retry(|| self.get_kvp(&params)).await?.to_text()
    }

    /// Fetch the DescribeCoverage document for one coverage.
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    pub async fn coverage_metadata(&self, coverage_id: &str) -> ClientResult<String> {
        let params = [
            ("SERVICE", "WCS"),
            ("VERSION", self.config.wcs_version.as_str()),
            ("REQUEST", "DescribeCoverage"),
            ("COVERAGEID", coverage_id),
        ];
        self.with_retry(|| self.get_kvp(&params)).await?.to_text()
    }

    async fn post_query(&self, query: &str) -> ClientResult<Payload> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .form(&[("query", query)])
            .send()
            .await?;
        read_payload(response).await
    }

    async fn get_kvp(&self, params: &[(&str, &str)]) -> ClientResult<Payload> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(params)
            .send()
            .await?;
        read_payload(response).await
    }

    async fn with_retry<F, Fut>(&self, mut request: F) -> ClientResult<Payload>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ClientResult<Payload>>,
    {
        let mut retry_count = 0;
        let mut delay = self.config.initial_retry_delay();

        loop {
            match request().await {
                Ok(payload) => return Ok(payload),
                Err(e) if e.is_retryable() && retry_count < self.config.max_retries => {
                    retry_count += 1;
                    warn!(
                        error = %e,
                        retry = retry_count,
                        max_retries = self.config.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        "Request failed, retrying"
                    );

                    tokio::time::sleep(delay).await;
                    delay = std::cmp::min(delay * 2, self.config.max_retry_delay());
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[async_trait]
impl QueryTransport for Connector {
    async fn submit(&self, query: &str) -> ClientResult<Payload> {
        self.execute_raw(query).await
    }
}

async fn read_payload(response: Response) -> ClientResult<Payload> {
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = response.bytes().await?;

    if !status.is_success() {
        let mut text = String::from_utf8_lossy(&body).into_owned();
        if text.len() > MAX_ERROR_BODY {
            let mut cut = MAX_ERROR_BODY;
            while !text.is_char_boundary(cut) {
                cut -= 1;
            }
            text.truncate(cut);
        }
        return Err(ClientError::Status {
            status: status.as_u16(),
            body: text,
        });
    }

    Ok(Payload::new(content_type, body))
}

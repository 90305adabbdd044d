use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, header};
use serde_json::Value;
use url::Url;

use crate::error::{Error, Result};
use crate::observability::{
    CLIENT_NON_SUCCESS_STATUS, CLIENT_REQUEST_DURATION, CLIENT_REQUEST_ERRORS, CLIENT_REQUESTS,
};
use crate::types::QueryRequest;

/// Address of the agent when none is configured.
pub const DEFAULT_AGENT_URL: &str = "http://172.27.152.214:3000/";

/// Something that answers a query with a JSON body.
///
/// The chat view only talks to the agent through this trait, so the HTTP
/// transport can be swapped for an in-process fake.
#[async_trait::async_trait]
pub trait Agent: Send + Sync {
    /// Send one query and return the decoded reply body.
    ///
    /// Implementations make exactly one attempt.  Any shape of JSON is a
    /// successful reply; interpreting it is up to the caller.
    async fn query(&self, query: &str) -> Result<Value>;
}

/// HTTP client for an agent that serves `POST /query`.
#[derive(Debug, Clone)]
pub struct AgentClient {
    client: ReqwestClient,
    endpoint: Url,
    timeout: Option<Duration>,
}

impl AgentClient {
    /// Create a new client for the default agent address, without a timeout.
    pub fn new() -> Result<Self> {
        Self::with_options(None, None)
    }

    /// Create a new client with custom settings.
    ///
    /// `base_url` is the agent's root; the query path is appended to it.
    pub fn with_options(base_url: Option<&str>, timeout: Option<Duration>) -> Result<Self> {
        let endpoint = query_endpoint(base_url.unwrap_or(DEFAULT_AGENT_URL))?;

        let mut builder = ReqwestClient::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            Error::http_client(
                format!("Failed to build HTTP client: {}", e),
                Some(Box::new(e)),
            )
        })?;

        Ok(Self {
            client,
            endpoint,
            timeout,
        })
    }

    /// The full URL queries are posted to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn default_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    async fn post_query(&self, query: &str) -> Result<Value> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .headers(Self::default_headers())
            .json(&QueryRequest::new(query))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::timeout(
                        format!("Request timed out: {}", e),
                        self.timeout.map(|t| t.as_secs_f64()),
                    )
                } else if e.is_connect() {
                    Error::connection(format!("Connection error: {}", e), Some(Box::new(e)))
                } else {
                    Error::http_client(format!("Request failed: {}", e), Some(Box::new(e)))
                }
            })?;

        // The body is read whatever the status; a JSON error body still
        // degrades to the fallback reply rather than an error.
        let status = response.status();
        if !status.is_success() {
            CLIENT_NON_SUCCESS_STATUS.click();
            tracing::warn!(%status, endpoint = %self.endpoint, "agent answered with non-success status");
        }

        response.json::<Value>().await.map_err(|e| {
            if e.is_timeout() {
                Error::timeout(
                    format!("Timed out reading response: {}", e),
                    self.timeout.map(|t| t.as_secs_f64()),
                )
            } else {
                Error::serialization(
                    format!("Failed to parse response: {}", e),
                    Some(Box::new(e)),
                )
            }
        })
    }
}

#[async_trait::async_trait]
impl Agent for AgentClient {
    async fn query(&self, query: &str) -> Result<Value> {
        CLIENT_REQUESTS.click();
        let start = Instant::now();
        let result = self.post_query(query).await;
        CLIENT_REQUEST_DURATION.add(start.elapsed().as_secs_f64());
        if let Err(err) = &result {
            CLIENT_REQUEST_ERRORS.click();
            tracing::debug!(error = %err, endpoint = %self.endpoint, "agent request failed");
        }
        result
    }
}

/// Resolve the `query` path against an agent base URL.
fn query_endpoint(base_url: &str) -> Result<Url> {
    let mut base = Url::parse(base_url)?;
    if base.cannot_be_a_base() {
        return Err(Error::url(
            format!("{base_url} cannot be used as a base URL"),
            None,
        ));
    }
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base.join("query")?)
}

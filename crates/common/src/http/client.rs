use std::sync::Arc;
use std::time::Duration;

use harvest_domain::constants::{DEFAULT_TIMEOUT_SECS, JSON_MIME_TYPE};
use harvest_domain::{HarvestError, Result};
use parking_lot::RwLock;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use tracing::debug;

/// Transport shared by every request a client makes.
///
/// Wraps one `reqwest::Client` (connection pool, timeout, default `Accept`
/// and `User-Agent`) and the current `Authorization` header, which the token
/// session swaps on every authorize.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    authorization: Arc<RwLock<Option<HeaderValue>>>,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Create a request builder using the underlying reqwest client, with
    /// the current authorization header attached.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        let builder = self.client.request(method, url);
        match self.authorization.read().as_ref() {
            Some(value) => builder.header(AUTHORIZATION, value.clone()),
            None => builder,
        }
    }

    /// Execute the provided request builder.
    ///
    /// Any HTTP status is a successful send; status mapping is up to the
    /// caller.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let request = builder.build().map_err(transport_error)?;
        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "sending HTTP request");

        match self.client.execute(request).await {
            Ok(response) => {
                let status = response.status();
                debug!(%method, %url, %status, "received HTTP response");
                Ok(response)
            }
            Err(err) => {
                debug!(%method, %url, error = %err, "HTTP request failed");
                Err(transport_error(err))
            }
        }
    }

    /// Replace the `Authorization` header sent with every request.
    pub fn set_authorization(&self, token_type: &str, token: &str) -> Result<()> {
        let mut value = HeaderValue::from_str(&format!("{token_type} {token}")).map_err(|_| {
            HarvestError::InvalidArgument("access token contains invalid header characters".into())
        })?;
        value.set_sensitive(true);
        *self.authorization.write() = Some(value);
        Ok(())
    }

    pub fn has_authorization(&self) -> bool {
        self.authorization.read().is_some()
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient").field("authorized", &self.has_authorization()).finish()
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    user_agent: Option<String>,
    default_headers: Option<HeaderMap>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: None,
            default_headers: None,
        }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Extra headers sent with every request, on top of `Accept:
    /// application/json`.
    pub fn default_headers(mut self, headers: HeaderMap) -> Self {
        self.default_headers = Some(headers);
        self
    }

    pub fn build(self) -> Result<HttpClient> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_MIME_TYPE));
        if let Some(extra) = self.default_headers {
            headers.extend(extra);
        }

        let mut builder = ReqwestClient::builder().timeout(self.timeout).default_headers(headers);

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        let client = builder.build().map_err(transport_error)?;

        Ok(HttpClient { client, authorization: Arc::new(RwLock::new(None)) })
    }
}

/// Map a reqwest failure onto the client taxonomy.
///
/// Body decode failures become [`HarvestError::Serialization`]; everything
/// else (connect, timeout, TLS, builder) is [`HarvestError::Network`].
pub fn transport_error(err: reqwest::Error) -> HarvestError {
    if err.is_decode() {
        HarvestError::Serialization(err.to_string())
    } else {
        HarvestError::Network(err.to_string())
    }
}

//! Per-request builder
//!
//! A [`RequestBuilder`] accumulates the query, headers and body of one
//! request and is consumed by [`RequestBuilder::send`] or
//! [`RequestBuilder::execute`]. Misuse (mixing body modes, arrays in form
//! mode, bad headers) is recorded on the builder and surfaces as
//! [`HarvestError::InvalidRequest`] from `send` without touching the network,
//! in the same spirit as `reqwest::RequestBuilder`.

use std::future::Future;

use harvest_domain::constants::ACCOUNT_ID_HEADER;
use harvest_domain::{ExternalReference, HarvestError, Result};
use reqwest::header::{HeaderName, HeaderValue, USER_AGENT};
use reqwest::{Method, Response};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use url::Url;

use super::client::{transport_error, HttpClient};
use super::params::IntoParam;
use super::query;

/// How body fields are encoded.
#[derive(Debug, Clone, PartialEq)]
pub enum BodyMode {
    /// `application/x-www-form-urlencoded`, ordered unique pairs
    Form(Vec<(String, String)>),
    /// `application/json` object
    Json(Map<String, Value>),
}

impl Default for BodyMode {
    fn default() -> Self {
        Self::Form(Vec::new())
    }
}

/// Builder for a single API request.
#[derive(Debug)]
#[must_use = "a RequestBuilder does nothing until sent"]
pub struct RequestBuilder {
    method: Method,
    url: String,
    query: Vec<(String, String)>,
    headers: Vec<(String, String)>,
    body: BodyMode,
    error: Option<HarvestError>,
}

impl RequestBuilder {
    /// Start a request in form mode with no query, headers or body.
    pub fn begin(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: BodyMode::default(),
            error: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::begin(Method::GET, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::begin(Method::POST, url)
    }

    pub fn patch(url: impl Into<String>) -> Self {
        Self::begin(Method::PATCH, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::begin(Method::DELETE, url)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn body_mode(&self) -> &BodyMode {
        &self.body
    }

    /// Add a query parameter. `None` drops it; a repeated name keeps the
    /// last value.
    pub fn query(mut self, name: &str, value: impl IntoParam) -> Self {
        if let Some(param) = value.into_param() {
            set_pair(&mut self.query, name, param.to_wire_string());
        }
        self
    }

    /// `updated_since`, `page` and `per_page`, shared by every list
    /// endpoint.
    pub fn page_since(
        self,
        updated_since: Option<chrono::DateTime<chrono::Utc>>,
        page: Option<u32>,
        per_page: Option<u32>,
    ) -> Self {
        self.query("updated_since", updated_since).query("page", page).query("per_page", per_page)
    }

    /// Switch the body to JSON. Must come before the first body field.
    pub fn use_json(mut self) -> Self {
        match &self.body {
            BodyMode::Json(_) => {}
            BodyMode::Form(fields) if fields.is_empty() => {
                self.body = BodyMode::Json(Map::new());
            }
            BodyMode::Form(_) => {
                self.record_error("use_json called after form fields were added");
            }
        }
        self
    }

    /// Add a body field. `None` omits it.
    pub fn body(mut self, name: &str, value: impl IntoParam) -> Self {
        let Some(param) = value.into_param() else {
            return self;
        };

        match &mut self.body {
            BodyMode::Form(fields) => set_pair(fields, name, param.to_wire_string()),
            BodyMode::Json(map) => match param.to_json() {
                Some(json) => {
                    map.insert(name.to_string(), json);
                }
                None => self.record_error(&format!("field {name} is not representable in JSON")),
            },
        }
        self
    }

    /// Add an external reference: `name.id`, `name.group_id` and
    /// `name.permalink` in form mode, a nested object in JSON mode.
    pub fn external_reference(mut self, name: &str, value: Option<&ExternalReference>) -> Self {
        let Some(reference) = value else {
            return self;
        };

        match &mut self.body {
            BodyMode::Form(fields) => {
                set_pair(fields, &format!("{name}.id"), reference.id.clone());
                set_pair(fields, &format!("{name}.group_id"), reference.group_id.clone());
                set_pair(fields, &format!("{name}.permalink"), reference.permalink.clone());
            }
            BodyMode::Json(map) => {
                let mut nested = Map::new();
                nested.insert("id".to_string(), Value::String(reference.id.clone()));
                nested.insert("group_id".to_string(), Value::String(reference.group_id.clone()));
                nested.insert("permalink".to_string(), Value::String(reference.permalink.clone()));
                map.insert(name.to_string(), Value::Object(nested));
            }
        }
        self
    }

    /// Add an array body field. JSON mode only; in form mode the builder
    /// fails on send.
    pub fn array<T>(mut self, name: &str, values: Option<Vec<T>>) -> Self
    where
        T: Into<Value>,
    {
        let Some(values) = values else {
            return self;
        };

        match &mut self.body {
            BodyMode::Json(map) => {
                let values = values.into_iter().map(Into::into).collect();
                map.insert(name.to_string(), Value::Array(values));
            }
            BodyMode::Form(_) => {
                self.record_error(&format!("array field {name} requires JSON mode"));
            }
        }
        self
    }

    /// Set a header. A repeated name keeps the last value.
    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        set_pair(&mut self.headers, name, value.into());
        self
    }

    /// `Harvest-Account-Id`; `None` leaves it unset.
    pub fn account_id(self, id: Option<i64>) -> Self {
        match id {
            Some(id) => self.header(ACCOUNT_ID_HEADER, id.to_string()),
            None => self,
        }
    }

    pub fn user_agent(self, value: impl Into<String>) -> Self {
        self.header(USER_AGENT.as_str(), value)
    }

    /// Final URL with the query appended.
    pub fn build_url(&self) -> Result<Url> {
        let mut url = Url::parse(&self.url)?;
        query::append(&mut url, self.query.iter().map(|(k, v)| (k.as_str(), Some(v.as_str()))));
        Ok(url)
    }

    /// Send the request and decode the JSON response into `T`.
    ///
    /// An empty success body decodes as JSON `null`, so `Option<T>` and `()`
    /// accept `204 No Content`.
    ///
    /// # Errors
    /// - [`HarvestError::InvalidRequest`] for a misused builder (no network
    ///   I/O happens)
    /// - [`HarvestError::Http`] for a non-2xx status; the body is not read.
    ///   `reason` is the canonical phrase for the status code (reqwest does
    ///   not expose the phrase the server sent), `"Unknown Status"` for
    ///   codes without one
    /// - [`HarvestError::Cancelled`] when `cancel` fires first
    /// - [`HarvestError::Network`] / [`HarvestError::Serialization`] for
    ///   transport and decode failures
    pub async fn send<T>(self, client: &HttpClient, cancel: &CancellationToken) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = self.dispatch(client, cancel).await?;
        let body = cancellable(cancel, response.bytes()).await?.map_err(transport_error)?;

        if body.is_empty() {
            return serde_json::from_value(Value::Null).map_err(HarvestError::from);
        }

        serde_json::from_slice(&body).map_err(|err| {
            debug!(error = %err, "failed to decode response body");
            HarvestError::from(err)
        })
    }

    /// Send the request and discard the response body.
    pub async fn execute(self, client: &HttpClient, cancel: &CancellationToken) -> Result<()> {
        self.dispatch(client, cancel).await.map(|_| ())
    }

    async fn dispatch(
        mut self,
        client: &HttpClient,
        cancel: &CancellationToken,
    ) -> Result<Response> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }

        let url = self.build_url()?;
        let mut request = client.request(self.method.clone(), url);

        for (name, value) in &self.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| HarvestError::InvalidRequest(format!("invalid header name: {name}")))?;
            let value = HeaderValue::from_str(value).map_err(|_| {
                HarvestError::InvalidRequest(format!("invalid value for header {name}"))
            })?;
            request = request.header(name, value);
        }

        if carries_body(&self.method) {
            request = match &self.body {
                BodyMode::Form(fields) => request.form(fields),
                BodyMode::Json(map) => request.json(map),
            };
        }

        let response = cancellable(cancel, client.send(request)).await??;
        let status = response.status();
        if !status.is_success() {
            warn!(method = %self.method, status = status.as_u16(), "API request failed");
            return Err(HarvestError::Http {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown Status").to_string(),
            });
        }

        Ok(response)
    }

    fn record_error(&mut self, message: &str) {
        if self.error.is_none() {
            self.error = Some(HarvestError::InvalidRequest(message.to_string()));
        }
    }
}

fn carries_body(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT | Method::PATCH)
}

fn set_pair(pairs: &mut Vec<(String, String)>, name: &str, value: String) {
    match pairs.iter_mut().find(|(key, _)| key == name) {
        Some(pair) => pair.1 = value,
        None => pairs.push((name.to_string(), value)),
    }
}

async fn cancellable<F>(cancel: &CancellationToken, future: F) -> Result<F::Output>
where
    F: Future,
{
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(HarvestError::Cancelled),
        output = future => Ok(output),
    }
}

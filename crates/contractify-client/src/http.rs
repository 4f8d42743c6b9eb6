//! HTTP transport built on reqwest.
//!
//! Routes are joined onto a base URL after `:name` segments are replaced
//! from the validated `params` object; every segment is percent-encoded, so
//! a param value can never add segments, a query or a fragment. Query
//! objects become URL query pairs, bodies are sent as JSON, and non-2xx
//! statuses are errors.

use async_trait::async_trait;
use contractify_contract::HttpMethod;
use reqwest::{Client, Method, Url};
use serde_json::Value;
use tracing::debug;

use crate::transport::{BoxError, Transport, TransportRequest, TransportResponse};

/// Errors raised by [`HttpTransport`].
#[derive(Debug, thiserror::Error)]
pub enum HttpTransportError {
    #[error("invalid base url {url}: {message}")]
    InvalidBaseUrl { url: String, message: String },

    /// A `:name` route segment has no matching params entry.
    #[error("route {route} needs path parameter `{name}`")]
    MissingParam { route: String, name: String },

    /// A path parameter resolved to an empty, `.` or `..` segment.
    #[error("route {route} got unusable value {value:?} for path parameter `{name}`")]
    InvalidParam {
        route: String,
        name: String,
        value: String,
    },

    #[error("query must be a JSON object, got {0}")]
    InvalidQuery(String),

    #[error("invalid request url: {0}")]
    InvalidUrl(String),

    /// The caller's cancellation token fired first.
    #[error("request cancelled")]
    Cancelled,

    #[error(transparent)]
    Request(#[from] reqwest::Error),

    #[error("response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// [`Transport`] that performs real HTTP calls.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Result<Self, HttpTransportError> {
        Self::with_client(Client::new(), base_url)
    }

    /// Use a preconfigured client (timeouts, default headers, TLS).
    pub fn with_client(client: Client, base_url: &str) -> Result<Self, HttpTransportError> {
        // A trailing slash keeps the last base segment when joining routes.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url =
            Url::parse(&normalized).map_err(|err| HttpTransportError::InvalidBaseUrl {
                url: base_url.to_string(),
                message: err.to_string(),
            })?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url_for(&self, route: &str, params: Option<&Value>) -> Result<Url, HttpTransportError> {
        let segments = route_segments(route, params)?;
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| HttpTransportError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(&segments);
        Ok(url)
    }

    async fn execute(&self, request: TransportRequest) -> Result<Value, HttpTransportError> {
        let url = self.url_for(&request.url, request.params.as_ref())?;
        debug!(%url, method = %request.method, "sending http request");

        let mut builder = self.client.request(to_reqwest_method(request.method), url);
        if let Some(query) = &request.query {
            builder = builder.query(&query_pairs(query)?);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await?.error_for_status()?;
        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, BoxError> {
        let cancellation = request.cancellation.clone();
        let data = match cancellation {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => Err(HttpTransportError::Cancelled),
                result = self.execute(request) => result,
            },
            None => self.execute(request).await,
        }?;
        Ok(TransportResponse::new(data))
    }
}

fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Options => Method::OPTIONS,
        HttpMethod::Head => Method::HEAD,
    }
}

/// Unencoded path segments of `route`, with `:name` segments replaced by
/// values from `params`. Empty segments are dropped.
fn route_segments(
    route: &str,
    params: Option<&Value>,
) -> Result<Vec<String>, HttpTransportError> {
    route
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let Some(name) = segment.strip_prefix(':') else {
                return Ok(segment.to_string());
            };
            let value = params
                .and_then(|params| params.get(name))
                .and_then(scalar_to_string)
                .ok_or_else(|| HttpTransportError::MissingParam {
                    route: route.to_string(),
                    name: name.to_string(),
                })?;
            // The url crate silently drops dot segments instead of encoding them.
            if matches!(value.as_str(), "" | "." | "..") {
                return Err(HttpTransportError::InvalidParam {
                    route: route.to_string(),
                    name: name.to_string(),
                    value,
                });
            }
            Ok(value)
        })
        .collect()
}

/// Flatten a query object into pairs. Arrays repeat the key, nulls are
/// dropped and nested objects are sent as JSON text.
fn query_pairs(query: &Value) -> Result<Vec<(String, String)>, HttpTransportError> {
    let Value::Object(map) = query else {
        return Err(HttpTransportError::InvalidQuery(query.to_string()));
    };

    let mut pairs = Vec::with_capacity(map.len());
    for (key, value) in map {
        match value {
            Value::Null => {}
            Value::Array(items) => pairs.extend(
                items
                    .iter()
                    .filter_map(scalar_to_string)
                    .map(|item| (key.clone(), item)),
            ),
            Value::Object(_) => pairs.push((key.clone(), value.to_string())),
            scalar => {
                if let Some(text) = scalar_to_string(scalar) {
                    pairs.push((key.clone(), text));
                }
            }
        }
    }
    Ok(pairs)
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

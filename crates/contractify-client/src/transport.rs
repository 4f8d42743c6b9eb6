use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use contractify_contract::HttpMethod;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

/// Opaque transport failure.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Request headers, in a stable order.
pub type Headers = BTreeMap<String, String>;

/// A validated call, ready for the wire.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// The contract route, uninterpolated.
    pub url: String,
    pub method: HttpMethod,
    pub query: Option<Value>,
    pub body: Option<Value>,
    /// Validated path parameters. Substituting them into `url` is up to the
    /// transport.
    pub params: Option<Value>,
    pub headers: Headers,
    /// Fires when the caller gives up; the transport should abort the call.
    pub cancellation: Option<CancellationToken>,
}

/// Raw payload returned by the remote side.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub data: Value,
}

impl TransportResponse {
    pub fn new(data: Value) -> Self {
        Self { data }
    }
}

/// Performs the actual call. Implementations must be safe to share across
/// concurrent requests.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, BoxError>;
}

#[async_trait]
impl<T> Transport for Arc<T>
where
    T: Transport + ?Sized,
{
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, BoxError> {
        (**self).send(request).await
    }
}

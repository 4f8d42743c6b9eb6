//! Validating dispatcher for contract-described APIs.
//!
//! The [`Dispatcher`] resolves a route and method against a
//! [`Registry`](contractify_contract::Registry), validates the inputs the
//! method declares schemas for, hands the call to a [`Transport`], and
//! (optionally) validates the response against the success schema.
//!
//! Transports are the only networking seam. An HTTP transport built on
//! reqwest is available behind the `http` feature.

pub mod dispatcher;
pub mod environment;
pub mod error;
#[cfg(feature = "http")]
pub mod http;
pub mod transport;

pub use dispatcher::{Dispatcher, DispatcherBuilder, RequestOptions};
pub use environment::ExecutionEnvironment;
pub use error::{DispatchError, Field, Result, ValidationError, ValidationKind};
#[cfg(feature = "http")]
pub use http::{HttpTransport, HttpTransportError};
pub use transport::{BoxError, Headers, Transport, TransportRequest, TransportResponse};

pub use tokio_util::sync::CancellationToken;

use std::fmt;

use contractify_contract::HttpMethod;
use contractify_schema::SchemaError;

use crate::transport::BoxError;

/// Which side of the transport call a schema rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationKind {
    /// Caller-supplied input; the transport was never called.
    Input,
    /// Transport response; the call already happened.
    Output,
}

impl fmt::Display for ValidationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValidationKind::Input => "input",
            ValidationKind::Output => "output",
        })
    }
}

/// The value a schema was applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Query,
    Body,
    Params,
    Response,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Query => "query",
            Field::Body => "body",
            Field::Params => "params",
            Field::Response => "response",
        })
    }
}

/// A schema rejected a value.
#[derive(Debug, thiserror::Error)]
#[error("{kind} validation failed for {field}: {source}")]
pub struct ValidationError {
    pub kind: ValidationKind,
    pub field: Field,
    pub source: SchemaError,
}

/// Errors returned by [`crate::Dispatcher`] calls.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// No contract is registered for the route.
    #[error("route not found: {0}")]
    RouteNotFound(String),

    /// The contract exists but does not declare the method.
    #[error("method {method} not supported by route {route}")]
    MethodNotSupported { route: String, method: HttpMethod },

    /// An input or output schema rejected a value.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The transport failed; the error is passed through untouched.
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),
}

impl DispatchError {
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            DispatchError::Validation(err) => Some(err),
            _ => None,
        }
    }

    /// Kind of the validation failure, if this is one.
    pub fn validation_kind(&self) -> Option<ValidationKind> {
        self.as_validation().map(|err| err.kind)
    }
}

pub type Result<T> = std::result::Result<T, DispatchError>;

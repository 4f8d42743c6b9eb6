use crate::method::HttpMethod;

/// Errors raised while building contracts from documents.
#[derive(Debug, thiserror::Error)]
pub enum ContractError {
    /// The HTTP method token is not one of the supported methods.
    #[error("unknown HTTP method: {0}")]
    UnknownMethod(String),

    /// A schema inside a contract document failed to compile.
    #[error("invalid {slot} schema for {method} {route}: {source}")]
    Schema {
        route: String,
        method: HttpMethod,
        slot: &'static str,
        source: contractify_schema::SchemaError,
    },

    /// The contract document is not valid JSON or has the wrong shape.
    #[error("invalid contract document: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ContractError>;

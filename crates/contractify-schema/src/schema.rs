use std::sync::Arc;

use serde_json::Value;

use crate::error::Result;

/// A value validator with a single `parse` operation.
///
/// Implementations must be pure with respect to the dispatcher: they may
/// normalize the value they return, but must not depend on call order.
pub trait Schema: Send + Sync {
    /// Accept `value` (returning it, possibly transformed) or reject it.
    fn parse(&self, value: Value) -> Result<Value>;
}

/// Shared handle to a schema, as stored in contracts.
pub type SchemaRef = Arc<dyn Schema>;

impl<F> Schema for F
where
    F: Fn(Value) -> Result<Value> + Send + Sync,
{
    fn parse(&self, value: Value) -> Result<Value> {
        self(value)
    }
}

impl std::fmt::Debug for dyn Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Schema")
    }
}

//! Opaque value validators for contractify contracts.
//!
//! A [`Schema`] has exactly one operation, [`Schema::parse`]: accept a JSON
//! value and either return the (possibly normalized) value or reject it with
//! a [`SchemaError`]. Contracts never look inside a schema.
//!
//! [`JsonSchema`] adapts a compiled JSON Schema 2020-12 document to the
//! capability. Closures of the shape `Fn(Value) -> Result<Value>` are schemas
//! too, which keeps hand-written validators cheap.

pub mod config;
pub mod error;
pub mod json;
pub mod schema;

pub use config::SchemaConfig;
pub use error::{Result, SchemaError};
pub use json::JsonSchema;
pub use schema::{Schema, SchemaRef};

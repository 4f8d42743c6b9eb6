//! Route contracts and the runtime registry.
//!
//! A [`Contract`] binds a route to the HTTP methods it supports; each
//! [`MethodSpec`] carries optional input schemas and mandatory success/error
//! response schemas. A [`Registry`] maps routes to contracts and answers the
//! two-step lookup (route, then method) the dispatcher performs.

pub mod contract;
pub mod document;
pub mod error;
pub mod method;
pub mod registry;

pub use contract::{Contract, MethodSpec, ResponseSpec};
pub use document::{ContractDocument, MethodDocument, ResponseDocument};
pub use error::{ContractError, Result};
pub use method::HttpMethod;
pub use registry::Registry;

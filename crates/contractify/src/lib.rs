//! Route contracts, a registry generator and a validating API dispatcher.
//!
//! # Crate Structure
//!
//! - [`schema`]: the opaque `Schema` capability and its JSON Schema adapter
//! - [`contract`]: contracts, method specs and the runtime registry
//! - [`codegen`]: contract discovery and registry rendering (behind `codegen` feature)
//! - [`client`]: the validating dispatcher and transports (behind `client` feature)

/// Re-export schema types.
pub mod schema {
    pub use contractify_schema::*;
}

/// Re-export contract types.
pub mod contract {
    pub use contractify_contract::*;
}

/// Re-export generator types (requires `codegen` feature).
#[cfg(feature = "codegen")]
pub mod codegen {
    pub use contractify_codegen::*;
}

/// Re-export dispatcher types (requires `client` feature).
#[cfg(feature = "client")]
pub mod client {
    pub use contractify_client::*;
}

use std::collections::BTreeMap;

use contractify_schema::SchemaRef;
use tracing::warn;

use crate::contract::{Contract, MethodSpec};
use crate::document::ContractDocument;
use crate::error::Result;
use crate::method::HttpMethod;

/// Route-keyed map of contracts. Immutable once built.
///
/// When two contracts declare the same route the later one replaces the
/// earlier; the replacement is logged but not rejected.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    contracts: BTreeMap<String, Contract>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from contracts, in order.
    pub fn from_contracts(contracts: impl IntoIterator<Item = Contract>) -> Self {
        let mut registry = Self::new();
        for contract in contracts {
            registry.insert(contract);
        }
        registry
    }

    /// Compile contract documents and build a registry from them, in order.
    pub fn from_documents(documents: impl IntoIterator<Item = ContractDocument>) -> Result<Self> {
        let contracts = documents
            .into_iter()
            .map(ContractDocument::into_contract)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_contracts(contracts))
    }

    fn insert(&mut self, contract: Contract) {
        let route = contract.route().to_string();
        if self.contracts.insert(route.clone(), contract).is_some() {
            warn!(%route, "duplicate route; later contract replaces earlier one");
        }
    }

    pub fn get(&self, route: &str) -> Option<&Contract> {
        self.contracts.get(route)
    }

    pub fn contains_route(&self, route: &str) -> bool {
        self.contracts.contains_key(route)
    }

    /// Registered routes in lexicographic order.
    pub fn routes(&self) -> impl Iterator<Item = &str> + '_ {
        self.contracts.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }

    /// Spec for a route and method, if both are declared.
    pub fn method_spec(&self, route: &str, method: HttpMethod) -> Option<&MethodSpec> {
        self.get(route)?.method(method)
    }

    pub fn query_schema(&self, route: &str, method: HttpMethod) -> Option<&SchemaRef> {
        self.method_spec(route, method)?.query.as_ref()
    }

    pub fn body_schema(&self, route: &str, method: HttpMethod) -> Option<&SchemaRef> {
        self.method_spec(route, method)?.body.as_ref()
    }

    pub fn params_schema(&self, route: &str, method: HttpMethod) -> Option<&SchemaRef> {
        self.method_spec(route, method)?.params.as_ref()
    }

    pub fn success_schema(&self, route: &str, method: HttpMethod) -> Option<&SchemaRef> {
        Some(&self.method_spec(route, method)?.response.success)
    }

    pub fn error_schema(&self, route: &str, method: HttpMethod) -> Option<&SchemaRef> {
        Some(&self.method_spec(route, method)?.response.error)
    }
}

impl FromIterator<Contract> for Registry {
    fn from_iter<I: IntoIterator<Item = Contract>>(iter: I) -> Self {
        Self::from_contracts(iter)
    }
}

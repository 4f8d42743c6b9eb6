//! Serializable contract descriptions whose schemas are JSON Schema documents.

use std::collections::BTreeMap;
use std::sync::Arc;

use contractify_schema::{JsonSchema, SchemaConfig, SchemaRef};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::contract::{Contract, MethodSpec};
use crate::error::{ContractError, Result};
use crate::method::HttpMethod;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContractDocument {
    pub route: String,
    #[serde(default)]
    pub methods: BTreeMap<HttpMethod, MethodDocument>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MethodDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    pub response: ResponseDocument,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResponseDocument {
    pub success: Value,
    pub error: Value,
}

impl ContractDocument {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Compile every schema with default config.
    pub fn into_contract(self) -> Result<Contract> {
        self.into_contract_with_config(SchemaConfig::default())
    }

    /// Compile every schema with explicit config.
    pub fn into_contract_with_config(self, config: SchemaConfig) -> Result<Contract> {
        let mut contract = Contract::new(self.route.clone());
        for (method, doc) in self.methods {
            let compile = |slot: &'static str, document: &Value| -> Result<SchemaRef> {
                let schema = JsonSchema::compile_with_config(document, config).map_err(|source| {
                    ContractError::Schema {
                        route: self.route.clone(),
                        method,
                        slot,
                        source,
                    }
                })?;
                Ok(Arc::new(schema))
            };

            let mut spec = MethodSpec::new(
                compile("success", &doc.response.success)?,
                compile("error", &doc.response.error)?,
            );
            if let Some(query) = &doc.query {
                spec = spec.with_query(compile("query", query)?);
            }
            if let Some(body) = &doc.body {
                spec = spec.with_body(compile("body", body)?);
            }
            if let Some(params) = &doc.params {
                spec = spec.with_params(compile("params", params)?);
            }
            contract = contract.with_method(method, spec);
        }
        Ok(contract)
    }
}

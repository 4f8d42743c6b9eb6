use jsonschema::Validator;
use serde_json::Value;
use tracing::debug;

use crate::config::SchemaConfig;
use crate::error::{Result, SchemaError};
use crate::schema::Schema;

/// A compiled JSON Schema document used as a [`Schema`].
///
/// Parsing never transforms the value: a valid value is returned as-is.
pub struct JsonSchema {
    validator: Validator,
    document: Value,
    config: SchemaConfig,
}

impl JsonSchema {
    /// Compile a schema document with default config.
    pub fn compile(document: &Value) -> Result<Self> {
        Self::compile_with_config(document, SchemaConfig::default())
    }

    /// Compile a schema document with explicit config.
    pub fn compile_with_config(document: &Value, config: SchemaConfig) -> Result<Self> {
        let validator = jsonschema::validator_for(document)
            .map_err(|err| SchemaError::Compile(err.to_string()))?;

        Ok(Self {
            validator,
            document: document.clone(),
            config,
        })
    }

    /// Compile a schema from a JSON string.
    pub fn from_json_str(schema_json: &str) -> Result<Self> {
        let document: Value = serde_json::from_str(schema_json)
            .map_err(|err| SchemaError::InvalidJson(err.to_string()))?;
        Self::compile(&document)
    }

    /// Check `value` without taking ownership.
    pub fn validate(&self, value: &Value) -> Result<()> {
        let mut errors = self.validator.iter_errors(value);
        let Some(first) = errors.next() else {
            return Ok(());
        };

        let mut issues = vec![first.to_string()];
        for err in errors.take(self.config.max_reported_issues.saturating_sub(1)) {
            issues.push(err.to_string());
        }
        debug!(issues = issues.len(), "value rejected by json schema");
        Err(SchemaError::Invalid { issues })
    }

    /// The document this schema was compiled from.
    pub fn document(&self) -> &Value {
        &self.document
    }

    pub fn config(&self) -> &SchemaConfig {
        &self.config
    }
}

impl Schema for JsonSchema {
    fn parse(&self, value: Value) -> Result<Value> {
        self.validate(&value)?;
        Ok(value)
    }
}

impl std::fmt::Debug for JsonSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonSchema")
            .field("document", &self.document)
            .field("config", &self.config)
            .finish()
    }
}

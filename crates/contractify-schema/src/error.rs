/// Errors produced while compiling or applying a schema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// The schema document could not be compiled.
    #[error("failed to compile schema: {0}")]
    Compile(String),

    /// The schema document is not valid JSON.
    #[error("schema is not valid JSON: {0}")]
    InvalidJson(String),

    /// The value was rejected. Each issue names the offending location.
    #[error("value rejected by schema: {}", issues.join("; "))]
    Invalid { issues: Vec<String> },
}

impl SchemaError {
    /// Build a rejection carrying a single issue.
    pub fn invalid(issue: impl Into<String>) -> Self {
        Self::Invalid {
            issues: vec![issue.into()],
        }
    }

    /// Violation messages, empty for compile failures.
    pub fn issues(&self) -> &[String] {
        match self {
            Self::Invalid { issues } => issues,
            _ => &[],
        }
    }
}

pub type Result<T> = std::result::Result<T, SchemaError>;

/// Controls how [`crate::JsonSchema`] reports rejections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaConfig {
    /// Maximum number of violation messages collected per rejected value.
    pub max_reported_issues: usize,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            max_reported_issues: 4,
        }
    }
}

/// Execution environment, used only to pick the default for response
/// validation.
///
/// Read it once at startup with [`ExecutionEnvironment::from_env`] and pass it
/// to [`crate::DispatcherBuilder::environment`]; the dispatcher never reads
/// the process environment itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionEnvironment {
    #[default]
    Development,
    Production,
}

impl ExecutionEnvironment {
    /// Primary variable consulted by [`Self::from_env`].
    pub const ENV_VAR: &'static str = "CONTRACTIFY_ENV";
    /// Consulted when [`Self::ENV_VAR`] is unset.
    pub const FALLBACK_ENV_VAR: &'static str = "NODE_ENV";

    /// Read the process environment.
    pub fn from_env() -> Self {
        std::env::var(Self::ENV_VAR)
            .or_else(|_| std::env::var(Self::FALLBACK_ENV_VAR))
            .map(|value| Self::from_value(&value))
            .unwrap_or_default()
    }

    /// Only the exact value `production` selects [`Self::Production`].
    pub fn from_value(value: &str) -> Self {
        if value == "production" {
            Self::Production
        } else {
            Self::Development
        }
    }

    pub fn is_production(self) -> bool {
        self == Self::Production
    }

    /// Responses are validated everywhere except production.
    pub fn validates_responses_by_default(self) -> bool {
        !self.is_production()
    }
}

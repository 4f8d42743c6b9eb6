use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ConfigError;

/// Script config. Recognized so it can be reported, never evaluated.
pub const SCRIPT_CONFIG_FILE: &str = "contractify.config.ts";
/// JSON config, read when present.
pub const JSON_CONFIG_FILE: &str = "contractify.config.json";

/// Where contracts live and which files are aggregated.
///
/// Fields missing from a config file keep their default values; keys this
/// struct does not know are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorConfig {
    /// Contracts directory, relative to the project root.
    pub contracts_dir: String,
    /// Artifact file name, relative to the contracts directory.
    pub generated_file: String,
    /// Include globs. Empty falls back to [`crate::DEFAULT_INCLUDE`].
    pub include: Vec<String>,
    /// Exclude globs; an exclude always beats an include.
    pub exclude: Vec<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            contracts_dir: "contracts".to_string(),
            generated_file: "_generated.ts".to_string(),
            include: vec![
                "**/*.contract.ts".to_string(),
                "**/*.contracts.ts".to_string(),
                "**/*.contract.tsx".to_string(),
                "**/*.ts".to_string(),
            ],
            exclude: vec!["**/_generated.ts".to_string(), "**/*.d.ts".to_string()],
        }
    }
}

impl GeneratorConfig {
    /// Absolute contracts directory for a project root.
    pub fn contracts_dir(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.contracts_dir)
    }

    /// Artifact path inside a contracts directory.
    pub fn generated_file(&self, contracts_dir: &Path) -> PathBuf {
        contracts_dir.join(&self.generated_file)
    }
}

/// Resolve configuration for `project_root`.
///
/// Precedence: script config (reported and skipped), then JSON config, then
/// built-in defaults.
pub fn load_config(project_root: &Path) -> Result<GeneratorConfig, ConfigError> {
    let script_path = project_root.join(SCRIPT_CONFIG_FILE);
    if script_path.is_file() {
        warn!(
            path = %script_path.display(),
            "script config cannot be evaluated; use {JSON_CONFIG_FILE} instead"
        );
    }

    let json_path = project_root.join(JSON_CONFIG_FILE);
    if !json_path.is_file() {
        debug!("no config file found; using defaults");
        return Ok(GeneratorConfig::default());
    }

    let raw = std::fs::read_to_string(&json_path).map_err(|source| ConfigError::Read {
        path: json_path.clone(),
        source,
    })?;
    let config = parse_config(&raw).map_err(|source| ConfigError::Parse {
        path: json_path.clone(),
        source,
    })?;
    debug!(path = %json_path.display(), "loaded config");
    Ok(config)
}

fn parse_config(raw: &str) -> Result<GeneratorConfig, serde_json::Error> {
    // `null` is accepted as "no overrides".
    let config: Option<GeneratorConfig> = serde_json::from_str(raw)?;
    Ok(config.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_temp_project(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "contractify-config-{tag}-{}-{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn defaults_when_no_config_file() {
        let dir = make_temp_project("defaults");

        let config = load_config(&dir).unwrap();
        assert_eq!(config, GeneratorConfig::default());
        assert_eq!(config.contracts_dir(&dir), dir.join("contracts"));
        assert_eq!(
            config.generated_file(&dir.join("contracts")),
            dir.join("contracts").join("_generated.ts")
        );

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn json_config_merges_over_defaults() {
        let dir = make_temp_project("json");
        std::fs::write(
            dir.join(JSON_CONFIG_FILE),
            r#"{ "contractsDir": "src/api", "include": ["**/*.api.ts"] }"#,
        )
        .unwrap();

        let config = load_config(&dir).unwrap();
        assert_eq!(config.contracts_dir, "src/api");
        assert_eq!(config.include, vec!["**/*.api.ts".to_string()]);
        assert_eq!(config.generated_file, "_generated.ts");
        assert_eq!(config.exclude, GeneratorConfig::default().exclude);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn script_config_is_skipped() {
        let dir = make_temp_project("script");
        std::fs::write(
            dir.join(SCRIPT_CONFIG_FILE),
            "export default { contractsDir: 'elsewhere' }",
        )
        .unwrap();

        let config = load_config(&dir).unwrap();
        assert_eq!(config, GeneratorConfig::default());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let dir = make_temp_project("malformed");
        std::fs::write(dir.join(JSON_CONFIG_FILE), "{ contractsDir: ").unwrap();

        assert!(matches!(
            load_config(&dir),
            Err(ConfigError::Parse { path, .. }) if path == dir.join(JSON_CONFIG_FILE)
        ));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let config = parse_config(
            r#"{ "$schema": "./contractify.schema.json", "generatedFile": "index.ts" }"#,
        )
        .unwrap();
        assert_eq!(config.generated_file, "index.ts");
        assert_eq!(config.contracts_dir, "contracts");
    }

    #[test]
    fn null_means_defaults() {
        assert_eq!(parse_config("null").unwrap(), GeneratorConfig::default());
    }
}

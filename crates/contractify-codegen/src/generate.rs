use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::{load_config, GeneratorConfig};
use crate::discovery::discover;
use crate::error::{CodegenError, Result};
use crate::identifier::derive_entries;
use crate::render::render_registry;

/// Result of a successful generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    /// Path of the written artifact.
    pub out_file: PathBuf,
    /// Directory that was searched.
    pub contracts_dir: PathBuf,
    /// Number of contracts aggregated.
    pub count: usize,
}

/// Resolve config for `project_root` and regenerate the registry.
pub fn generate(project_root: &Path) -> Result<Generated> {
    let config = load_config(project_root)?;
    generate_with_config(project_root, &config)
}

/// Regenerate the registry with an already resolved config.
///
/// Nothing is written unless discovery and identifier derivation succeed.
/// The final write is not atomic; an interrupted run can leave a truncated
/// artifact, which the next run replaces.
pub fn generate_with_config(project_root: &Path, config: &GeneratorConfig) -> Result<Generated> {
    let project_root = std::path::absolute(project_root).map_err(|source| CodegenError::Io {
        path: project_root.to_path_buf(),
        source,
    })?;
    let contracts_dir = config.contracts_dir(&project_root);
    let out_file = config.generated_file(&contracts_dir);

    let files = discover(&contracts_dir, &config.include, &config.exclude, &out_file)?;
    let entries = derive_entries(&contracts_dir, &files)?;
    let content = render_registry(&entries);

    write_artifact(&out_file, &content)?;
    info!(
        out_file = %out_file.display(),
        count = entries.len(),
        "generated contract registry"
    );

    Ok(Generated {
        out_file,
        contracts_dir,
        count: entries.len(),
    })
}

fn write_artifact(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| CodegenError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    debug!(path = %path.display(), bytes = content.len(), "writing artifact");
    std::fs::write(path, content).map_err(|source| CodegenError::Io {
        path: path.to_path_buf(),
        source,
    })
}

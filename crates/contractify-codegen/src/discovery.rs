use std::path::{Path, PathBuf};

use ignore::overrides::OverrideBuilder;
use ignore::WalkBuilder;
use tracing::debug;

use crate::error::{CodegenError, Result};

/// Include pattern used when the configured include list is empty.
pub const DEFAULT_INCLUDE: &str = "**/*.contract.ts";

/// Find contract files under `base_dir`.
///
/// Patterns are gitignore-style globs relative to `base_dir`; excludes win
/// over includes. A pattern without `/` matches at any depth, a leading `/`
/// anchors it to `base_dir`. Hidden directories are skipped and ignore files
/// are not consulted. `artifact` is always dropped from the result by
/// resolved-path comparison, whatever the patterns say. The result is sorted.
pub fn discover(
    base_dir: &Path,
    include: &[String],
    exclude: &[String],
    artifact: &Path,
) -> Result<Vec<PathBuf>> {
    let base_dir = std::path::absolute(base_dir).map_err(|source| CodegenError::Io {
        path: base_dir.to_path_buf(),
        source,
    })?;
    if !base_dir.is_dir() {
        return Err(CodegenError::NoContractsFound { dir: base_dir });
    }

    let mut overrides = OverrideBuilder::new(&base_dir);
    if include.is_empty() {
        overrides
            .add(DEFAULT_INCLUDE)
            .map_err(CodegenError::InvalidPattern)?;
    }
    for pattern in include {
        overrides
            .add(pattern)
            .map_err(CodegenError::InvalidPattern)?;
    }
    for pattern in exclude {
        overrides
            .add(&format!("!{pattern}"))
            .map_err(CodegenError::InvalidPattern)?;
    }
    let overrides = overrides.build().map_err(CodegenError::InvalidPattern)?;

    let artifact = resolve(&base_dir.join(artifact));
    let walker = WalkBuilder::new(&base_dir)
        .standard_filters(false)
        .hidden(true)
        .follow_links(true)
        .overrides(overrides)
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(CodegenError::Walk)?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if resolve(path) == artifact {
            debug!(path = %path.display(), "skipping generated artifact");
            continue;
        }
        debug!(path = %path.display(), "discovered contract");
        files.push(path.to_path_buf());
    }

    if files.is_empty() {
        return Err(CodegenError::NoContractsFound { dir: base_dir });
    }

    files.sort();
    Ok(files)
}

fn resolve(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{CodegenError, Result};

/// Suffix appended to every derived identifier.
const IDENTIFIER_SUFFIX: &str = "Contract";

/// A discovered contract file and the names the renderer uses for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    pub path: PathBuf,
    pub identifier: String,
    pub import_reference: String,
}

/// Symbol name for a contract file, derived from its base name only.
///
/// `user.contract.ts` becomes `user_contractContract`.
pub fn identifier_for(path: &Path) -> String {
    let base = path
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();
    let mut identifier: String = strip_extension(&base)
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '$' {
                c
            } else {
                '_'
            }
        })
        .collect();
    identifier.push_str(IDENTIFIER_SUFFIX);
    identifier
}

/// `./`-prefixed, `/`-separated, extensionless path of `path` relative to
/// `base_dir`.
pub fn import_reference_for(base_dir: &Path, path: &Path) -> Result<String> {
    let relative = path
        .strip_prefix(base_dir)
        .map_err(|_| CodegenError::OutsideContractsDir {
            path: path.to_path_buf(),
            dir: base_dir.to_path_buf(),
        })?;

    let mut segments: Vec<String> = relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy().into_owned())
        .collect();
    if let Some(last) = segments.last_mut() {
        *last = strip_extension(last).to_string();
    }
    Ok(format!("./{}", segments.join("/")))
}

/// Derive identifiers and import references for files in discovery order.
///
/// Fails when two files derive the same identifier, since the rendered
/// registry would otherwise bind one import over the other.
pub fn derive_entries(base_dir: &Path, files: &[PathBuf]) -> Result<Vec<DiscoveredFile>> {
    let mut seen: HashMap<String, &Path> = HashMap::with_capacity(files.len());
    let mut entries = Vec::with_capacity(files.len());

    for path in files {
        let identifier = identifier_for(path);
        if let Some(first) = seen.insert(identifier.clone(), path) {
            return Err(CodegenError::IdentifierCollision {
                identifier,
                first: first.to_path_buf(),
                second: path.clone(),
            });
        }
        entries.push(DiscoveredFile {
            path: path.clone(),
            import_reference: import_reference_for(base_dir, path)?,
            identifier,
        });
    }

    Ok(entries)
}

/// Drop the last `.segment` of a file name, if it has a non-empty one.
fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(dot) if dot + 1 < name.len() => &name[..dot],
        _ => name,
    }
}

use std::path::PathBuf;

/// Errors raised while resolving generator configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The config file is not valid JSON or a field has the wrong type.
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Errors raised by registry generation. All of them abort the run.
#[derive(Debug, thiserror::Error)]
pub enum CodegenError {
    /// Discovery matched nothing after exclusions.
    #[error("no contracts found in: {}", dir.display())]
    NoContractsFound { dir: PathBuf },

    /// Two files sanitize to the same import identifier.
    #[error(
        "identifier `{identifier}` derived from both {} and {}",
        first.display(),
        second.display()
    )]
    IdentifierCollision {
        identifier: String,
        first: PathBuf,
        second: PathBuf,
    },

    /// A discovered file does not live under the contracts directory.
    #[error("{} is outside contracts directory {}", path.display(), dir.display())]
    OutsideContractsDir { path: PathBuf, dir: PathBuf },

    /// An include or exclude pattern is not a valid glob.
    #[error("invalid glob pattern: {0}")]
    InvalidPattern(#[source] ignore::Error),

    /// Directory traversal failed.
    #[error("failed walking contracts directory: {0}")]
    Walk(#[source] ignore::Error),

    /// Reading or writing a path failed.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, CodegenError>;

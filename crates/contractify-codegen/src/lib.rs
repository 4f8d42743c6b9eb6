//! Registry generation for contractify.
//!
//! Generation is a one-shot pipeline:
//!
//! 1. [`config`] resolves where contracts live and which files count.
//! 2. [`discovery`] walks the contracts directory and returns a sorted list
//!    of contract files, never including the generated artifact itself.
//! 3. [`identifier`] derives a symbol name and an import reference per file.
//! 4. [`render`] turns the ordered entries into the registry source text.
//! 5. [`generate`] ties it together and writes the artifact.
//!
//! Output is a pure function of the file-system state: rerunning against the
//! same tree produces a byte-identical artifact.

pub mod config;
pub mod discovery;
pub mod error;
pub mod generate;
pub mod identifier;
pub mod render;

pub use config::{load_config, GeneratorConfig, JSON_CONFIG_FILE, SCRIPT_CONFIG_FILE};
pub use discovery::{discover, DEFAULT_INCLUDE};
pub use error::{CodegenError, ConfigError, Result};
pub use generate::{generate, generate_with_config, Generated};
pub use identifier::{derive_entries, identifier_for, import_reference_for, DiscoveredFile};
pub use render::{render_registry, GENERATED_HEADER};

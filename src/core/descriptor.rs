//! The extension descriptor handed to the external build driver.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::builder::flags::FlagSet;
use crate::builder::sources::SourceManifest;
use crate::util::diagnostic::ConfigurationError;

/// Everything the external driver needs to compile and link the extension.
///
/// Pure aggregation of the sub-components' results; the configuration core
/// never inspects it again after construction.
#[derive(Debug, Clone, Serialize)]
pub struct ExtensionDescriptor {
    /// Extension name
    pub name: String,
    /// Compilation units, sorted
    pub sources: Vec<PathBuf>,
    /// Header dependency list (inputs, not compiled)
    pub headers: Vec<PathBuf>,
    /// Include search paths
    pub include_dirs: Vec<PathBuf>,
    /// Compile flags, in assembly order
    pub cflags: Vec<String>,
    /// Link flags, in assembly order
    pub ldflags: Vec<String>,
    /// Libraries to link against (system-library mode only)
    pub libraries: Vec<String>,
    /// Restrict the extension to the stable host API
    pub py_limited_api: bool,
}

impl ExtensionDescriptor {
    /// Build the descriptor for a vendored-source configuration.
    ///
    /// Fails if the manifest carries no vendored compilation units (the
    /// detection point for an un-initialized submodule) or a required
    /// include directory is missing on disk.
    pub fn build(
        name: &str,
        manifest: SourceManifest,
        include_dirs: Vec<PathBuf>,
        flags: FlagSet,
        vendor_root: &Path,
    ) -> Result<Self, ConfigurationError> {
        if manifest.vendored_unit_count() == 0 {
            return Err(ConfigurationError::EmptyManifest {
                path: vendor_root.to_path_buf(),
            });
        }

        for dir in &include_dirs {
            if !dir.is_dir() {
                return Err(ConfigurationError::MissingIncludeDir { path: dir.clone() });
            }
        }

        Ok(ExtensionDescriptor {
            name: name.to_string(),
            sources: manifest.sources,
            headers: manifest.headers,
            include_dirs,
            cflags: flags.cflags,
            ldflags: flags.ldflags,
            libraries: Vec::new(),
            py_limited_api: true,
        })
    }

    /// Build the descriptor for the system-library configuration: no
    /// vendored sources, no include dirs, a library-name dependency instead.
    pub fn for_system_library(name: &str, shim: &Path, flags: FlagSet, library: &str) -> Self {
        ExtensionDescriptor {
            name: name.to_string(),
            sources: vec![shim.to_path_buf()],
            headers: Vec::new(),
            include_dirs: Vec::new(),
            cflags: flags.cflags,
            ldflags: flags.ldflags,
            libraries: vec![library.to_string()],
            py_limited_api: true,
        }
    }
}

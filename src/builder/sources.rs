//! Source tree aggregation.
//!
//! Walks the vendored library's `src` and `include` roots and partitions
//! files by extension: `.c`/`.cpp` become compilation units, `.h` become
//! header dependencies. The hand-authored extension shim is always part of
//! the manifest. Output is sorted and deduplicated so the build is
//! reproducible regardless of filesystem traversal order.

use std::path::{Path, PathBuf};

use serde::Serialize;
use walkdir::WalkDir;

/// The partitioned source tree handed to the build driver.
#[derive(Debug, Clone, Serialize)]
pub struct SourceManifest {
    /// Compilation units, sorted lexicographically
    pub sources: Vec<PathBuf>,
    /// Header dependencies, sorted lexicographically
    pub headers: Vec<PathBuf>,
    /// How many compilation units came from the vendored tree (excludes the shim)
    #[serde(skip)]
    vendored_units: usize,
}

impl SourceManifest {
    /// Walk the vendored source and include roots and build the manifest.
    ///
    /// Missing roots are tolerated here; an empty vendored tree is rejected
    /// later, at descriptor construction.
    pub fn aggregate(src_dir: &Path, include_dir: &Path, shim: &Path) -> Self {
        let mut sources = Vec::new();
        let mut headers = Vec::new();

        for root in [src_dir, include_dir] {
            for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
                if !entry.file_type().is_file() {
                    continue;
                }
                let path = entry.into_path();
                match path.extension().and_then(|e| e.to_str()) {
                    Some("c") | Some("cpp") => sources.push(path),
                    Some("h") => headers.push(path),
                    _ => {}
                }
            }
        }

        sources.sort();
        sources.dedup();
        let vendored_units = sources.len();

        sources.push(shim.to_path_buf());
        sources.sort();
        sources.dedup();

        headers.sort();
        headers.dedup();

        tracing::debug!(
            "aggregated {} compilation units and {} headers",
            sources.len(),
            headers.len()
        );

        SourceManifest {
            sources,
            headers,
            vendored_units,
        }
    }

    /// Number of compilation units found in the vendored tree, excluding
    /// the always-present shim.
    pub fn vendored_unit_count(&self) -> usize {
        self.vendored_units
    }
}

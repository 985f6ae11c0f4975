//! Typed configuration errors with actionable remediation text.
//!
//! Every fatal error carries enough context for the user to fix the
//! prerequisite: root cause plus a `help:` line where one exists. Fatal
//! errors propagate uncaught to the process boundary; no partial
//! configuration is ever handed to the build driver.

use std::path::PathBuf;

use thiserror::Error;

/// Common suggestion messages for consistent error handling.
pub mod suggestions {
    /// Suggestion when the vendored libsass tree is missing.
    pub const MISSING_SUBMODULE: &str = "help: run `git submodule update --init`";

    /// Suggestion when no version source is available.
    pub const NO_VERSION_SOURCE: &str =
        "help: build from a full git checkout once to populate the version cache";
}

/// Unrecoverable missing prerequisite; aborts the whole configuration pass.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// The vendored libsass submodule has not been initialized.
    #[error(
        "missing the libsass submodule at {path}\n{}",
        suggestions::MISSING_SUBMODULE
    )]
    MissingVendoredTree { path: PathBuf },

    /// Source aggregation found no compilation units in the vendored tree.
    #[error(
        "vendored libsass tree at {path} contains no compilation units\n{}",
        suggestions::MISSING_SUBMODULE
    )]
    EmptyManifest { path: PathBuf },

    /// A required include directory is absent on disk.
    #[error("include directory does not exist: {path}")]
    MissingIncludeDir { path: PathBuf },
}

/// Neither version-control metadata nor a persisted cache file is available.
#[derive(Debug, Error)]
#[error(
    "cannot determine the libsass version: no git checkout at {repo} and no cached \
     version file at {cache}\n{}",
    suggestions::NO_VERSION_SOURCE
)]
pub struct VersionResolutionError {
    pub repo: PathBuf,
    pub cache: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_tree_message_includes_remediation() {
        let err = ConfigurationError::MissingVendoredTree {
            path: PathBuf::from("libsass"),
        };
        let msg = err.to_string();
        assert!(msg.contains("libsass"));
        assert!(msg.contains("git submodule update --init"));
    }

    #[test]
    fn test_version_error_names_both_fallbacks() {
        let err = VersionResolutionError {
            repo: PathBuf::from("libsass"),
            cache: PathBuf::from(".libsass-upstream-version"),
        };
        let msg = err.to_string();
        assert!(msg.contains("libsass"));
        assert!(msg.contains(".libsass-upstream-version"));
    }
}

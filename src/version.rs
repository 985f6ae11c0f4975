//! Upstream version resolution.
//!
//! The vendored libsass version is derived from the submodule's git
//! metadata: an abbreviated describe with a dirty-tree marker, persisted to
//! a cache file so that builds from a source archive (no `.git`) still
//! resolve the same string. The cache path is always passed in explicitly;
//! the resolver carries no ambient file-path constant.

use std::path::Path;

use anyhow::{Context, Result};
use git2::{DescribeFormatOptions, DescribeOptions, Repository};

use crate::util::diagnostic::VersionResolutionError;

/// Resolve the upstream version string.
///
/// With a `.git` checkout present under `repo_root`, describes the work
/// tree and overwrites `cache_path` with the result. Without one, falls
/// back to the cache file; if that is missing too, fails with
/// [`VersionResolutionError`].
pub fn resolve_version(repo_root: &Path, cache_path: &Path) -> Result<String> {
    if repo_root.join(".git").exists() {
        let version = describe_checkout(repo_root)?;
        crate::util::fs::write_string(cache_path, &version)?;
        tracing::debug!("resolved upstream version {} from git metadata", version);
        return Ok(version);
    }

    if cache_path.exists() {
        let cached = crate::util::fs::read_to_string(cache_path)?;
        let version = cached.trim().to_string();
        tracing::debug!("resolved upstream version {} from cache file", version);
        return Ok(version);
    }

    Err(VersionResolutionError {
        repo: repo_root.to_path_buf(),
        cache: cache_path.to_path_buf(),
    }
    .into())
}

/// Describe the work tree: tags considered, 4-character hash abbreviation,
/// `-dirty` suffix, plain commit oid as a fallback when no tag matches.
fn describe_checkout(repo_root: &Path) -> Result<String> {
    let repo = Repository::open(repo_root)
        .with_context(|| format!("failed to open git repository: {}", repo_root.display()))?;

    let mut opts = DescribeOptions::new();
    opts.describe_tags().show_commit_oid_as_fallback(true);

    let describe = repo
        .describe(&opts)
        .context("git describe failed for the vendored checkout")?;

    let mut format = DescribeFormatOptions::new();
    format.abbreviated_size(4).dirty_suffix("-dirty");

    let out = describe
        .format(Some(&format))
        .context("failed to format git describe output")?;

    Ok(out.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use git2::Signature;
    use tempfile::TempDir;

    fn init_repo_with_commit(root: &Path) -> String {
        let repo = Repository::init(root).unwrap();
        fs::write(root.join("encode.c"), "void encode(void) {}\n").unwrap();

        let mut index = repo.index().unwrap();
        index.add_path(Path::new("encode.c")).unwrap();
        index.write().unwrap();
        let tree_id = index.write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();

        let sig = Signature::now("tester", "tester@example.com").unwrap();
        let oid = repo
            .commit(Some("HEAD"), &sig, &sig, "initial", &tree, &[])
            .unwrap();
        oid.to_string()
    }

    #[test]
    fn test_describe_falls_back_to_abbreviated_oid() {
        let tmp = TempDir::new().unwrap();
        let commit = init_repo_with_commit(tmp.path());
        let cache = tmp.path().join("version-cache");

        let version = resolve_version(tmp.path(), &cache).unwrap();

        // No tags, so the describe falls back to the abbreviated commit oid.
        assert!(version.len() >= 4);
        assert!(commit.starts_with(&version));
    }

    #[test]
    fn test_resolution_persists_cache_file() {
        let tmp = TempDir::new().unwrap();
        init_repo_with_commit(tmp.path());
        let cache = tmp.path().join("version-cache");

        let version = resolve_version(tmp.path(), &cache).unwrap();

        assert_eq!(fs::read_to_string(&cache).unwrap(), version);
    }

    #[test]
    fn test_dirty_work_tree_gets_suffix() {
        let tmp = TempDir::new().unwrap();
        init_repo_with_commit(tmp.path());
        fs::write(tmp.path().join("encode.c"), "void encode(int);\n").unwrap();
        let cache = tmp.path().join("version-cache");

        let version = resolve_version(tmp.path(), &cache).unwrap();

        assert!(version.ends_with("-dirty"), "got {version}");
    }

    #[test]
    fn test_cache_fallback_without_metadata() {
        let tmp = TempDir::new().unwrap();
        let cache = tmp.path().join("version-cache");
        fs::write(&cache, "3.6.4\n").unwrap();

        let version = resolve_version(&tmp.path().join("no-checkout"), &cache).unwrap();
        assert_eq!(version, "3.6.4");
    }

    #[test]
    fn test_cache_round_trip_is_identical() {
        let tmp = TempDir::new().unwrap();
        init_repo_with_commit(tmp.path());
        let cache = tmp.path().join("version-cache");

        let fresh = resolve_version(tmp.path(), &cache).unwrap();
        // Simulate a source-archive build: same cache, no .git.
        let archive_root = PathBuf::from(tmp.path()).join("unpacked");
        let cached = resolve_version(&archive_root, &cache).unwrap();

        assert_eq!(fresh, cached);
    }

    #[test]
    fn test_no_metadata_and_no_cache_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let err = resolve_version(
            &tmp.path().join("no-checkout"),
            &tmp.path().join("no-cache"),
        )
        .unwrap_err();

        assert!(err.downcast_ref::<VersionResolutionError>().is_some());
    }
}

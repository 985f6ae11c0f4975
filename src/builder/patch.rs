//! Scoped C-linkage source patch.
//!
//! The external build driver has no per-translation-unit language override,
//! so on Darwin/BSD one vendored C file (`cencode.c`) would get its symbols
//! C++-mangled by the clang++ link driver. The workaround rewrites the file
//! in place with an `extern "C"` guard that is a no-op under a pure C
//! compile, and restores the original bytes when the patch is released.
//!
//! Restoration is guaranteed on every exit path: explicit [`LinkagePatch::release`]
//! on success, `Drop` on error or panic unwind, and a signal hook for
//! SIGINT/SIGTERM. At most one file is in the patched state at a time.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, Once};

use anyhow::{bail, Context, Result};

const GUARD_PRELUDE: &str = "#ifdef __cplusplus\nextern \"C\" {\n#endif\n";
const GUARD_POSTLUDE: &str = "#ifdef __cplusplus\n}\n#endif\n";

/// The one live patch, shared with the signal hook.
static ACTIVE_PATCH: Mutex<Option<(PathBuf, Vec<u8>)>> = Mutex::new(None);
static SIGNAL_HOOK: Once = Once::new();

/// A source file temporarily rewritten with a C-linkage guard.
///
/// Holds the original byte content; releasing (or dropping) the patch
/// writes it back.
#[derive(Debug)]
pub struct LinkagePatch {
    path: PathBuf,
    original: Vec<u8>,
    released: bool,
}

impl LinkagePatch {
    /// Capture the file's original content and rewrite it with the guard.
    pub fn apply(path: &Path) -> Result<LinkagePatch> {
        let mut active = ACTIVE_PATCH
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some((existing, _)) = active.as_ref() {
            bail!(
                "a linkage patch is already active on {}; only one file may be patched at a time",
                existing.display()
            );
        }

        let original = crate::util::fs::read_bytes(path)?;

        let mut patched =
            Vec::with_capacity(GUARD_PRELUDE.len() + original.len() + GUARD_POSTLUDE.len());
        patched.extend_from_slice(GUARD_PRELUDE.as_bytes());
        patched.extend_from_slice(&original);
        patched.extend_from_slice(GUARD_POSTLUDE.as_bytes());

        std::fs::write(path, &patched)
            .with_context(|| format!("failed to patch source file: {}", path.display()))?;

        *active = Some((path.to_path_buf(), original.clone()));
        drop(active);

        install_signal_hook();

        tracing::debug!("applied C-linkage guard to {}", path.display());

        Ok(LinkagePatch {
            path: path.to_path_buf(),
            original,
            released: false,
        })
    }

    /// Restore the original file content.
    ///
    /// Idempotent: releasing twice, or releasing after the file has been
    /// removed, is a no-op.
    pub fn release(&mut self) -> Result<()> {
        if self.released {
            return Ok(());
        }
        self.released = true;

        let result = restore(&self.path, &self.original);

        *ACTIVE_PATCH
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;

        result
    }

    /// The patched file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for LinkagePatch {
    fn drop(&mut self) {
        if !self.released {
            // A failed restore corrupts the vendored tree for later builds;
            // surface it even though Drop cannot propagate.
            if let Err(e) = self.release() {
                tracing::error!(
                    "failed to restore patched source {}: {:#}",
                    self.path.display(),
                    e
                );
            }
        }
    }
}

fn restore(path: &Path, original: &[u8]) -> Result<()> {
    if !path.is_file() {
        return Ok(());
    }
    std::fs::write(path, original)
        .with_context(|| format!("failed to restore source file: {}", path.display()))?;
    tracing::debug!("restored original content of {}", path.display());
    Ok(())
}

/// Restore the active patch, if any. Called from the signal hook.
fn restore_active() {
    let taken = ACTIVE_PATCH
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .take();
    if let Some((path, original)) = taken {
        if let Err(e) = restore(&path, &original) {
            eprintln!("error: {:#}", e);
        }
    }
}

fn install_signal_hook() {
    SIGNAL_HOOK.call_once(|| {
        if let Err(e) = ctrlc::set_handler(|| {
            restore_active();
            std::process::exit(130);
        }) {
            tracing::warn!("could not install signal handler for patch cleanup: {}", e);
        }
    });
}

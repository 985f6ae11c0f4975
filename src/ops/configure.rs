//! The configuration pipeline.
//!
//! One pass per process invocation: platform profile → toolchain override →
//! flag assembly (fed by the version resolver) → source aggregation →
//! linkage patch → extension descriptor. Fatal errors propagate to the
//! process boundary; the descriptor is only emitted when every step
//! succeeded.

use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;

use crate::builder::flags::FlagSet;
use crate::builder::patch::LinkagePatch;
use crate::builder::sources::SourceManifest;
use crate::builder::toolchain::{
    check_msvc_environment, ClangOverride, CompilerSlots, CustomizeToolchain, DriverDefault,
    ToolchainSpec,
};
use crate::core::descriptor::ExtensionDescriptor;
use crate::core::platform::PlatformProfile;
use crate::util::diagnostic::ConfigurationError;
use crate::version::resolve_version;

/// Name of the produced extension.
pub const EXTENSION_NAME: &str = "_sass";

/// The hand-authored extension shim, always compiled into the extension.
pub const SHIM_SOURCE: &str = "_sass.c";

/// Directory of the vendored libsass checkout, relative to the project root.
pub const VENDOR_DIR: &str = "libsass";

/// Persisted version cache, relative to the project root.
pub const VERSION_CACHE_FILE: &str = ".libsass-upstream-version";

/// The C file that needs the C-linkage guard under a clang++ link.
pub const PATCHED_SOURCE: &str = "cencode.c";

/// Library name linked in system-library mode.
pub const SYSTEM_LIBRARY: &str = "sass";

/// Inputs to one configuration pass.
#[derive(Debug, Clone)]
pub struct ConfigureOptions {
    /// Project root containing the vendored checkout and the shim
    pub root: PathBuf,
    /// Platform profile to configure for
    pub profile: PlatformProfile,
    /// Link against an installed libsass instead of building from source
    pub system_library: bool,
}

/// The configuration result handed to the external build driver.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigureOutcome {
    /// The extension build unit
    pub descriptor: ExtensionDescriptor,
    /// Forced compiler slots, when the profile overrides the driver default
    pub toolchain: Option<CompilerSlots>,
}

/// Run the full configuration pipeline.
pub fn configure(opts: &ConfigureOptions) -> Result<ConfigureOutcome> {
    let profile = opts.profile;
    tracing::info!("configuring for platform profile {}", profile);

    check_msvc_environment(profile);

    // Compose the toolchain override explicitly instead of mutating driver
    // state; the resulting slots travel with the outcome.
    let toolchain = ToolchainSpec::resolve(profile, &opts.root).map(|spec| {
        let customize = ClangOverride::new(DriverDefault, spec);
        let mut slots = CompilerSlots::driver_defaults();
        customize.customize(&mut slots);
        slots
    });

    let flags = FlagSet::assemble(profile);
    let shim = opts.root.join(SHIM_SOURCE);

    if opts.system_library {
        tracing::info!("linking against the installed {} library", SYSTEM_LIBRARY);
        let descriptor =
            ExtensionDescriptor::for_system_library(EXTENSION_NAME, &shim, flags, SYSTEM_LIBRARY);
        return Ok(ConfigureOutcome {
            descriptor,
            toolchain,
        });
    }

    let vendor_root = opts.root.join(VENDOR_DIR);

    // A full checkout without the submodule initialized is unrecoverable.
    if !vendor_root.join("Makefile").is_file() && opts.root.join(".git").is_dir() {
        return Err(ConfigurationError::MissingVendoredTree { path: vendor_root }.into());
    }

    let version = resolve_version(&vendor_root, &opts.root.join(VERSION_CACHE_FILE))?;
    let flags = flags.with_version_define(profile, &version);

    let src_dir = vendor_root.join("src");
    let include_dir = vendor_root.join("include");

    // Patch before aggregation; the guard restores the file on every exit
    // path out of this function.
    let mut patch = None;
    if profile.uses_clang_override() {
        let target = src_dir.join(PATCHED_SOURCE);
        if target.is_file() {
            patch = Some(LinkagePatch::apply(&target)?);
        } else {
            tracing::debug!("{} not present, skipping linkage workaround", target.display());
        }
    }

    let manifest = SourceManifest::aggregate(&src_dir, &include_dir, &shim);

    let descriptor = ExtensionDescriptor::build(
        EXTENSION_NAME,
        manifest,
        vec![include_dir],
        flags,
        &vendor_root,
    )?;

    if let Some(patch) = patch.as_mut() {
        patch.release()?;
    }

    Ok(ConfigureOutcome {
        descriptor,
        toolchain,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::diagnostic::VersionResolutionError;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn vendored_fixture(root: &Path) {
        let src = root.join("libsass/src");
        let include = root.join("libsass/include");
        fs::create_dir_all(&src).unwrap();
        fs::create_dir_all(&include).unwrap();
        fs::write(src.join("foo.c"), "").unwrap();
        fs::write(src.join("bar.cpp"), "").unwrap();
        fs::write(include.join("baz.h"), "").unwrap();
        fs::write(root.join("libsass/Makefile"), "all:\n").unwrap();
        fs::write(root.join("_sass.c"), "").unwrap();
        // No .git anywhere: version comes from the cache file.
        fs::write(root.join(VERSION_CACHE_FILE), "3.6.4\n").unwrap();
    }

    #[test]
    fn test_configure_from_vendored_tree() {
        let tmp = TempDir::new().unwrap();
        vendored_fixture(tmp.path());

        let outcome = configure(&ConfigureOptions {
            root: tmp.path().to_path_buf(),
            profile: PlatformProfile::GenericPosix,
            system_library: false,
        })
        .unwrap();

        let descriptor = &outcome.descriptor;
        assert_eq!(descriptor.name, EXTENSION_NAME);
        assert_eq!(descriptor.sources.len(), 3);
        assert_eq!(descriptor.headers.len(), 1);
        assert_eq!(
            descriptor.cflags.last().map(String::as_str),
            Some(r#"-DLIBSASS_VERSION="3.6.4""#)
        );
        assert!(descriptor.libraries.is_empty());
        // Generic POSIX keeps the driver's own toolchain.
        assert!(outcome.toolchain.is_none());
    }

    #[test]
    fn test_configure_system_library_mode() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("_sass.c"), "").unwrap();

        let outcome = configure(&ConfigureOptions {
            root: tmp.path().to_path_buf(),
            profile: PlatformProfile::GenericPosix,
            system_library: true,
        })
        .unwrap();

        let descriptor = &outcome.descriptor;
        assert_eq!(descriptor.libraries, vec![SYSTEM_LIBRARY]);
        assert!(descriptor.include_dirs.is_empty());
        // The shim stays in even when linking the installed library.
        assert_eq!(descriptor.sources, vec![tmp.path().join(SHIM_SOURCE)]);
        // No version stamp without the vendored source.
        assert!(!descriptor
            .cflags
            .iter()
            .any(|f| f.contains("LIBSASS_VERSION")));
    }

    #[test]
    fn test_uninitialized_submodule_aborts_with_remediation() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join(".git")).unwrap();

        let err = configure(&ConfigureOptions {
            root: tmp.path().to_path_buf(),
            profile: PlatformProfile::GenericPosix,
            system_library: false,
        })
        .unwrap_err();

        let config_err = err.downcast_ref::<ConfigurationError>().unwrap();
        assert!(matches!(
            config_err,
            ConfigurationError::MissingVendoredTree { .. }
        ));
        assert!(format!("{config_err}").contains("git submodule update --init"));
    }

    #[test]
    fn test_no_version_source_is_fatal() {
        let tmp = TempDir::new().unwrap();
        // Vendored tree exists but there is no .git and no cache file.
        fs::write(tmp.path().join("_sass.c"), "").unwrap();
        fs::create_dir_all(tmp.path().join("libsass/src")).unwrap();
        fs::write(tmp.path().join("libsass/Makefile"), "all:\n").unwrap();

        let err = configure(&ConfigureOptions {
            root: tmp.path().to_path_buf(),
            profile: PlatformProfile::GenericPosix,
            system_library: false,
        })
        .unwrap_err();

        assert!(err.downcast_ref::<VersionResolutionError>().is_some());
    }

    #[test]
    fn test_empty_vendored_tree_is_fatal() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("_sass.c"), "").unwrap();
        fs::create_dir_all(tmp.path().join("libsass/src")).unwrap();
        fs::create_dir_all(tmp.path().join("libsass/include")).unwrap();
        fs::write(tmp.path().join("libsass/Makefile"), "all:\n").unwrap();
        fs::write(tmp.path().join(VERSION_CACHE_FILE), "3.6.4\n").unwrap();

        let err = configure(&ConfigureOptions {
            root: tmp.path().to_path_buf(),
            profile: PlatformProfile::GenericPosix,
            system_library: false,
        })
        .unwrap_err();

        let config_err = err.downcast_ref::<ConfigurationError>().unwrap();
        assert!(matches!(config_err, ConfigurationError::EmptyManifest { .. }));
    }
}

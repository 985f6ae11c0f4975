//! Toolchain selection and the clang override.
//!
//! On Darwin and the BSDs the external build driver's own platform inference
//! can pick an incompatible default toolchain, so the chosen compiler is
//! forced into the driver's four executable slots. The override is modeled
//! as a decorator over a `customize toolchain` step rather than a mutation
//! of shared driver state, composed explicitly at configuration time.
//!
//! Override resolution priority:
//! 1. Toolchain config file (`.ballast/toolchain.toml` or `~/.ballast/toolchain.toml`)
//! 2. Environment variables (CC, CXX)
//! 3. Platform default (clang, clang++)

use std::path::Path;

use serde::Serialize;

use crate::core::platform::PlatformProfile;
use crate::util::config::{
    global_toolchain_config_path, load_toolchain_config, project_toolchain_config_path,
    ToolchainConfig,
};

/// The compiler pair forced onto Darwin/BSD builds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolchainSpec {
    /// C compiler executable
    pub cc: String,
    /// C++ compiler executable (also drives the shared-object link)
    pub cxx: String,
}

impl ToolchainSpec {
    /// Resolve the toolchain override for a profile.
    ///
    /// Returns `None` for profiles that keep the driver's default toolchain
    /// (Windows, generic POSIX).
    pub fn resolve(profile: PlatformProfile, project_root: &Path) -> Option<Self> {
        if !profile.uses_clang_override() {
            return None;
        }

        let project_path = project_toolchain_config_path(project_root);
        let config = if let Some(ref global) = global_toolchain_config_path() {
            load_toolchain_config(global, &project_path)
        } else {
            load_toolchain_config(Path::new(""), &project_path)
        };

        let spec = Self::from_sources(
            &config,
            std::env::var("CC").ok(),
            std::env::var("CXX").ok(),
        );

        if which::which(&spec.cc).is_err() {
            tracing::warn!("configured C compiler not found on PATH: {}", spec.cc);
        }

        tracing::info!("forcing toolchain: cc={}, cxx={}", spec.cc, spec.cxx);
        Some(spec)
    }

    /// Combine config-file, environment, and default identifiers.
    /// Config file wins over the environment; the environment wins over
    /// the clang defaults.
    fn from_sources(
        config: &ToolchainConfig,
        env_cc: Option<String>,
        env_cxx: Option<String>,
    ) -> Self {
        let cc = config
            .toolchain
            .cc
            .clone()
            .or(env_cc)
            .unwrap_or_else(|| "clang".to_string());
        let cxx = config
            .toolchain
            .cxx
            .clone()
            .or(env_cxx)
            .unwrap_or_else(|| "clang++".to_string());
        ToolchainSpec { cc, cxx }
    }
}

/// The four executable slots of the external driver's compiler object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompilerSlots {
    /// Plain C compile driver
    pub compiler: String,
    /// Shared-object compile driver
    pub compiler_so: String,
    /// C++ compile driver
    pub compiler_cxx: String,
    /// Shared-object link driver
    pub linker_so: String,
}

impl CompilerSlots {
    /// The driver's own defaults before any customization runs.
    pub fn driver_defaults() -> Self {
        CompilerSlots {
            compiler: "cc".to_string(),
            compiler_so: "cc".to_string(),
            compiler_cxx: "c++".to_string(),
            linker_so: "cc".to_string(),
        }
    }
}

/// The driver's `customize compiler` step, as an explicit seam.
pub trait CustomizeToolchain {
    /// Adjust the compiler slots in place.
    fn customize(&self, slots: &mut CompilerSlots);
}

/// Passthrough customization: whatever the driver already decided stands.
#[derive(Debug, Clone, Copy, Default)]
pub struct DriverDefault;

impl CustomizeToolchain for DriverDefault {
    fn customize(&self, _slots: &mut CompilerSlots) {}
}

/// Decorator that runs the inner customization and then force-writes the
/// four slots with the chosen clang executables.
///
/// Deliberately narrow: exactly four slots, applied on exactly two profiles.
#[derive(Debug, Clone)]
pub struct ClangOverride<T> {
    inner: T,
    spec: ToolchainSpec,
}

impl<T> ClangOverride<T> {
    /// Wrap an inner customization step.
    pub fn new(inner: T, spec: ToolchainSpec) -> Self {
        ClangOverride { inner, spec }
    }

    /// Get a reference to the inner step.
    pub fn inner(&self) -> &T {
        &self.inner
    }
}

impl<T: CustomizeToolchain> CustomizeToolchain for ClangOverride<T> {
    fn customize(&self, slots: &mut CompilerSlots) {
        self.inner.customize(slots);
        slots.compiler = self.spec.cc.clone();
        slots.compiler_so = self.spec.cxx.clone();
        slots.compiler_cxx = self.spec.cxx.clone();
        slots.linker_so = self.spec.cxx.clone();
    }
}

/// Warn when the Windows toolchain environment looks older than the floor
/// the configuration was designed for. Non-fatal; the build proceeds.
pub fn check_msvc_environment(profile: PlatformProfile) {
    let vs14_present = std::env::var_os("VS140COMNTOOLS").is_some();
    if let Some(message) = msvc_environment_warning(profile, vs14_present) {
        tracing::warn!("{}", message);
    }
}

/// The warning to surface when the expected Visual Studio environment
/// variable is absent. `None` for every non-Windows profile and for a
/// properly configured environment.
fn msvc_environment_warning(
    profile: PlatformProfile,
    vs14_present: bool,
) -> Option<&'static str> {
    if profile == PlatformProfile::Windows && !vs14_present {
        Some("You probably need Visual Studio 2015 (14.0) or higher")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::config::ToolchainSettings;

    #[test]
    fn test_defaults_to_clang_pair() {
        let spec = ToolchainSpec::from_sources(&ToolchainConfig::default(), None, None);
        assert_eq!(spec.cc, "clang");
        assert_eq!(spec.cxx, "clang++");
    }

    #[test]
    fn test_env_overrides_defaults() {
        let spec = ToolchainSpec::from_sources(
            &ToolchainConfig::default(),
            Some("clang-17".to_string()),
            Some("clang++-17".to_string()),
        );
        assert_eq!(spec.cc, "clang-17");
        assert_eq!(spec.cxx, "clang++-17");
    }

    #[test]
    fn test_config_file_overrides_env() {
        let config = ToolchainConfig {
            toolchain: ToolchainSettings {
                cc: Some("/opt/llvm/bin/clang".to_string()),
                cxx: None,
            },
        };
        let spec = ToolchainSpec::from_sources(
            &config,
            Some("gcc".to_string()),
            Some("g++".to_string()),
        );
        assert_eq!(spec.cc, "/opt/llvm/bin/clang");
        // cxx not configured, so the environment still wins there
        assert_eq!(spec.cxx, "g++");
    }

    #[test]
    fn test_no_override_outside_darwin_bsd() {
        let tmp = tempfile::TempDir::new().unwrap();
        assert!(ToolchainSpec::resolve(PlatformProfile::Windows, tmp.path()).is_none());
        assert!(ToolchainSpec::resolve(PlatformProfile::GenericPosix, tmp.path()).is_none());
    }

    #[test]
    fn test_clang_override_rewrites_all_four_slots() {
        let spec = ToolchainSpec {
            cc: "clang".to_string(),
            cxx: "clang++".to_string(),
        };
        let customize = ClangOverride::new(DriverDefault, spec);

        let mut slots = CompilerSlots::driver_defaults();
        customize.customize(&mut slots);

        assert_eq!(slots.compiler, "clang");
        assert_eq!(slots.compiler_so, "clang++");
        assert_eq!(slots.compiler_cxx, "clang++");
        assert_eq!(slots.linker_so, "clang++");
    }

    #[test]
    fn test_msvc_floor_warning_when_tools_env_missing() {
        assert_eq!(
            msvc_environment_warning(PlatformProfile::Windows, false),
            Some("You probably need Visual Studio 2015 (14.0) or higher")
        );
    }

    #[test]
    fn test_msvc_floor_warning_silent_when_configured_or_off_windows() {
        assert!(msvc_environment_warning(PlatformProfile::Windows, true).is_none());
        assert!(msvc_environment_warning(PlatformProfile::Darwin, false).is_none());
        assert!(msvc_environment_warning(PlatformProfile::Bsd, false).is_none());
        assert!(msvc_environment_warning(PlatformProfile::GenericPosix, false).is_none());
    }

    #[test]
    fn test_override_runs_inner_customization_first() {
        struct Tagger;
        impl CustomizeToolchain for Tagger {
            fn customize(&self, slots: &mut CompilerSlots) {
                slots.compiler = "driver-cc".to_string();
                slots.compiler_cxx = "driver-cxx".to_string();
            }
        }

        let spec = ToolchainSpec {
            cc: "clang".to_string(),
            cxx: "clang++".to_string(),
        };
        let customize = ClangOverride::new(Tagger, spec);

        let mut slots = CompilerSlots::driver_defaults();
        customize.customize(&mut slots);

        // Inner ran, but the override has the final word on every slot.
        assert_eq!(slots.compiler, "clang");
        assert_eq!(slots.compiler_cxx, "clang++");
    }
}

//! Platform profile classification.
//!
//! The host is mapped onto a closed set of profiles; everything downstream
//! (flag tables, the toolchain override, the linkage patch) keys off the
//! profile rather than raw OS identity.

use serde::{Deserialize, Serialize};

/// The platform profile driving flag and toolchain selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlatformProfile {
    /// Windows with the MSVC toolchain
    Windows,
    /// macOS with Apple Clang
    Darwin,
    /// FreeBSD/OpenBSD with Clang
    Bsd,
    /// Any other POSIX system with a GCC-compatible toolchain
    GenericPosix,
}

impl PlatformProfile {
    /// Classify the host platform.
    ///
    /// Pure function of the compile-time OS identity; an unrecognized OS
    /// falls back to [`PlatformProfile::GenericPosix`] rather than failing.
    pub fn classify() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// Map an OS name (as reported by `std::env::consts::OS`) to a profile.
    pub fn from_os(os: &str) -> Self {
        match os {
            "windows" => PlatformProfile::Windows,
            "macos" => PlatformProfile::Darwin,
            "freebsd" | "openbsd" => PlatformProfile::Bsd,
            _ => PlatformProfile::GenericPosix,
        }
    }

    /// Get the profile name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformProfile::Windows => "windows",
            PlatformProfile::Darwin => "darwin",
            PlatformProfile::Bsd => "bsd",
            PlatformProfile::GenericPosix => "generic-posix",
        }
    }

    /// Whether this profile forces the clang/clang++ toolchain override
    /// and the C-linkage source patch.
    pub fn uses_clang_override(&self) -> bool {
        matches!(self, PlatformProfile::Darwin | PlatformProfile::Bsd)
    }
}

impl std::fmt::Display for PlatformProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PlatformProfile {
    type Err = ProfileParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "windows" | "win32" => Ok(PlatformProfile::Windows),
            "darwin" | "macos" => Ok(PlatformProfile::Darwin),
            "bsd" | "freebsd" | "openbsd" => Ok(PlatformProfile::Bsd),
            "generic-posix" | "posix" | "linux" => Ok(PlatformProfile::GenericPosix),
            _ => Err(ProfileParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid profile name.
#[derive(Debug, Clone)]
pub struct ProfileParseError(pub String);

impl std::fmt::Display for ProfileParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid platform profile '{}', valid values: windows, darwin, bsd, generic-posix",
            self.0
        )
    }
}

impl std::error::Error for ProfileParseError {}

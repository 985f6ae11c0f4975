//! Per-profile compile and link flag assembly.
//!
//! Flag order matters: later flags may override earlier ones in the
//! underlying compiler, so the sequences are preserved exactly as assembled.

use serde::Serialize;

use crate::core::platform::PlatformProfile;

/// Flags shared by every POSIX-like profile.
const FLAGS_POSIX: &[&str] = &[
    "-fPIC",
    "-std=gnu++0x",
    "-Wall",
    "-Wno-parentheses",
    "-Werror=switch",
];

const LFLAGS_POSIX: &[&str] = &["-fPIC", "-lstdc++"];

/// Clang profiles (Darwin, BSD) link against libc++ instead of libstdc++.
const STDLIB_CLANG: &str = "-stdlib=libc++";

const MACOS_VERSION_MIN: &str = "-mmacosx-version-min=10.7";

/// Ordered compile and link flag sequences for one platform profile.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FlagSet {
    /// Compile flags, in assembly order
    pub cflags: Vec<String>,
    /// Link flags, in assembly order
    pub ldflags: Vec<String>,
}

impl FlagSet {
    /// Assemble the flag set for a platform profile.
    pub fn assemble(profile: PlatformProfile) -> Self {
        let owned = |flags: &[&str]| flags.iter().map(|f| f.to_string()).collect::<Vec<_>>();

        match profile {
            PlatformProfile::Windows => FlagSet {
                cflags: owned(&["/Od", "/EHsc", "/MT"]),
                ldflags: Vec::new(),
            },
            PlatformProfile::Darwin => {
                let mut cflags = owned(FLAGS_POSIX);
                cflags.push(STDLIB_CLANG.to_string());
                cflags.push(MACOS_VERSION_MIN.to_string());
                FlagSet {
                    cflags,
                    ldflags: owned(&["-fPIC", STDLIB_CLANG, MACOS_VERSION_MIN]),
                }
            }
            PlatformProfile::Bsd => {
                let mut cflags = owned(FLAGS_POSIX);
                cflags.push(STDLIB_CLANG.to_string());
                FlagSet {
                    cflags,
                    ldflags: owned(&["-fPIC", STDLIB_CLANG]),
                }
            }
            PlatformProfile::GenericPosix => FlagSet {
                cflags: owned(FLAGS_POSIX),
                ldflags: owned(LFLAGS_POSIX),
            },
        }
    }

    /// Append the version preprocessor definition as the final compile flag.
    ///
    /// Used only when building from vendored source; the system-library path
    /// carries no version stamp.
    pub fn with_version_define(mut self, profile: PlatformProfile, version: &str) -> Self {
        self.cflags.push(version_define(profile, version));
        self
    }
}

/// Build the `LIBSASS_VERSION` preprocessor definition for a profile.
///
/// MSVC needs the inner quotes escaped so the string literal survives the
/// command line; every other toolchain takes the plain form.
pub fn version_define(profile: PlatformProfile, version: &str) -> String {
    match profile {
        PlatformProfile::Windows => {
            format!(r#"/DLIBSASS_VERSION="\"{}\"""#, version)
        }
        _ => format!(r#"-DLIBSASS_VERSION="{}""#, version),
    }
}

//! Ballast - build-configuration orchestrator for the libsass native extension
//!
//! This crate resolves everything an external build driver needs to compile
//! the vendored libsass library plus its thin extension shim: the host
//! platform profile, the per-platform compile/link flags, the upstream
//! version stamp, the aggregated source manifest, and the Darwin/BSD
//! C-linkage patch. The actual compile and link steps are out of scope;
//! the output is an extension descriptor handed to the driver wholesale.

pub mod builder;
pub mod core;
pub mod ops;
pub mod util;
pub mod version;

pub use crate::core::{descriptor::ExtensionDescriptor, platform::PlatformProfile};

pub use builder::flags::FlagSet;
pub use builder::patch::LinkagePatch;
pub use builder::sources::SourceManifest;
pub use builder::toolchain::{ClangOverride, CompilerSlots, CustomizeToolchain, ToolchainSpec};
pub use util::diagnostic::{ConfigurationError, VersionResolutionError};

//! Build configuration assembly.
//!
//! This module owns the decision logic that runs before the external build
//! driver: flag tables, source aggregation, the C-linkage source patch, and
//! the toolchain override.

pub mod flags;
pub mod patch;
pub mod sources;
pub mod toolchain;

pub use flags::FlagSet;
pub use patch::LinkagePatch;
pub use sources::SourceManifest;
pub use toolchain::{
    ClangOverride, CompilerSlots, CustomizeToolchain, DriverDefault, ToolchainSpec,
};

//! Core data structures for Ballast.
//!
//! - Platform profiles (the closed set of host-environment categories)
//! - The extension descriptor consumed by the external build driver

pub mod descriptor;
pub mod platform;

pub use descriptor::ExtensionDescriptor;
pub use platform::PlatformProfile;

//! Command implementations

pub mod configure;
pub mod flags;
pub mod version;

//! High-level operations driven by the CLI.

pub mod configure;

pub use configure::{configure, ConfigureOptions, ConfigureOutcome};

//! CLI definitions using clap.

use std::path::PathBuf;

use ballast::PlatformProfile;
use clap::{Args, Parser, Subcommand};

/// Ballast - build configuration for the libsass native extension
#[derive(Parser)]
#[command(name = "ballast")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve the full build configuration and emit the extension descriptor
    Configure(ConfigureArgs),

    /// Show the compile/link flag table for a platform profile
    Flags(FlagsArgs),

    /// Resolve and print the vendored libsass version
    Version(VersionArgs),
}

#[derive(Args)]
pub struct ConfigureArgs {
    /// Project root containing the libsass checkout and the extension shim
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Platform profile (defaults to the host)
    #[arg(long)]
    pub profile: Option<PlatformProfile>,

    /// Link against an installed libsass instead of the vendored source
    /// (also enabled when the SYSTEM_SASS environment variable is set)
    #[arg(long)]
    pub system_sass: bool,

    /// Write the descriptor JSON to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct FlagsArgs {
    /// Platform profile (defaults to the host)
    #[arg(long)]
    pub profile: Option<PlatformProfile>,

    /// Append the version preprocessor definition for this version string
    #[arg(long, value_name = "VERSION")]
    pub define_version: Option<String>,
}

#[derive(Args)]
pub struct VersionArgs {
    /// Project root containing the libsass checkout
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
}

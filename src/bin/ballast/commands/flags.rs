//! `ballast flags` command

use anyhow::Result;

use crate::cli::FlagsArgs;
use ballast::{FlagSet, PlatformProfile};

pub fn execute(args: FlagsArgs) -> Result<()> {
    let profile = args.profile.unwrap_or_else(PlatformProfile::classify);

    let mut flags = FlagSet::assemble(profile);
    if let Some(ref version) = args.define_version {
        flags = flags.with_version_define(profile, version);
    }

    println!("# Compile flags for profile `{}`:", profile);
    for flag in &flags.cflags {
        println!("{flag}");
    }
    println!();
    println!("# Link flags for profile `{}`:", profile);
    for flag in &flags.ldflags {
        println!("{flag}");
    }

    Ok(())
}

//! `ballast configure` command

use anyhow::{Context, Result};

use crate::cli::ConfigureArgs;
use ballast::ops::{configure, ConfigureOptions};
use ballast::PlatformProfile;

pub fn execute(args: ConfigureArgs) -> Result<()> {
    let profile = args.profile.unwrap_or_else(PlatformProfile::classify);

    let outcome = configure(&ConfigureOptions {
        root: args.root,
        profile,
        system_library: args.system_sass || system_sass_requested(),
    })?;

    let json =
        serde_json::to_string_pretty(&outcome).context("failed to serialize the descriptor")?;

    match args.output {
        Some(path) => {
            ballast::util::fs::write_string(&path, &json)?;
            tracing::info!("wrote extension descriptor to {}", path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}

/// `SYSTEM_SASS` is a presence flag: any non-empty value enables
/// system-library mode, whatever the value says.
fn system_sass_requested() -> bool {
    std::env::var_os("SYSTEM_SASS").map_or(false, |v| !v.is_empty())
}

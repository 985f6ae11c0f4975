//! `ballast version` command

use anyhow::Result;

use crate::cli::VersionArgs;
use ballast::ops::configure::{VENDOR_DIR, VERSION_CACHE_FILE};
use ballast::version::resolve_version;

pub fn execute(args: VersionArgs) -> Result<()> {
    let version = resolve_version(
        &args.root.join(VENDOR_DIR),
        &args.root.join(VERSION_CACHE_FILE),
    )?;

    println!("{version}");
    Ok(())
}

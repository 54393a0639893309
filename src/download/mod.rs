//! Fetching and unpacking the SDE JSONL export

pub mod cache;
pub mod client;
pub mod extract;

pub use cache::*;
pub use client::*;
pub use extract::*;

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing::info;

use crate::config::files;
use crate::ui::{Phase, Ui};

/// Make sure the latest build's universe files are extracted locally.
///
/// Returns the directory holding them and the build number. A cached build is
/// reused unless `force` is set.
pub fn ensure_sde_downloaded(
    cache_dir: Option<PathBuf>,
    force: bool,
    ui: &mut impl Ui,
) -> Result<(PathBuf, u64)> {
    let cache = CacheManager::new(cache_dir)?;
    let client = SdeClient::new()?;

    ui.set_phase(Phase::Checking);
    let latest = client.fetch_latest_info()?;
    let build = latest.build_number;
    let build_dir = cache.build_dir(build);

    if !force && cache.is_cached(build) {
        info!(build, dir = ?build_dir, "Using cached SDE build");
        ui.log(format!("SDE build {} already cached", build));
        return Ok((build_dir, build));
    }

    ui.set_phase(Phase::Downloading);
    let zip_path = cache.zip_path(build);
    client.download_zip(&zip_path, ui)?;

    ui.set_phase(Phase::Extracting);
    extract_zip(&zip_path, &build_dir, &files::ALL, ui)?;
    fs::remove_file(&zip_path)
        .with_context(|| format!("Failed to remove archive: {:?}", zip_path))?;

    let removed = cache.cleanup_old_builds(build)?;
    info!(build, removed, "SDE build ready");

    Ok((build_dir, build))
}

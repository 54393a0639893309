use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

use crate::config::files;

pub struct CacheManager {
    cache_dir: PathBuf,
}

impl CacheManager {
    pub fn new(custom_dir: Option<PathBuf>) -> Result<Self> {
        let cache_dir = match custom_dir {
            Some(dir) => dir,
            None => {
                let proj_dirs = ProjectDirs::from("", "", "eve-universe-seeder")
                    .context("Could not determine cache directory")?;
                proj_dirs.cache_dir().to_path_buf()
            }
        };

        fs::create_dir_all(&cache_dir)
            .with_context(|| format!("Failed to create cache directory: {:?}", cache_dir))?;

        Ok(Self { cache_dir })
    }

    /// Get path to build-specific directory
    pub fn build_dir(&self, build_number: u64) -> PathBuf {
        self.cache_dir.join(build_number.to_string())
    }

    /// A build counts as cached once every universe source file is present
    pub fn is_cached(&self, build_number: u64) -> bool {
        let build_dir = self.build_dir(build_number);
        build_dir.is_dir() && files::ALL.iter().all(|name| build_dir.join(name).is_file())
    }

    /// Get path to zip file for a build
    pub fn zip_path(&self, build_number: u64) -> PathBuf {
        self.cache_dir.join(format!("{}.zip", build_number))
    }

    /// Remove every cached build other than `keep_build`, returning how many went
    pub fn cleanup_old_builds(&self, keep_build: u64) -> Result<usize> {
        let mut removed = 0;
        for entry in fs::read_dir(&self.cache_dir)? {
            let path = entry?.path();
            if !path.is_dir() {
                continue;
            }

            let build = path
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(|n| n.parse::<u64>().ok());
            if let Some(build) = build {
                if build != keep_build && fs::remove_dir_all(&path).is_ok() {
                    debug!(build, "Removed cached build");
                    removed += 1;
                }
            }
        }
        Ok(removed)
    }
}

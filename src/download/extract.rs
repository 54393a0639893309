use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::Path;
use tracing::debug;
use zip::ZipArchive;

use crate::ui::Ui;

/// Extract the archive entries named in `wanted` into `dest_dir`, flattening
/// any directory prefix. Returns the number of files written.
pub fn extract_zip(
    zip_path: &Path,
    dest_dir: &Path,
    wanted: &[&str],
    ui: &mut impl Ui,
) -> Result<usize> {
    let file = File::open(zip_path)
        .with_context(|| format!("Failed to open zip file: {:?}", zip_path))?;
    let mut archive = ZipArchive::new(BufReader::new(file)).context("Failed to read zip archive")?;

    fs::create_dir_all(dest_dir).context("Failed to create destination directory")?;

    let total_files = archive.len() as u64;
    let mut extracted = 0;

    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .context("Failed to read file from archive")?;
        ui.set_progress(i as u64 + 1, total_files, "files");

        let name = entry.name().to_string();
        let file_name = match Path::new(&name).file_name().and_then(|n| n.to_str()) {
            Some(file_name) if wanted.contains(&file_name) => file_name.to_string(),
            _ => continue,
        };

        let dest_path = dest_dir.join(&file_name);
        let mut dest_file = File::create(&dest_path)
            .with_context(|| format!("Failed to create file: {:?}", dest_path))?;

        io::copy(&mut entry, &mut dest_file)
            .with_context(|| format!("Failed to extract: {}", file_name))?;
        debug!(file = %file_name, "Extracted");
        extracted += 1;
    }

    ui.clear_progress();
    ui.log(format!("Extracted {} files", extracted));
    Ok(extracted)
}

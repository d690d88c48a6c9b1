use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;
use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

use crate::error::{ReportError, Result};
use crate::paths::parent_or_current;

/// File name of the archive written next to the report directory.
pub const ARCHIVE_FILE_NAME: &str = "full-allure-report.zip";

/// Archive path for `src_dir`: a sibling in its parent directory.
pub fn archive_path_for(src_dir: &Path) -> PathBuf {
    parent_or_current(src_dir).join(ARCHIVE_FILE_NAME)
}

/// Zip every regular file under `src_dir` into `zip_path`.
///
/// Entry names are paths relative to `src_dir`, joined with `/`. The file
/// list is collected before the archive is created so the archive never
/// picks itself up.
pub fn zip_folder(src_dir: &Path, zip_path: &Path) -> Result<PathBuf> {
    let entries = collect_files(src_dir)?;

    let file = File::create(zip_path).map_err(|source| ReportError::Write {
        path: zip_path.to_path_buf(),
        source,
    })?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o644);

    for (name, path) in &entries {
        zip.start_file(name.as_str(), options)?;
        let data = std::fs::read(path)?;
        zip.write_all(&data)?;
        debug!(entry = %name, bytes = data.len(), "added archive entry");
    }

    zip.finish()?;

    info!(
        src = %src_dir.display(),
        path = %zip_path.display(),
        files = entries.len(),
        "archive written"
    );
    Ok(zip_path.to_path_buf())
}

/// `(entry name, absolute path)` for each regular file, sorted by path.
fn collect_files(src_dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let mut entries = Vec::new();
    for entry in WalkDir::new(src_dir).follow_links(true).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry.path().strip_prefix(src_dir).unwrap_or(entry.path());
        let name = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        entries.push((name, entry.into_path()));
    }
    Ok(entries)
}

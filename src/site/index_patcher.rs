use std::path::Path;

use tracing::info;

use crate::error::{ReportError, Result};

/// Allure's landing page.
pub const INDEX_FILE: &str = "index.html";
/// Where the original landing page is kept once the shim replaces it.
pub const BACKUP_INDEX_FILE: &str = "index.allure.html";
/// The portable report's file name inside the report directory.
pub const PORTABLE_INDEX_FILE: &str = "portable-index.html";

const LAUNCHER_SHIM: &str = r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="UTF-8"><title>Allure Report Launcher</title></head>
<body style="font-family: Arial, sans-serif; padding: 20px;">
<h2>Automation Report Launcher</h2>
<p>When opened from <code>file://</code>, this page redirects to a portable offline report.</p>
<ul>
<li><a href="portable-index.html">Open portable report (offline/email friendly)</a></li>
<li><a href="index.allure.html">Open full Allure UI (requires HTTP server, not file://)</a></li>
</ul>
<script>
if (location.protocol === 'file:') {
  location.href = 'portable-index.html';
}
</script>
</body>
</html>
"#;

const PORTABLE_PLACEHOLDER: &str =
    "<html><body><h3>portable-index.html not generated yet.</h3></body></html>\n";

/// What `patch_index` changed on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PatchOutcome {
    /// The original `index.html` was renamed to the backup name
    pub backed_up: bool,

    /// `portable-index.html` was missing and a placeholder was written
    pub placeholder_written: bool,
}

/// Replace Allure's `index.html` in `dir` with a launcher that redirects
/// `file://` visitors to the portable report.
///
/// The original page is moved aside only when no backup exists yet, so
/// repeated runs never overwrite it.
pub fn patch_index(dir: &Path) -> Result<PatchOutcome> {
    let index = dir.join(INDEX_FILE);
    let backup = dir.join(BACKUP_INDEX_FILE);
    let portable = dir.join(PORTABLE_INDEX_FILE);
    let mut outcome = PatchOutcome::default();

    if index.exists() && !backup.exists() {
        std::fs::rename(&index, &backup)?;
        outcome.backed_up = true;
    }

    write_file(&index, LAUNCHER_SHIM)?;

    if !portable.exists() {
        write_file(&portable, PORTABLE_PLACEHOLDER)?;
        outcome.placeholder_written = true;
    }

    info!(
        dir = %dir.display(),
        backed_up = outcome.backed_up,
        placeholder = outcome.placeholder_written,
        "patched report index"
    );
    Ok(outcome)
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })
}

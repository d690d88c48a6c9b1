use std::path::Path;

use tracing::info;

use crate::error::{ReportError, Result};
use crate::report::report_model::PortableReport;
use crate::results::result_model::TestStatus;

/// Shown in place of the detail rows when no result files were loaded.
pub const EMPTY_TABLE_MESSAGE: &str = "No Allure result files found.";

// ============================================================================
// HTML reporter — single self-contained document
// ============================================================================

/// Generate the portable HTML report.
///
/// Features:
/// - Total card plus one summary card per status, in priority order
/// - Detail table with a colored status badge per row
/// - A single placeholder row when there are no records
/// - Inline CSS only, so it opens from `file://` or inside a mail client
pub fn generate_html_report(report: &PortableReport) -> String {
    let total = report.total();

    let mut cards = format!(
        "<div class='card total'><div class='num'>{}</div><div class='lbl'>TOTAL</div></div>\n",
        total
    );
    for (status, count) in report.totals.iter() {
        cards.push_str(&status_card(status, count));
    }

    let mut body_rows = String::new();
    for row in &report.rows {
        body_rows.push_str(&format!(
            "<tr><td>{name}</td><td><span class='badge {class}'>{status}</span></td><td>{suite}</td><td>{package}</td><td>{duration}</td></tr>\n",
            name = escape_html(&row.name),
            class = row.bucket().as_str(),
            status = escape_html(&row.status),
            suite = escape_html(&row.suite),
            package = escape_html(&row.package),
            duration = row.duration_label(),
        ));
    }
    if body_rows.is_empty() {
        body_rows = format!("<tr><td colspan=\"5\">{}</td></tr>\n", EMPTY_TABLE_MESSAGE);
    }

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
<style>
body {{ font-family: Arial, sans-serif; margin: 20px; color: #1f2937; }}
h1 {{ margin-bottom: 4px; }}
.muted {{ color: #6b7280; margin-bottom: 16px; }}
.cards {{ display: grid; grid-template-columns: repeat(6, minmax(110px, 1fr)); gap: 10px; margin: 16px 0 20px; }}
.card {{ border-radius: 10px; padding: 12px; color: white; text-align: center; }}
.card .num {{ font-size: 24px; font-weight: bold; }}
.card .lbl {{ font-size: 12px; opacity: .95; }}
.total {{ background: #111827; }}
.passed {{ background: #16a34a; }}
.failed {{ background: #dc2626; }}
.broken {{ background: #f97316; }}
.skipped {{ background: #6b7280; }}
.unknown {{ background: #2563eb; }}
table {{ border-collapse: collapse; width: 100%; }}
th, td {{ border: 1px solid #e5e7eb; padding: 8px; font-size: 13px; }}
th {{ background: #f3f4f6; text-align: left; }}
.badge {{ padding: 2px 8px; border-radius: 999px; color: white; font-size: 12px; }}
</style>
</head>
<body>
<h1>{title}</h1>
<div class="muted">Generated: {generated_at} &bull; Total cases: {total}</div>
<div class="cards">
{cards}</div>
<h2>Test Details</h2>
<table>
<thead><tr><th>Name</th><th>Status</th><th>Suite</th><th>Package</th><th>Duration</th></tr></thead>
<tbody>
{body_rows}</tbody>
</table>
</body>
</html>
"##,
        title = escape_html(&report.title),
        generated_at = escape_html(&report.generated_at),
        total = total,
        cards = cards,
        body_rows = body_rows,
    )
}

fn status_card(status: TestStatus, count: usize) -> String {
    format!(
        "<div class='card {class}'><div class='num'>{count}</div><div class='lbl'>{label}</div></div>\n",
        class = status.as_str(),
        count = count,
        label = status.as_str().to_uppercase(),
    )
}

/// Escape HTML special characters.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Write a rendered document to `path`, creating parent directories first.
pub fn write_html_report(path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| ReportError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, html).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), bytes = html.len(), "portable report written");
    Ok(())
}

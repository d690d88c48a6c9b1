use std::path::Path;

use tracing::info;

use crate::cli::config::{GenerateSettings, SendSettings};
use crate::error::Result;
use crate::mail::dispatch::{DispatchSummary, dispatch_report};
use crate::mail::transport::SmtpMailer;
use crate::report::console::format_console_summary;
use crate::report::html::{generate_html_report, write_html_report};
use crate::report::report_model::PortableReport;
use crate::results::loader::load_results;
use crate::paths::parent_or_current;
use crate::site::index_patcher::{BACKUP_INDEX_FILE, INDEX_FILE, PatchOutcome, patch_index};

// ============================================================================
// generate subcommand
// ============================================================================

/// Load results, render the portable report and optionally patch the index
/// next to it. Returns the rendered report.
pub fn cmd_generate(settings: &GenerateSettings) -> Result<PortableReport> {
    let records = load_results(&settings.results)?;
    let report = PortableReport::from_records(records);

    let html = generate_html_report(&report);
    write_html_report(&settings.out, &html)?;

    if settings.patch_index {
        patch_index(report_dir_of(&settings.out))?;
    }

    println!("Portable report generated: {}", settings.out.display());
    println!("{}", format_console_summary(&report));
    Ok(report)
}

/// Directory holding `out`, or `.` for a bare file name.
pub fn report_dir_of(out: &Path) -> &Path {
    parent_or_current(out)
}

// ============================================================================
// patch-index subcommand
// ============================================================================

pub fn cmd_patch_index(dir: &Path) -> Result<PatchOutcome> {
    let outcome = patch_index(dir)?;
    if outcome.backed_up {
        println!("Backed up original index to {}", dir.join(BACKUP_INDEX_FILE).display());
    }
    println!("Patched {}", dir.join(INDEX_FILE).display());
    Ok(outcome)
}

// ============================================================================
// send subcommand
// ============================================================================

pub fn cmd_send(settings: &SendSettings) -> Result<DispatchSummary> {
    let mailer = SmtpMailer::new(&settings.smtp)?;
    info!(
        host = %settings.smtp.host,
        port = settings.smtp.port,
        "sending report email"
    );
    let summary = dispatch_report(&settings.request, &mailer)?;
    println!("Report email sent successfully");
    Ok(summary)
}

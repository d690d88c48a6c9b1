use std::path::PathBuf;

use tracing::{info, warn};

use crate::error::{ReportError, Result};
use crate::mail::archive::{archive_path_for, zip_folder};
use crate::mail::message::{ArchiveAttachment, Envelope, compose_report_email};
use crate::mail::transport::MailTransport;

/// Everything needed to package and send one report email.
#[derive(Debug, Clone)]
pub struct DispatchRequest {
    pub envelope: Envelope,

    /// Rendered portable report; must exist
    pub portable_report: PathBuf,

    /// Directory zipped when `attach_archive` is set
    pub archive_source: PathBuf,

    pub attach_archive: bool,
}

/// What was sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchSummary {
    pub recipients: usize,
    /// Path of the archive that was attached, if any
    pub archive: Option<PathBuf>,
}

/// Package the report (and optional archive) and hand it to `mailer`.
///
/// A missing portable report fails before anything is written or sent.
pub fn dispatch_report(request: &DispatchRequest, mailer: &dyn MailTransport) -> Result<DispatchSummary> {
    if !request.portable_report.is_file() {
        return Err(ReportError::MissingReport(request.portable_report.clone()));
    }

    let report_html = std::fs::read(&request.portable_report)?;

    let mut archive_path = None;
    let mut attachment = None;
    if request.attach_archive {
        if request.archive_source.is_dir() {
            let zip_path = zip_folder(&request.archive_source, &archive_path_for(&request.archive_source))?;
            attachment = Some(ArchiveAttachment::from_file(&zip_path)?);
            archive_path = Some(zip_path);
        } else {
            warn!(
                dir = %request.archive_source.display(),
                "archive source not found, sending without archive"
            );
        }
    }

    let message = compose_report_email(&request.envelope, report_html, attachment)?;

    mailer.deliver(&message)?;

    info!(
        recipients = request.envelope.to.len(),
        archive = archive_path.is_some(),
        "report email sent"
    );
    Ok(DispatchSummary {
        recipients: request.envelope.to.len(),
        archive: archive_path,
    })
}

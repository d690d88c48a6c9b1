use std::path::Path;

use lettre::Message;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};

use crate::error::{ReportError, Result};
use crate::mail::archive::ARCHIVE_FILE_NAME;

/// Attachment name used for the portable report.
pub const REPORT_ATTACHMENT_NAME: &str = "portable-report.html";

const BODY_TEXT: &str = "Please find attached automation reports.\n\
- portable-report.html can be opened directly from email/download (no server required).\n\
- full-allure-report.zip contains complete interactive Allure report (serve via HTTP).\n";

/// Addressing and subject for an outgoing report email.
#[derive(Debug, Clone)]
pub struct Envelope {
    pub from: Mailbox,
    pub to: Vec<Mailbox>,
    pub subject: String,
}

/// A zip archive ready to attach.
#[derive(Debug, Clone)]
pub struct ArchiveAttachment {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl ArchiveAttachment {
    /// Read an archive from disk, named after its file name.
    pub fn from_file(path: &Path) -> Result<Self> {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| ARCHIVE_FILE_NAME.to_string());
        Ok(Self {
            filename,
            bytes: std::fs::read(path)?,
        })
    }
}

/// Parse a single address such as `qa@example.com` or `QA <qa@example.com>`.
pub fn parse_mailbox(address: &str) -> Result<Mailbox> {
    address
        .trim()
        .parse::<Mailbox>()
        .map_err(|source| ReportError::InvalidAddress {
            address: address.to_string(),
            source,
        })
}

/// Parse a comma-separated recipient list. Blank entries are ignored.
pub fn parse_recipients(list: &str) -> Result<Vec<Mailbox>> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(parse_mailbox)
        .collect()
}

/// Build the report email: text body, HTML report, and optionally the zip.
pub fn compose_report_email(
    envelope: &Envelope,
    report_html: Vec<u8>,
    archive: Option<ArchiveAttachment>,
) -> Result<Message> {
    let html_type = ContentType::TEXT_HTML;
    let zip_type = ContentType::parse("application/zip")
        .map_err(|e| ReportError::ContentType(e.to_string()))?;

    let mut parts = MultiPart::mixed()
        .singlepart(SinglePart::plain(BODY_TEXT.to_string()))
        .singlepart(Attachment::new(REPORT_ATTACHMENT_NAME.to_string()).body(report_html, html_type));

    if let Some(archive) = archive {
        parts = parts.singlepart(Attachment::new(archive.filename).body(archive.bytes, zip_type));
    }

    let mut builder = Message::builder()
        .from(envelope.from.clone())
        .subject(envelope.subject.clone());
    for recipient in &envelope.to {
        builder = builder.to(recipient.clone());
    }

    Ok(builder.multipart(parts)?)
}

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by report generation, index patching and email dispatch.
///
/// Malformed result files never show up here; the loader skips them.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Writing an output artifact failed
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The rendered report must exist before anything is sent
    #[error("portable report not found: {}", .0.display())]
    MissingReport(PathBuf),

    /// A required setting had no CLI flag, env var or config entry
    #[error("missing required setting '{setting}' (pass --{flag} or set {env})")]
    MissingConfig {
        setting: &'static str,
        flag: &'static str,
        env: &'static str,
    },

    #[error("invalid email address '{address}': {source}")]
    InvalidAddress {
        address: String,
        source: lettre::address::AddressError,
    },

    #[error("failed to compose email: {0}")]
    Compose(#[from] lettre::error::Error),

    #[error("invalid attachment content type: {0}")]
    ContentType(String),

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),
}

pub type Result<T> = std::result::Result<T, ReportError>;

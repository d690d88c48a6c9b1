use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ReportError, Result};
use crate::mail::dispatch::DispatchRequest;
use crate::mail::message::{Envelope, parse_mailbox, parse_recipients};
use crate::mail::transport::SmtpSettings;

pub const DEFAULT_CONFIG_FILE: &str = "portable-report.yaml";
pub const DEFAULT_RESULTS_DIR: &str = "target/allure-results";
pub const DEFAULT_REPORT_DIR: &str = "target/site/allure-maven-plugin";
pub const DEFAULT_PORTABLE_REPORT: &str = "target/site/allure-maven-plugin/portable-index.html";
pub const DEFAULT_SUBJECT: &str = "Automation Execution Report";
pub const DEFAULT_SMTP_PORT: u16 = 587;

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "portable-report",
    version,
    about = "Render Allure results into a portable HTML report and email it"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: portable-report.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render *-result.json files into a single self-contained HTML report
    Generate {
        /// Allure results directory
        #[arg(long)]
        results: Option<String>,

        /// Output HTML file
        #[arg(short, long)]
        out: Option<String>,

        /// Patch the Allure index.html next to the output for file:// use
        #[arg(long)]
        patch_index: bool,
    },

    /// Replace an Allure report's index.html with a file:// launcher
    PatchIndex {
        /// Report directory holding index.html
        #[arg(long)]
        dir: Option<String>,
    },

    /// Email the portable report, optionally with the full report zipped
    Send(SendArgs),
}

#[derive(Args, Debug, Default)]
pub struct SendArgs {
    /// SMTP server host
    #[arg(long, env = "SMTP_HOST")]
    pub smtp_host: Option<String>,

    /// SMTP submission port (default 587)
    #[arg(long, env = "SMTP_PORT")]
    pub smtp_port: Option<u16>,

    /// SMTP username
    #[arg(long, env = "SMTP_USER")]
    pub smtp_user: Option<String>,

    /// SMTP password
    #[arg(long, env = "SMTP_PASS", hide_env_values = true)]
    pub smtp_pass: Option<String>,

    /// Sender address (default: the SMTP user)
    ///
    /// Without this, the SMTP user must itself be an email address. Login
    /// names such as `apikey` fail at startup with an invalid address error.
    #[arg(long = "from", env = "REPORT_FROM")]
    pub from_addr: Option<String>,

    /// Recipient address(es), comma separated
    #[arg(long = "to", env = "REPORT_TO")]
    pub to_addr: Option<String>,

    /// Email subject
    #[arg(long)]
    pub subject: Option<String>,

    /// Portable report to attach
    #[arg(long)]
    pub portable_report: Option<String>,

    /// Full Allure report directory to zip
    #[arg(long)]
    pub allure_dir: Option<String>,

    /// Attach the zipped Allure report directory
    #[arg(long)]
    pub attach_allure_zip: bool,
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `portable-report.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub smtp: SmtpConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    pub results: Option<String>,
    pub out: Option<String>,
    pub allure_dir: Option<String>,
    pub portable_report: Option<String>,
    pub subject: Option<String>,
}

/// SMTP defaults. The password is never read from the file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SmtpConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if the file is missing
/// or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or(DEFAULT_CONFIG_FILE);
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_else(|e| {
            warn!(path = config_path, error = %e, "ignoring malformed config file");
            AppConfig::default()
        }),
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Settings resolution (CLI/env > config file > defaults)
// ============================================================================

/// Resolved `generate` paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateSettings {
    pub results: PathBuf,
    pub out: PathBuf,
    pub patch_index: bool,
}

pub fn resolve_generate(
    results: Option<&str>,
    out: Option<&str>,
    patch_index: bool,
    config: &AppConfig,
) -> GenerateSettings {
    GenerateSettings {
        results: pick(results, config.report.results.as_deref(), DEFAULT_RESULTS_DIR).into(),
        out: pick(out, config.report.out.as_deref(), DEFAULT_PORTABLE_REPORT).into(),
        patch_index,
    }
}

pub fn resolve_report_dir(dir: Option<&str>, config: &AppConfig) -> PathBuf {
    pick(dir, config.report.allure_dir.as_deref(), DEFAULT_REPORT_DIR).into()
}

/// Resolved `send` settings: transport plus dispatch request.
#[derive(Debug, Clone)]
pub struct SendSettings {
    pub smtp: SmtpSettings,
    pub request: DispatchRequest,
}

/// Resolve `send` settings. Fails on a missing credential or recipient, or
/// an unparsable address, before any file or network I/O.
pub fn resolve_send(args: &SendArgs, config: &AppConfig) -> Result<SendSettings> {
    let host = required(
        args.smtp_host.as_deref().or(config.smtp.host.as_deref()),
        "smtp host",
        "smtp-host",
        "SMTP_HOST",
    )?;
    let user = required(
        args.smtp_user.as_deref().or(config.smtp.user.as_deref()),
        "smtp user",
        "smtp-user",
        "SMTP_USER",
    )?;
    let password = required(args.smtp_pass.as_deref(), "smtp password", "smtp-pass", "SMTP_PASS")?;
    let to = required(
        args.to_addr.as_deref().or(config.smtp.to.as_deref()),
        "recipient",
        "to",
        "REPORT_TO",
    )?;
    let port = args
        .smtp_port
        .or(config.smtp.port)
        .unwrap_or(DEFAULT_SMTP_PORT);

    let from = args
        .from_addr
        .as_deref()
        .or(config.smtp.from.as_deref())
        .unwrap_or(user.as_str());

    let recipients = parse_recipients(&to)?;
    if recipients.is_empty() {
        return Err(ReportError::MissingConfig {
            setting: "recipient",
            flag: "to",
            env: "REPORT_TO",
        });
    }

    let envelope = Envelope {
        from: parse_mailbox(from)?,
        to: recipients,
        subject: pick(args.subject.as_deref(), config.report.subject.as_deref(), DEFAULT_SUBJECT).to_string(),
    };

    let request = DispatchRequest {
        envelope,
        portable_report: pick(
            args.portable_report.as_deref(),
            config.report.portable_report.as_deref(),
            DEFAULT_PORTABLE_REPORT,
        )
        .into(),
        archive_source: resolve_report_dir(args.allure_dir.as_deref(), config),
        attach_archive: args.attach_allure_zip,
    };

    Ok(SendSettings {
        smtp: SmtpSettings {
            host,
            port,
            user,
            password,
        },
        request,
    })
}

fn pick<'a>(cli: Option<&'a str>, config: Option<&'a str>, default: &'a str) -> &'a str {
    cli.or(config).unwrap_or(default)
}

fn required(
    value: Option<&str>,
    setting: &'static str,
    flag: &'static str,
    env: &'static str,
) -> Result<String> {
    match value.filter(|v| !v.trim().is_empty()) {
        Some(v) => Ok(v.to_string()),
        None => Err(ReportError::MissingConfig { setting, flag, env }),
    }
}

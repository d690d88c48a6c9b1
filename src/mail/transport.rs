use std::fmt;

use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::info;

use crate::error::Result;

// ============================================================================
// MailTransport trait — delivery seam for composed report emails
// ============================================================================

/// Delivers a composed message. One call is one send attempt.
pub trait MailTransport {
    fn deliver(&self, message: &Message) -> Result<()>;
}

/// Connection settings for an SMTP submission endpoint.
#[derive(Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
}

impl fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// SMTP submission over STARTTLS with LOGIN/PLAIN auth.
pub struct SmtpMailer {
    transport: SmtpTransport,
    host: String,
}

impl SmtpMailer {
    /// Configure the transport. No connection is opened until `deliver`.
    ///
    /// The session must upgrade to TLS before credentials are sent.
    pub fn new(settings: &SmtpSettings) -> Result<Self> {
        let transport = SmtpTransport::starttls_relay(&settings.host)?
            .port(settings.port)
            .credentials(Credentials::new(
                settings.user.clone(),
                settings.password.clone(),
            ))
            .build();
        Ok(Self {
            transport,
            host: settings.host.clone(),
        })
    }
}

impl MailTransport for SmtpMailer {
    fn deliver(&self, message: &Message) -> Result<()> {
        let response = self.transport.send(message)?;
        info!(host = %self.host, code = %response.code(), "message accepted");
        Ok(())
    }
}

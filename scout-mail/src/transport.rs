use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};

use crate::message::OutgoingMail;
use crate::MailError;

#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn deliver(&self, mail: &OutgoingMail) -> Result<(), MailError>;

    fn name(&self) -> &str;
}

/// Connection parameters for an authenticated STARTTLS relay.
#[derive(Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub timeout: Duration,
}

impl fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Submission over a plaintext connection upgraded with STARTTLS, then AUTH.
pub struct SmtpTransport {
    inner: AsyncSmtpTransport<Tokio1Executor>,
    host: String,
    port: u16,
}

impl SmtpTransport {
    pub fn new(settings: &SmtpSettings) -> Result<Self, MailError> {
        let inner = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)?
            .port(settings.port)
            .credentials(Credentials::new(
                settings.username.clone(),
                settings.password.clone(),
            ))
            .timeout(Some(settings.timeout))
            .build();

        Ok(Self {
            inner,
            host: settings.host.clone(),
            port: settings.port,
        })
    }
}

#[async_trait]
impl MailTransport for SmtpTransport {
    async fn deliver(&self, mail: &OutgoingMail) -> Result<(), MailError> {
        let message = mail.to_message()?;

        tracing::info!(
            target: "mail",
            host = %self.host,
            port = self.port,
            to = %mail.to,
            "mail.smtp.sending"
        );
        match self.inner.send(message).await {
            Ok(response) => {
                tracing::info!(
                    target: "mail",
                    host = %self.host,
                    code = %response.code(),
                    "mail.smtp.sent"
                );
                Ok(())
            }
            Err(e) => {
                tracing::error!(
                    target: "mail",
                    host = %self.host,
                    transient = e.is_transient(),
                    permanent = e.is_permanent(),
                    error = %e,
                    "mail.smtp.failed"
                );
                Err(MailError::Smtp(e))
            }
        }
    }

    fn name(&self) -> &str {
        "smtp"
    }
}

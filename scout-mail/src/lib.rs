//! Outbound mail: the lead report and the contact-form relay.
//!
//! - [`message::OutgoingMail`]: transport-neutral message, converted to a
//!   `lettre::Message` only at delivery time
//! - [`report`] / [`contact`]: composition from askama templates
//! - [`csv_export`]: the lead spreadsheet attachment
//! - [`transport::MailTransport`]: delivery seam, with the STARTTLS SMTP
//!   implementation in [`transport::SmtpTransport`]
//! - [`Mailer`]: composition + delivery with logging

pub mod contact;
pub mod csv_export;
pub mod message;
pub mod report;
pub mod settings;
pub mod transport;

use std::sync::Arc;

use scout_common::Lead;

pub use contact::ContactSubmission;
pub use message::{MailAttachment, OutgoingMail};
pub use settings::MailSettings;
pub use transport::{MailTransport, SmtpSettings, SmtpTransport};

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("invalid address '{address}': {reason}")]
    Address { address: String, reason: String },

    #[error("failed to build message: {0}")]
    Build(String),

    #[error("template rendering failed: {0}")]
    Template(#[from] askama::Error),

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("SMTP delivery failed: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// Composes and delivers the two kinds of mail this tool sends.
pub struct Mailer {
    transport: Arc<dyn MailTransport>,
    settings: MailSettings,
}

impl Mailer {
    pub fn new(transport: Arc<dyn MailTransport>, settings: MailSettings) -> Self {
        Self {
            transport,
            settings,
        }
    }

    /// Send the lead report (HTML body, CSV attachment when `leads` is non-empty).
    pub async fn send_report(
        &self,
        to_email: &str,
        to_name: &str,
        leads: &[Lead],
    ) -> Result<(), MailError> {
        let mail = report::compose_report(&self.settings, to_email, to_name, leads)?;
        tracing::info!(
            target: "mail",
            to = %to_email,
            lead_count = leads.len(),
            attachments = mail.attachments.len(),
            "mail.report.sending"
        );
        self.deliver(&mail).await?;
        tracing::info!(target: "mail", to = %to_email, "mail.report.sent");
        Ok(())
    }

    /// Relay a contact-form submission to the internal mailbox.
    pub async fn send_contact(&self, submission: &ContactSubmission) -> Result<(), MailError> {
        let mail = contact::compose_contact(&self.settings, submission)?;
        tracing::info!(
            target: "mail",
            to = %mail.to,
            company = %submission.company,
            "mail.contact.sending"
        );
        self.deliver(&mail).await?;
        tracing::info!(target: "mail", to = %mail.to, "mail.contact.sent");
        Ok(())
    }

    async fn deliver(&self, mail: &OutgoingMail) -> Result<(), MailError> {
        self.transport.deliver(mail).await.map_err(|e| {
            tracing::error!(
                target: "mail",
                transport = self.transport.name(),
                to = %mail.to,
                error = ?e,
                "mail.delivery_failed"
            );
            e
        })
    }
}

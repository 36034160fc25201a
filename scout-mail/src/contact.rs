use askama::Template;

use crate::message::{parse_address, OutgoingMail};
use crate::settings::MailSettings;
use crate::MailError;

/// A website contact-form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub company: String,
    pub inquiry: String,
}

#[derive(Template)]
#[template(path = "contact.html")]
struct ContactTemplate<'a> {
    name: &'a str,
    email: &'a str,
    company: &'a str,
    inquiry: &'a str,
}

/// Compose the internal notification for a contact submission.
pub fn compose_contact(
    settings: &MailSettings,
    submission: &ContactSubmission,
) -> Result<OutgoingMail, MailError> {
    let html = ContactTemplate {
        name: &submission.name,
        email: &submission.email,
        company: &submission.company,
        inquiry: &submission.inquiry,
    }
    .render()?;

    let reply_to = match parse_address(&submission.email) {
        Ok(address) => Some(address.to_string()),
        Err(e) => {
            // Submitter input stays out of the log; only the parse failure is kept.
            let reason = match &e {
                MailError::Address { reason, .. } => reason.as_str(),
                _ => "unparseable",
            };
            tracing::warn!(target: "mail", reason, "mail.contact.reply_to_skipped");
            None
        }
    };

    let plain_text = format!(
        "Nieuw bericht op Inovisionn.com\n\nNaam: {}\nBedrijf: {}\nEmailadres: {}\n\nBericht / Vraag:\n{}\n",
        submission.name, submission.company, submission.email, submission.inquiry
    );

    Ok(OutgoingMail {
        from_name: settings.contact_sender_name.clone(),
        from_address: settings.sender_address.clone(),
        to: settings.contact_recipient.clone(),
        reply_to,
        subject: format!("🚀 Nieuwe Aanvraag: {}", submission.company),
        headers: vec![("X-Priority", "2".to_string())],
        plain_text,
        html,
        attachments: Vec::new(),
    })
}

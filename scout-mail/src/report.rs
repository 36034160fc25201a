use askama::Template;
use scout_common::Lead;

use crate::csv_export::leads_to_csv;
use crate::message::{MailAttachment, OutgoingMail};
use crate::settings::MailSettings;
use crate::MailError;

const PLAIN_FALLBACK: &str =
    "Je e-mail client ondersteunt geen HTML. Bekijk de CSV bijlage voor het rapport.";
const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

#[derive(Template)]
#[template(path = "report.html")]
struct ReportTemplate<'a> {
    name: &'a str,
    lead_count: usize,
    booking_url: &'a str,
    signature_name: &'a str,
    company_name: &'a str,
}

pub fn report_subject(name: &str) -> String {
    format!("Je AI-gegeneerde Leadlijst voor {name} is klaar!")
}

/// Compose the lead report. The CSV attachment is left out when `leads` is empty.
pub fn compose_report(
    settings: &MailSettings,
    to_email: &str,
    to_name: &str,
    leads: &[Lead],
) -> Result<OutgoingMail, MailError> {
    let html = ReportTemplate {
        name: to_name,
        lead_count: leads.len(),
        booking_url: &settings.booking_url,
        signature_name: &settings.signature_name,
        company_name: &settings.company_name,
    }
    .render()?;

    let mut attachments = Vec::new();
    if !leads.is_empty() {
        attachments.push(MailAttachment {
            filename: settings.attachment_name.clone(),
            content_type: CSV_CONTENT_TYPE.to_string(),
            body: leads_to_csv(leads)?,
        });
    }

    Ok(OutgoingMail {
        from_name: settings.report_sender_name.clone(),
        from_address: settings.sender_address.clone(),
        to: to_email.trim().to_string(),
        reply_to: None,
        subject: report_subject(to_name),
        headers: vec![
            ("X-Priority", "3".to_string()),
            ("X-Mailer", "Inovisionn-Agent-v1".to_string()),
        ],
        plain_text: PLAIN_FALLBACK.to_string(),
        html,
        attachments,
    })
}

use lettre::message::header::{ContentType, HeaderName, HeaderValue};
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::{Address, Message};

use crate::MailError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailAttachment {
    pub filename: String,
    pub content_type: String,
    pub body: Vec<u8>,
}

/// A fully composed message, independent of the delivery mechanism.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub from_name: String,
    pub from_address: String,
    pub to: String,
    pub reply_to: Option<String>,
    pub subject: String,
    /// Extra raw headers such as `X-Priority`.
    pub headers: Vec<(&'static str, String)>,
    pub plain_text: String,
    pub html: String,
    pub attachments: Vec<MailAttachment>,
}

impl OutgoingMail {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Build the MIME message: `multipart/mixed` holding a plain/HTML
    /// alternative followed by any attachments.
    pub fn to_message(&self) -> Result<Message, MailError> {
        let from = Mailbox::new(Some(self.from_name.clone()), parse_address(&self.from_address)?);
        let to = Mailbox::new(None, parse_address(&self.to)?);

        let mut builder = Message::builder().from(from).to(to).subject(self.subject.clone());
        if let Some(reply_to) = &self.reply_to {
            builder = builder.reply_to(Mailbox::new(None, parse_address(reply_to)?));
        }
        for (name, value) in &self.headers {
            builder = builder.raw_header(HeaderValue::new(
                HeaderName::new_from_ascii_str(*name),
                value.clone(),
            ));
        }

        let mut body = MultiPart::mixed().multipart(MultiPart::alternative_plain_html(
            self.plain_text.clone(),
            self.html.clone(),
        ));
        for attachment in &self.attachments {
            let content_type = ContentType::parse(&attachment.content_type)
                .map_err(|e| MailError::Build(format!("{}: {e}", attachment.content_type)))?;
            let part: SinglePart = Attachment::new(attachment.filename.clone())
                .body(attachment.body.clone(), content_type);
            body = body.singlepart(part);
        }

        builder
            .multipart(body)
            .map_err(|e| MailError::Build(e.to_string()))
    }
}

pub(crate) fn parse_address(raw: &str) -> Result<Address, MailError> {
    raw.trim()
        .parse::<Address>()
        .map_err(|e| MailError::Address {
            address: raw.to_string(),
            reason: e.to_string(),
        })
}

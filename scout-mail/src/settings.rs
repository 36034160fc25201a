/// Fixed sender identity and copy used when composing mail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailSettings {
    /// Authenticated account address; used as `From` for every message.
    pub sender_address: String,
    pub report_sender_name: String,
    pub contact_sender_name: String,
    /// Internal mailbox that receives contact-form submissions.
    pub contact_recipient: String,
    /// Call-to-action link in the report body.
    pub booking_url: String,
    pub signature_name: String,
    pub company_name: String,
    pub attachment_name: String,
}

impl MailSettings {
    pub fn for_sender(sender_address: impl Into<String>) -> Self {
        Self {
            sender_address: sender_address.into(),
            report_sender_name: "Inovisionn Automation".to_string(),
            contact_sender_name: "Inovisionn Web".to_string(),
            contact_recipient: "inovisionn@hotmail.com".to_string(),
            booking_url: "https://calendly.com/inovisionn/30min".to_string(),
            signature_name: "Niels Heijman".to_string(),
            company_name: "Inovisionn".to_string(),
            attachment_name: "Inovisionn_Leads.csv".to_string(),
        }
    }
}

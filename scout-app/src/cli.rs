use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use scout_common::LeadCriteria;
use scout_config::Mode;
use scout_mail::ContactSubmission;

/// Lead scan and contact-form relay for Inovisionn.
///
/// Flag names follow the website form fields.
#[derive(Debug, Clone, Parser)]
#[command(name = "lead-scout", version, about)]
pub struct Cli {
    /// `contact` relays a contact form; anything else runs a lead scan.
    #[arg(long = "form_type", default_value = "lead_scraper")]
    pub form_type: String,

    #[arg(long = "bedrijfsnaam")]
    pub bedrijfsnaam: String,

    #[arg(long = "naam")]
    pub naam: String,

    #[arg(long = "email")]
    pub email: String,

    #[arg(long = "vraag", default_value = "")]
    pub vraag: String,

    #[arg(long = "branche", default_value = "")]
    pub branche: String,

    #[arg(long = "regio", default_value = "")]
    pub regio: String,

    #[arg(long = "extra_criteria", default_value = "")]
    pub extra_criteria: String,

    /// YAML configuration file; `lead-scout.yaml` is used when present.
    #[arg(long = "config", env = "SCOUT_CONFIG")]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn mode(&self) -> Mode {
        Mode::from_form_type(&self.form_type)
    }

    pub fn criteria(&self) -> LeadCriteria {
        LeadCriteria::new(&self.branche, &self.regio, &self.extra_criteria)
    }

    pub fn contact_submission(&self) -> Result<ContactSubmission> {
        if self.vraag.trim().is_empty() {
            bail!("--vraag is required when --form_type is 'contact'");
        }
        Ok(ContactSubmission {
            name: self.naam.clone(),
            email: self.email.clone(),
            company: self.bedrijfsnaam.clone(),
            inquiry: self.vraag.clone(),
        })
    }
}

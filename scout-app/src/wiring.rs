//! Turns a validated [`ScoutConfig`] into concrete clients.
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use scout_common::observability::LogConfig;
use scout_config::{LoggingConfig, MailConfig, ScoutConfig};
use scout_llm::extract::ExtractionSettings;
use scout_llm::gemini::GeminiClient;
use scout_llm::traits::LlmClient;
use scout_mail::{MailSettings, MailTransport, SmtpSettings, SmtpTransport};
use scout_search::{SearchDepth, SearchProvider, TavilyClient, TavilyOptions};

use crate::pipeline::Pipeline;

pub fn log_config(cfg: &LoggingConfig) -> LogConfig {
    LogConfig {
        log_dir: cfg.directory.clone(),
        emit_stderr: cfg.stderr,
        format: cfg.format,
        default_filter: cfg.filter.clone(),
        ..LogConfig::default()
    }
}

pub fn search_provider(cfg: &ScoutConfig) -> Result<Arc<dyn SearchProvider>> {
    let search_depth: SearchDepth = cfg.search.search_depth.parse()?;
    let client = TavilyClient::new(
        cfg.search.api_key.clone(),
        TavilyOptions {
            endpoint: cfg.search.endpoint.clone(),
            max_results: cfg.search.max_results,
            search_depth,
            timeout: Duration::from_secs(cfg.search.timeout_secs),
            retries: cfg.search.retries,
        },
    )
    .context("building Tavily client")?;
    Ok(Arc::new(client))
}

pub fn llm_client(cfg: &ScoutConfig) -> Result<Arc<dyn LlmClient>> {
    let client = GeminiClient::new(cfg.llm.api_key.clone(), cfg.llm.model.clone())
        .context("building Gemini client")?
        .with_base_url(cfg.llm.endpoint.clone())
        .with_timeout(Duration::from_secs(cfg.llm.timeout_secs));
    Ok(Arc::new(client))
}

pub fn extraction_settings(cfg: &ScoutConfig) -> ExtractionSettings {
    ExtractionSettings {
        expected_leads: cfg.extraction.expected_leads,
        strict_count: cfg.extraction.strict_count,
        temperature: cfg.llm.temperature,
        max_output_tokens: cfg.llm.max_output_tokens,
    }
}

pub fn mail_settings(cfg: &MailConfig) -> MailSettings {
    MailSettings {
        sender_address: cfg.username.clone(),
        report_sender_name: cfg.report_sender_name.clone(),
        contact_sender_name: cfg.contact_sender_name.clone(),
        contact_recipient: cfg.contact_recipient.clone(),
        booking_url: cfg.booking_url.clone(),
        signature_name: cfg.signature_name.clone(),
        company_name: cfg.company_name.clone(),
        attachment_name: cfg.attachment_name.clone(),
    }
}

pub fn smtp_transport(cfg: &MailConfig) -> Result<Arc<dyn MailTransport>> {
    let transport = SmtpTransport::new(&SmtpSettings {
        host: cfg.smtp_host.clone(),
        port: cfg.smtp_port,
        username: cfg.username.clone(),
        password: cfg.password.clone(),
        timeout: Duration::from_secs(cfg.timeout_secs),
    })
    .context("building SMTP transport")?;
    Ok(Arc::new(transport))
}

pub fn lead_pipeline(cfg: &ScoutConfig) -> Result<Pipeline> {
    Ok(Pipeline::new(
        search_provider(cfg)?,
        llm_client(cfg)?,
        smtp_transport(&cfg.mail)?,
        extraction_settings(cfg),
        mail_settings(&cfg.mail),
    ))
}

pub fn contact_pipeline(cfg: &ScoutConfig) -> Result<Pipeline> {
    Ok(Pipeline::contact_only(
        smtp_transport(&cfg.mail)?,
        mail_settings(&cfg.mail),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scout_config::ScoutConfigLoader;

    fn config() -> ScoutConfig {
        ScoutConfigLoader::new()
            .with_yaml_str(
                r#"
search: { api_key: "tvly", search_depth: "basic" }
llm: { api_key: "gem", temperature: 0.3 }
mail: { username: "bot@example.com", password: "pw" }
extraction: { strict_count: true }
"#,
            )
            .load()
            .unwrap()
    }

    #[test]
    fn settings_follow_config() {
        let cfg = config();

        let extraction = extraction_settings(&cfg);
        assert_eq!(extraction.expected_leads, 10);
        assert!(extraction.strict_count);
        assert_eq!(extraction.temperature, Some(0.3));

        let mail = mail_settings(&cfg.mail);
        assert_eq!(mail.sender_address, "bot@example.com");
        assert_eq!(mail.attachment_name, "Inovisionn_Leads.csv");

        let log = log_config(&cfg.logging);
        assert_eq!(log.app_name, "lead-scout");
        assert!(log.emit_stderr);
    }

    #[test]
    fn unknown_search_depth_is_rejected() {
        let mut cfg = config();
        cfg.search.search_depth = "deep".into();
        assert!(search_provider(&cfg).is_err());
    }

    #[tokio::test]
    async fn lead_pipeline_builds_without_network() {
        assert!(lead_pipeline(&config()).is_ok());
    }
}

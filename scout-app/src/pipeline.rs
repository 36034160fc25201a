use std::sync::Arc;

use scout_common::LeadCriteria;
use scout_llm::extract::{ExtractionSettings, LeadExtractor};
use scout_llm::traits::LlmClient;
use scout_mail::{ContactSubmission, MailError, MailSettings, MailTransport, Mailer};
use scout_search::{LeadSearcher, SearchProvider};

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Mail(#[from] MailError),

    #[error("lead scan requested but no search and model clients were configured")]
    ScanNotConfigured,
}

/// How a lead scan ended when nothing failed fatally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    Delivered { lead_count: usize },
    NoSearchData,
    NoLeads,
}

impl ScanOutcome {
    /// Machine-readable reason for a scan that ended without a report.
    pub fn skip_reason(&self) -> Option<&'static str> {
        match self {
            ScanOutcome::Delivered { .. } => None,
            ScanOutcome::NoSearchData => Some("no_search_data"),
            ScanOutcome::NoLeads => Some("no_leads"),
        }
    }
}

/// Who receives the report and what they asked for.
#[derive(Debug, Clone)]
pub struct LeadRequest {
    pub email: String,
    pub name: String,
    pub criteria: LeadCriteria,
}

struct ScanStages {
    searcher: LeadSearcher,
    extractor: LeadExtractor,
}

/// Search → extract → mail, plus the independent contact relay.
pub struct Pipeline {
    scan: Option<ScanStages>,
    mailer: Mailer,
}

impl Pipeline {
    /// A pipeline that can only relay contact forms.
    pub fn contact_only(transport: Arc<dyn MailTransport>, mail: MailSettings) -> Self {
        Self {
            scan: None,
            mailer: Mailer::new(transport, mail),
        }
    }

    pub fn new(
        search: Arc<dyn SearchProvider>,
        llm: Arc<dyn LlmClient>,
        transport: Arc<dyn MailTransport>,
        extraction: ExtractionSettings,
        mail: MailSettings,
    ) -> Self {
        Self {
            scan: Some(ScanStages {
                searcher: LeadSearcher::new(search),
                extractor: LeadExtractor::new(llm, extraction),
            }),
            mailer: Mailer::new(transport, mail),
        }
    }

    /// Run the scan. Search and extraction failures end the run early with
    /// an outcome; only mail delivery is an error.
    pub async fn run_lead_scan(&self, request: &LeadRequest) -> Result<ScanOutcome, PipelineError> {
        let stages = self.scan.as_ref().ok_or(PipelineError::ScanNotConfigured)?;

        let digest = match stages.searcher.search(&request.criteria).await {
            Ok(digest) => digest,
            Err(e) => {
                tracing::error!(target: "pipeline", error = %e, "pipeline.search_failed");
                return Ok(ScanOutcome::NoSearchData);
            }
        };
        if digest.is_empty() {
            tracing::warn!(
                target: "pipeline",
                sector = %request.criteria.sector,
                region = %request.criteria.region,
                "pipeline.no_search_data"
            );
            return Ok(ScanOutcome::NoSearchData);
        }

        let leads = match stages
            .extractor
            .extract(digest.as_str(), &request.criteria)
            .await
        {
            Ok(leads) => leads,
            Err(e) => {
                tracing::error!(target: "pipeline", error = %e, "pipeline.extraction_failed");
                return Ok(ScanOutcome::NoLeads);
            }
        };
        if leads.is_empty() {
            tracing::warn!(target: "pipeline", "pipeline.no_leads");
            return Ok(ScanOutcome::NoLeads);
        }

        self.mailer
            .send_report(&request.email, &request.name, &leads)
            .await?;

        tracing::info!(target: "pipeline", lead_count = leads.len(), "pipeline.delivered");
        Ok(ScanOutcome::Delivered {
            lead_count: leads.len(),
        })
    }

    pub async fn relay_contact(&self, submission: &ContactSubmission) -> Result<(), PipelineError> {
        tracing::info!(
            target: "pipeline",
            name = %submission.name,
            company = %submission.company,
            "pipeline.contact_received"
        );
        self.mailer.send_contact(submission).await?;
        Ok(())
    }
}

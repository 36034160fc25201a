//! `lead-scout`: lead scan (search → extract → mail) and contact-form relay.
pub mod cli;
pub mod pipeline;
pub mod wiring;

use anyhow::{Context, Result};
use scout_common::observability::init_logging;
use scout_config::{Mode, ScoutConfigLoader};

use crate::cli::Cli;
use crate::pipeline::{LeadRequest, ScanOutcome};

/// Load config, start logging, validate, then dispatch on `--form_type`.
pub async fn run(cli: Cli) -> Result<()> {
    let cfg = ScoutConfigLoader::new()
        .with_cli_path(cli.config.as_deref())?
        .load()
        .context("loading configuration")?;

    let log_path = init_logging(wiring::log_config(&cfg.logging))?;
    let mode = cli.mode();
    tracing::info!(
        target: "app",
        log_path = %log_path.display(),
        mode = ?mode,
        "lead_scout.start"
    );

    cfg.validate(mode).context("validating configuration")?;

    match mode {
        Mode::Contact => {
            let submission = cli.contact_submission()?;
            let pipeline = wiring::contact_pipeline(&cfg)?;
            pipeline
                .relay_contact(&submission)
                .await
                .context("relaying contact form")?;
        }
        Mode::LeadScan => {
            let request = LeadRequest {
                email: cli.email.clone(),
                name: cli.naam.clone(),
                criteria: cli.criteria(),
            };
            let pipeline = wiring::lead_pipeline(&cfg)?;
            let outcome = pipeline
                .run_lead_scan(&request)
                .await
                .context("delivering lead report")?;
            match outcome {
                ScanOutcome::Delivered { lead_count } => {
                    tracing::info!(target: "app", lead_count, "lead_scout.report_delivered");
                }
                skipped => {
                    tracing::warn!(
                        target: "app",
                        reason = skipped.skip_reason().unwrap_or_default(),
                        "lead_scout.skipped"
                    );
                }
            }
        }
    }

    Ok(())
}

use anyhow::Result;
use clap::Parser;
use scout_app::cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = scout_app::run(cli).await {
        tracing::error!(target: "app", error = ?e, "lead_scout.failed");
        return Err(e);
    }
    Ok(())
}

//! Health command - probe the marketplace webhooks.

use colored::Colorize;
use marketplace_webhooks::MarketplaceClient;

use crate::error::{CliError, CliResult};

/// Fail with [`CliError::Unhealthy`] unless the webhooks answer `ok`.
pub async fn ensure_healthy(client: &MarketplaceClient) -> CliResult<()> {
    if client.check_health().await {
        Ok(())
    } else {
        Err(CliError::Unhealthy {
            url: client.base_url().to_string(),
        })
    }
}

/// Probe the webhooks and report.
pub async fn run(client: &MarketplaceClient) -> CliResult<()> {
    ensure_healthy(client).await?;
    println!(
        "  {} Marketplace webhooks at {} are healthy",
        "✓".green(),
        client.base_url()
    );
    Ok(())
}

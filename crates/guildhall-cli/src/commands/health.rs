use std::time::Duration;

use anyhow::{Context, Result, bail};
use guildhall_core::config::HubConfig;
use guildhall_core::health::HealthService;
use guildhall_infrastructure::{ApiClient, HttpHealthService};

use super::{print_json, user_error};

/// Probe without restoring the session first.
pub async fn run_standalone(config: &HubConfig, json: bool) -> Result<()> {
    let api = ApiClient::new(&config.api).context("Failed to build HTTP client")?;
    let service = HttpHealthService::new(api, Duration::from_secs(config.api.health_timeout_secs));
    run(&service, &config.api.base_url, json).await
}

pub async fn run(service: &dyn HealthService, base_url: &str, json: bool) -> Result<()> {
    let status = service.check().await.map_err(user_error)?;
    if json {
        return print_json(&status);
    }

    let version = status
        .version
        .as_deref()
        .map(|v| format!(" (version {v})"))
        .unwrap_or_default();
    if !status.is_healthy() {
        bail!("{base_url} reported status '{}'{version}", status.status);
    }
    println!("{base_url} is healthy{version}");
    Ok(())
}

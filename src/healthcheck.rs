use std::time::Duration;
use thiserror::Error;

use crate::config::DEFAULT_HTTP_PORT;

/// Error type for healthcheck failures
#[derive(Debug, Error)]
#[error("Healthcheck failed: {0}")]
pub struct HealthcheckError(String);

/// Perform a health check against `HTTP_PORT` (default 5000)
pub async fn healthcheck() -> Result<(), HealthcheckError> {
    let port = match std::env::var("HTTP_PORT") {
        Ok(port) => port
            .parse::<u16>()
            .map_err(|e| HealthcheckError(format!("Invalid HTTP_PORT {port}: {e}")))?,
        Err(_) => DEFAULT_HTTP_PORT,
    };
    healthcheck_with_port(port).await
}

/// Perform a health check against a specific port
pub async fn healthcheck_with_port(port: u16) -> Result<(), HealthcheckError> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(2))
        .build()
        .map_err(|e| HealthcheckError(format!("Failed to create HTTP client: {e}")))?;

    let url = format!("http://127.0.0.1:{port}/v1/health");

    let resp = client
        .get(&url)
        .send()
        .await
        .map_err(|e| HealthcheckError(format!("Request failed: {e}")))?;

    if resp.status().is_success() {
        Ok(())
    } else {
        Err(HealthcheckError(format!(
            "Health endpoint returned status: {}",
            resp.status()
        )))
    }
}

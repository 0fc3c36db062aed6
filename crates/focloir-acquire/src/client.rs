use anyhow::{Context, Result};
use focloir_model::{Absence, Fetched};
use reqwest::StatusCode;
use std::time::Duration;

const USER_AGENT: &str = concat!("focloir/", env!("CARGO_PKG_VERSION"), " (Irish flashcard tool)");

/// Build the HTTP client shared by the dictionary and audio fetchers.
///
/// `timeout` bounds each request end to end, so one stalled word cannot
/// hold up the rest of the batch.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .context("Failed to build HTTP client")
}

pub(crate) fn absence_from(err: &reqwest::Error) -> Absence {
    if err.is_timeout() {
        Absence::Timeout
    } else {
        Absence::Transport(err.to_string())
    }
}

/// GET `url`, treating anything but 200 as absent.
pub(crate) async fn get_ok(client: &reqwest::Client, url: &str) -> Fetched<reqwest::Response> {
    let response = client.get(url).send().await.map_err(|e| {
        tracing::warn!(url = %url, error = %e, "Request failed");
        absence_from(&e)
    })?;

    let status = response.status();
    if status != StatusCode::OK {
        tracing::debug!(url = %url, status = %status, "Non-200 response");
        return Err(Absence::Status(status.as_u16()));
    }

    Ok(response)
}

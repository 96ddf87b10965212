//! Shared HTTP plumbing for weather sources

use reqwest::{Response, StatusCode};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, RequestBuilder};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use std::time::Duration;
use tracing::warn;

use super::SourceReport;
use crate::config::SourcesConfig;
use crate::{BriefingError, Result};

/// Default `User-Agent` for sources that do not require a specific one
pub const USER_AGENT: &str = concat!("skybrief/", env!("CARGO_PKG_VERSION"));

/// Outcome of fetching one part (METAR or TAF): text, not found, or a failure reason
pub(crate) type PartResult = std::result::Result<Option<String>, String>;

/// Build the HTTP client shared by all sources, retrying transient failures
pub fn build_client(config: &SourcesConfig) -> Result<ClientWithMiddleware> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| BriefingError::config(format!("Failed to create HTTP client: {e}")))?;

    let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.max_retries);

    Ok(ClientBuilder::new(client)
        .with(RetryTransientMiddleware::new_with_policy(retry_policy))
        .build())
}

/// Send a request. 404 means "no report for this station" and yields `None`.
pub(crate) async fn send(request: RequestBuilder) -> std::result::Result<Option<Response>, String> {
    let response = request
        .send()
        .await
        .map_err(|e| format!("request failed: {e}"))?;

    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Ok(None);
    }
    if !status.is_success() {
        return Err(format!("HTTP {status}"));
    }
    Ok(Some(response))
}

/// Merge the METAR and TAF fetches of one source.
///
/// One failed part is tolerated and leaves that part empty; the source is only
/// unavailable when both parts failed.
pub(crate) fn combine_parts(source_name: &str, metar: PartResult, taf: PartResult) -> Result<SourceReport> {
    match (metar, taf) {
        (Err(metar_err), Err(taf_err)) => Err(BriefingError::source_unavailable(
            source_name,
            format!("METAR: {metar_err}; TAF: {taf_err}"),
        )),
        (metar, taf) => {
            if let Err(reason) = &metar {
                warn!(source = source_name, %reason, "METAR fetch failed, continuing with TAF only");
            }
            if let Err(reason) = &taf {
                warn!(source = source_name, %reason, "TAF fetch failed, continuing with METAR only");
            }
            Ok(SourceReport::new(
                metar.ok().flatten().unwrap_or_default(),
                taf.ok().flatten().unwrap_or_default(),
            ))
        }
    }
}

/// Join a base URL and a path without doubling slashes
pub(crate) fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

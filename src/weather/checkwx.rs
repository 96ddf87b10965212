//! CheckWX aviation weather API (requires an API key)

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest_middleware::ClientWithMiddleware;
use serde::Deserialize;
use tracing::{debug, instrument};

use super::http::{self, PartResult};
use super::{SourceReport, WeatherSource};
use crate::Result;
use crate::config::CheckWxConfig;

pub const NAME: &str = "CheckWX";

/// CheckWX client
pub struct CheckWxProvider {
    client: ClientWithMiddleware,
    api_key: Option<String>,
    base_url: String,
}

/// `/metar/{icao}` and `/taf/{icao}` response body
#[derive(Debug, Deserialize)]
struct CheckWxResponse {
    #[serde(default)]
    results: u32,
    #[serde(default)]
    data: Vec<String>,
}

impl CheckWxResponse {
    fn first_report(self) -> Option<String> {
        if self.results == 0 {
            return None;
        }
        self.data.into_iter().next()
    }
}

impl CheckWxProvider {
    #[must_use]
    pub fn new(config: &CheckWxConfig, client: ClientWithMiddleware) -> Self {
        Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
        }
    }

    async fn fetch_part(&self, api_key: &str, kind: &str, icao: &str) -> PartResult {
        let url = http::join_url(
            &self.base_url,
            &format!("{kind}/{}", urlencoding::encode(icao)),
        );
        debug!(%url, "CheckWX request");

        let request = self
            .client
            .get(&url)
            .header("X-API-Key", api_key)
            .header(ACCEPT, "application/json");

        let Some(response) = http::send(request).await? else {
            return Ok(None);
        };
        let body: CheckWxResponse = response
            .json()
            .await
            .map_err(|e| format!("invalid CheckWX payload: {e}"))?;
        Ok(body.first_report())
    }
}

#[async_trait]
impl WeatherSource for CheckWxProvider {
    fn name(&self) -> &'static str {
        NAME
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    #[instrument(name = "checkwx_fetch", skip(self))]
    async fn fetch_report(&self, icao: &str) -> Result<SourceReport> {
        let Some(api_key) = self.api_key.as_deref() else {
            debug!("CheckWX not configured - missing API key");
            return Ok(SourceReport::default());
        };

        let metar = self.fetch_part(api_key, "metar", icao).await;
        let taf = self.fetch_part(api_key, "taf", icao).await;
        http::combine_parts(NAME, metar, taf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SourcesConfig;

    #[test]
    fn test_first_report_from_payload() {
        let body: CheckWxResponse = serde_json::from_str(
            r#"{"results": 1, "data": ["KJFK 121251Z 31015KT 10SM FEW050 22/12 A3002"]}"#,
        )
        .unwrap();
        assert_eq!(
            body.first_report().as_deref(),
            Some("KJFK 121251Z 31015KT 10SM FEW050 22/12 A3002")
        );
    }

    #[test]
    fn test_no_results_payload() {
        let body: CheckWxResponse = serde_json::from_str(r#"{"results": 0, "data": []}"#).unwrap();
        assert!(body.first_report().is_none());

        let body: CheckWxResponse = serde_json::from_str("{}").unwrap();
        assert!(body.first_report().is_none());
    }

    #[tokio::test]
    async fn test_unconfigured_provider_returns_empty_report() {
        let sources = SourcesConfig::default();
        let client = http::build_client(&sources).unwrap();
        let provider = CheckWxProvider::new(&sources.checkwx, client);

        assert!(!provider.is_configured());
        let report = provider.fetch_report("KJFK").await.unwrap();
        assert!(!report.has_data());
    }
}

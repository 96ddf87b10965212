//! MET Norway TAF/METAR API (free, no key; requires an identifying User-Agent)

use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest_middleware::ClientWithMiddleware;
use tracing::{debug, instrument};

use super::http::{self, PartResult};
use super::{SourceReport, WeatherSource};
use crate::Result;
use crate::config::MetNoConfig;

pub const NAME: &str = "MET Norway";

/// MET Norway client
pub struct MetNoProvider {
    client: ClientWithMiddleware,
    base_url: String,
    user_agent: String,
}

impl MetNoProvider {
    #[must_use]
    pub fn new(config: &MetNoConfig, client: ClientWithMiddleware) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            user_agent: config.user_agent.clone(),
        }
    }

    async fn fetch_part(&self, file: &str, icao: &str) -> PartResult {
        let url = format!(
            "{}?icao={}",
            http::join_url(&self.base_url, file),
            urlencoding::encode(icao)
        );
        debug!(%url, "MET Norway request");

        let request = self.client.get(&url).header(USER_AGENT, &self.user_agent);
        let Some(response) = http::send(request).await? else {
            return Ok(None);
        };
        let body = response
            .text()
            .await
            .map_err(|e| format!("unreadable MET Norway body: {e}"))?;
        Ok(latest_report(&body))
    }
}

/// The service lists one report per line, oldest first; keep the newest
fn latest_report(body: &str) -> Option<String> {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .last()
        .map(|line| line.trim_end_matches('=').trim_end().to_string())
}

#[async_trait]
impl WeatherSource for MetNoProvider {
    fn name(&self) -> &'static str {
        NAME
    }

    fn is_configured(&self) -> bool {
        !self.base_url.is_empty()
    }

    #[instrument(name = "metno_fetch", skip(self))]
    async fn fetch_report(&self, icao: &str) -> Result<SourceReport> {
        let metar = self.fetch_part("metar.txt", icao).await;
        let taf = self.fetch_part("taf.txt", icao).await;
        http::combine_parts(NAME, metar, taf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_report_is_last_line() {
        let body = "ENGM 120920Z 01004KT 9999 FEW030 M02/M06 Q1003 NOSIG=\n\
                    ENGM 120950Z 01005KT 3000 -SN BKN008 M05/M08 Q1002=\n\n";
        assert_eq!(
            latest_report(body).as_deref(),
            Some("ENGM 120950Z 01005KT 3000 -SN BKN008 M05/M08 Q1002")
        );
    }

    #[test]
    fn test_empty_body_has_no_report() {
        assert!(latest_report("").is_none());
        assert!(latest_report("\n  \n").is_none());
    }
}

//! MetService NZ aviation API (requires an API key and base URL)

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest_middleware::ClientWithMiddleware;
use serde::Deserialize;
use tracing::{debug, instrument};

use super::http::{self, PartResult};
use super::{SourceReport, WeatherSource};
use crate::Result;
use crate::config::MetServiceConfig;

pub const NAME: &str = "MetService NZ";

/// MetService client
pub struct MetServiceProvider {
    client: ClientWithMiddleware,
    api_key: Option<String>,
    base_url: Option<String>,
    metar_path: String,
    taf_path: String,
}

#[derive(Debug, Deserialize)]
struct MetarBody {
    #[serde(rename = "rawMETAR", default)]
    raw_metar: String,
}

#[derive(Debug, Deserialize)]
struct TafBody {
    #[serde(rename = "rawTAF", default)]
    raw_taf: String,
}

impl MetServiceProvider {
    #[must_use]
    pub fn new(config: &MetServiceConfig, client: ClientWithMiddleware) -> Self {
        Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            metar_path: config.metar_path.clone(),
            taf_path: config.taf_path.clone(),
        }
    }

    async fn fetch_body<T: serde::de::DeserializeOwned>(
        &self,
        base_url: &str,
        api_key: &str,
        path: &str,
        icao: &str,
    ) -> std::result::Result<Option<T>, String> {
        let url = http::join_url(
            base_url,
            &format!("{}/{}", path.trim_end_matches('/'), urlencoding::encode(icao)),
        );
        debug!(%url, "MetService request");

        let request = self
            .client
            .get(&url)
            .header(AUTHORIZATION, format!("Bearer {api_key}"))
            .header(ACCEPT, "application/json");

        let Some(response) = http::send(request).await? else {
            return Ok(None);
        };
        response
            .json()
            .await
            .map(Some)
            .map_err(|e| format!("invalid MetService payload: {e}"))
    }
}

#[async_trait]
impl WeatherSource for MetServiceProvider {
    fn name(&self) -> &'static str {
        NAME
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some() && self.base_url.is_some()
    }

    #[instrument(name = "metservice_fetch", skip(self))]
    async fn fetch_report(&self, icao: &str) -> Result<SourceReport> {
        let (Some(api_key), Some(base_url)) = (self.api_key.as_deref(), self.base_url.as_deref()) else {
            debug!("MetService NZ not configured - missing API key or base URL");
            return Ok(SourceReport::default());
        };

        let metar: PartResult = self
            .fetch_body::<MetarBody>(base_url, api_key, &self.metar_path, icao)
            .await
            .map(|body| body.map(|b| b.raw_metar));
        let taf: PartResult = self
            .fetch_body::<TafBody>(base_url, api_key, &self.taf_path, icao)
            .await
            .map(|body| body.map(|b| b.raw_taf));

        http::combine_parts(NAME, metar, taf)
    }
}

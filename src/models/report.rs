//! Raw weather report model and ICAO normalization

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{BriefingError, Result};

/// Raw METAR/TAF text for one airport as delivered by a weather source
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RawWeatherReport {
    /// Uppercase 4-character ICAO code
    pub icao: String,
    /// Raw METAR text, empty when not available
    pub metar_raw: String,
    /// Raw TAF text, empty when not available
    pub taf_raw: String,
    /// Name of the source that supplied the report, `None` when no source had data
    pub source: Option<String>,
    /// When this report was retrieved
    pub retrieved_at: DateTime<Utc>,
}

impl RawWeatherReport {
    /// Create a report supplied by the named source
    #[must_use]
    pub fn new(icao: &str, metar_raw: &str, taf_raw: &str, source: Option<String>) -> Self {
        Self {
            icao: icao.trim().to_uppercase(),
            metar_raw: metar_raw.trim().to_string(),
            taf_raw: taf_raw.trim().to_string(),
            source,
            retrieved_at: Utc::now(),
        }
    }

    /// Report meaning "no data available"
    #[must_use]
    pub fn empty(icao: &str) -> Self {
        Self::new(icao, "", "", None)
    }

    /// True when either the METAR or the TAF is non-empty
    #[must_use]
    pub fn has_data(&self) -> bool {
        !self.metar_raw.is_empty() || !self.taf_raw.is_empty()
    }

    #[must_use]
    pub fn has_metar(&self) -> bool {
        !self.metar_raw.is_empty()
    }

    #[must_use]
    pub fn has_taf(&self) -> bool {
        !self.taf_raw.is_empty()
    }
}

/// Trim and uppercase an ICAO code, rejecting anything that is not 4 ASCII alphanumerics
pub fn normalize_icao(icao: &str) -> Result<String> {
    let normalized = icao.trim().to_uppercase();
    if normalized.len() != 4 || !normalized.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(BriefingError::validation(format!(
            "ICAO code must be 4 letters or digits, got '{}'",
            icao.trim()
        )));
    }
    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_normalizes_icao() {
        let report = RawWeatherReport::new(" nzaa ", "METAR NZAA", "", Some("MetService".into()));
        assert_eq!(report.icao, "NZAA");
        assert!(report.has_data());
        assert!(report.has_metar());
        assert!(!report.has_taf());
    }

    #[test]
    fn test_empty_report_has_no_data() {
        let report = RawWeatherReport::empty("engm");
        assert_eq!(report.icao, "ENGM");
        assert!(!report.has_data());
        assert!(report.source.is_none());
    }

    #[test]
    fn test_whitespace_only_text_counts_as_empty() {
        let report = RawWeatherReport::new("KJFK", "  ", "\n", Some("CheckWX".into()));
        assert!(!report.has_data());
    }

    #[test]
    fn test_normalize_icao() {
        assert_eq!(normalize_icao("kjfk").unwrap(), "KJFK");
        assert_eq!(normalize_icao(" egll\n").unwrap(), "EGLL");
        assert!(normalize_icao("JFK").is_err());
        assert!(normalize_icao("KJ-K").is_err());
        assert!(normalize_icao("").is_err());
    }
}

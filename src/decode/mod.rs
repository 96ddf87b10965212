//! METAR and TAF text decoding
//!
//! Both decoders match known groups independently instead of walking a strict
//! grammar, so a malformed group never prevents the others from being recovered.
//! All decoding is pure: the same text always yields the same record.

pub mod metar;
pub mod taf;

use regex::Regex;
use std::sync::LazyLock;

use crate::models::Wind;

pub use metar::{MetarDecoder, decode_metar};
pub use taf::decode_taf;

/// Kilometers per statute mile
pub const STATUTE_MILE_KM: f64 = 1.609;

/// Reports with fewer whitespace-separated groups are not decoded
pub(crate) const MIN_GROUPS: usize = 3;

static WIND_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{3})(\d{2,3})(?:G(\d{2,3}))?KT\b").unwrap());

static SM_FRACTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|\s)[PM]?(?:(\d{1,2})\s+)?(\d{1,2})/(\d{1,2})SM\b").unwrap()
});

static SM_WHOLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)[PM]?(\d{1,4})SM\b").unwrap());

static METRIC_VISIBILITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)(\d{4})(?:NDV)?(?:\s|$)").unwrap());

/// Find the first `dddff[Ggg]KT` group
pub(crate) fn parse_wind(text: &str) -> Option<Wind> {
    WIND_RE.captures_iter(text).find_map(|caps| {
        let dir_deg: u16 = caps[1].parse().ok()?;
        if dir_deg > 360 {
            return None;
        }
        Some(Wind {
            dir_deg,
            speed_kt: caps[2].parse().ok()?,
            gust_kt: caps.get(3).and_then(|g| g.as_str().parse().ok()),
        })
    })
}

/// Prevailing visibility in kilometers.
///
/// Statute-mile groups take precedence; `CAVOK` and then the metric `dddd`
/// group are used only when no statute-mile group is present.
pub(crate) fn parse_visibility_km(text: &str) -> Option<f64> {
    if let Some(miles) = parse_statute_miles(text) {
        return Some(round_hundredth(miles * STATUTE_MILE_KM));
    }

    if text.split_whitespace().any(|group| group == "CAVOK") {
        return Some(10.0);
    }

    if let Some(caps) = METRIC_VISIBILITY_RE.captures(text) {
        let meters: f64 = caps[1].parse().ok()?;
        return Some(if meters >= 9999.0 { 10.0 } else { meters / 1000.0 });
    }

    None
}

fn parse_statute_miles(text: &str) -> Option<f64> {
    if let Some(caps) = SM_FRACTION_RE.captures(text) {
        let numerator: f64 = caps[2].parse().ok()?;
        let denominator: f64 = caps[3].parse().ok()?;
        if denominator > 0.0 {
            let whole: f64 = caps
                .get(1)
                .and_then(|w| w.as_str().parse().ok())
                .unwrap_or(0.0);
            return Some(whole + numerator / denominator);
        }
    }

    SM_WHOLE_RE
        .captures(text)
        .and_then(|caps| caps[1].parse::<f64>().ok())
}

fn round_hundredth(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

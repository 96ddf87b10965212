//! TAF decoder

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

use super::{MIN_GROUPS, parse_visibility_km, parse_wind};
use crate::models::{DecodedTaf, WeatherPhenomenon};

/// Summary used when no group could be recovered
pub const TAF_SUMMARY_FALLBACK: &str = "TAF data available";

/// A present-weather group: optional intensity/proximity, then two-letter codes
static WEATHER_GROUP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:\+|-|VC)?((?:MI|PR|BC|DR|BL|SH|TS|FZ|DZ|RA|SN|SG|IC|PL|GR|GS|UP|BR|FG|FU|VA|DU|SA|HZ|PY|PO|SQ|FC|SS|DS)+)$",
    )
    .unwrap()
});

/// Decode one raw TAF into wind, visibility, weather and a summary line
#[must_use]
pub fn decode_taf(raw: &str) -> DecodedTaf {
    let raw = raw.trim();
    let mut decoded = DecodedTaf {
        wind: None,
        visibility_km: None,
        weather: BTreeSet::new(),
        summary: String::new(),
        raw: raw.to_string(),
        error: None,
    };

    let group_count = raw.split_whitespace().count();
    if !raw.is_empty() && group_count < MIN_GROUPS {
        decoded.error = Some(format!(
            "TAF too short to decode: expected at least {MIN_GROUPS} groups, found {group_count}"
        ));
    } else if !raw.is_empty() {
        decoded.wind = parse_wind(raw);
        decoded.visibility_km = parse_visibility_km(raw);
        decoded.weather = parse_weather(raw);
    }

    decoded.summary = summarize(&decoded);
    decoded
}

fn parse_weather(text: &str) -> BTreeSet<WeatherPhenomenon> {
    text.split_whitespace()
        .filter_map(|group| WEATHER_GROUP_RE.captures(group))
        .flat_map(|caps| {
            let codes = caps[1].to_string();
            (0..codes.len())
                .step_by(2)
                .filter_map(|i| WeatherPhenomenon::from_code(&codes[i..i + 2]))
                .collect::<Vec<_>>()
        })
        .collect()
}

fn summarize(decoded: &DecodedTaf) -> String {
    let mut parts = Vec::new();

    if let Some(wind) = &decoded.wind {
        parts.push(format!("Wind {}° at {} kt", wind.dir_deg, wind.speed_kt));
    }
    if let Some(visibility) = decoded.visibility_km {
        parts.push(format!("Visibility {visibility:.1} km"));
    }
    if !decoded.weather.is_empty() {
        let names: Vec<String> = decoded.weather.iter().map(ToString::to_string).collect();
        parts.push(format!("Weather: {}", names.join(", ")));
    }

    if parts.is_empty() {
        TAF_SUMMARY_FALLBACK.to_string()
    } else {
        parts.join("; ")
    }
}

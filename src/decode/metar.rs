//! METAR decoder

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use super::{MIN_GROUPS, parse_visibility_km, parse_wind};
use crate::decision::FlightCategoryThresholds;
use crate::models::{CloudCover, DecodedMetar, Temperature};

static CEILING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)(BKN|OVC|VV)(\d{3})").unwrap());

static TEMPERATURE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)(M?\d{2})/(M?\d{2})(?:\s|$)").unwrap());

/// Start of the remarks section or of a trend forecast appended to the observation
static OBSERVATION_END_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s(?:RMK|TEMPO|BECMG|NOSIG|FM\d{4,6}|PROB\d{2})(?:\s|$)").unwrap()
});

static CLOUD_LAYER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(FEW|SCT|BKN|OVC)(\d{3}|///)").unwrap());

/// Decodes METAR text, classifying flight rules with the configured thresholds
#[derive(Debug, Clone, Copy, Default)]
pub struct MetarDecoder {
    thresholds: FlightCategoryThresholds,
}

impl MetarDecoder {
    #[must_use]
    pub fn new(thresholds: FlightCategoryThresholds) -> Self {
        Self { thresholds }
    }

    /// Decode one raw METAR.
    ///
    /// Empty text yields an empty record. Text with fewer than three groups
    /// yields a record carrying only `raw` and `error`.
    #[must_use]
    pub fn decode(&self, raw: &str) -> DecodedMetar {
        let raw = raw.trim();
        let mut decoded = DecodedMetar {
            raw: raw.to_string(),
            ..DecodedMetar::default()
        };

        if raw.is_empty() {
            return decoded;
        }

        let group_count = raw.split_whitespace().count();
        if group_count < MIN_GROUPS {
            debug!(group_count, "METAR too short to decode");
            decoded.error = Some(format!(
                "METAR too short to decode: expected at least {MIN_GROUPS} groups, found {group_count}"
            ));
            return decoded;
        }

        let body = observation_body(raw);

        decoded.wind = parse_wind(body);
        decoded.visibility_km = parse_visibility_km(body);
        decoded.ceiling_ft = parse_ceiling_ft(body);
        decoded.temperature = parse_temperature(body);
        decoded.cloud_cover = parse_cloud_cover(body);
        decoded.flight_rules = Some(
            self.thresholds
                .classify(decoded.visibility_km, decoded.ceiling_ft),
        );

        decoded
    }
}

/// Decode a METAR with the default flight category thresholds
#[must_use]
pub fn decode_metar(raw: &str) -> DecodedMetar {
    MetarDecoder::default().decode(raw)
}

/// Observation part of the report, without trend forecasts and remarks
fn observation_body(raw: &str) -> &str {
    match OBSERVATION_END_RE.find(raw) {
        Some(m) => &raw[..m.start()],
        None => raw,
    }
}

/// Height of the lowest broken/overcast layer or vertical visibility
fn parse_ceiling_ft(text: &str) -> Option<f64> {
    CEILING_RE
        .captures(text)
        .and_then(|caps| caps[2].parse::<f64>().ok())
        .map(|hundreds| hundreds * 100.0)
}

fn parse_temperature(text: &str) -> Option<Temperature> {
    let caps = TEMPERATURE_RE.captures(text)?;
    Some(Temperature {
        temp_c: parse_signed_celsius(&caps[1])?,
        dewpoint_c: parse_signed_celsius(&caps[2])?,
    })
}

/// `M05` is -5, `12` is 12
fn parse_signed_celsius(group: &str) -> Option<i32> {
    match group.strip_prefix('M') {
        Some(digits) => digits.parse::<i32>().ok().map(|value| -value),
        None => group.parse().ok(),
    }
}

fn parse_cloud_cover(text: &str) -> Option<CloudCover> {
    text.split_whitespace()
        .filter_map(|group| match group {
            "SKC" | "CLR" | "NSC" | "NCD" | "CAVOK" => Some(CloudCover::Clear),
            _ if group.starts_with("VV") => Some(CloudCover::Overcast),
            _ => CLOUD_LAYER_RE
                .captures(group)
                .map(|caps| match &caps[1] {
                    "FEW" => CloudCover::Few,
                    "SCT" => CloudCover::Scattered,
                    "BKN" => CloudCover::Broken,
                    _ => CloudCover::Overcast,
                }),
        })
        .max()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::FlightCategory;

    const KJFK: &str = "METAR KJFK 121251Z 31015G25KT 10SM FEW050 BKN250 22/12 A3002 RMK AO2 SLP165";
    const LOW_IFR: &str = "METAR KSFO 121256Z 28008KT 1/2SM FG VV002 12/12 A2992";
    const COLD: &str = "METAR ENGM 120950Z 01005KT 3000 -SN BKN008 M05/M08 Q1002";

    #[test]
    fn test_decode_full_report() {
        let decoded = decode_metar(KJFK);

        let wind = decoded.wind.unwrap();
        assert_eq!(wind.dir_deg, 310);
        assert_eq!(wind.speed_kt, 15);
        assert_eq!(wind.gust_kt, Some(25));
        assert!((decoded.visibility_km.unwrap() - 16.09).abs() < 0.01);
        assert_eq!(decoded.ceiling_ft, Some(25000.0));
        assert_eq!(
            decoded.temperature,
            Some(Temperature { temp_c: 22, dewpoint_c: 12 })
        );
        assert_eq!(decoded.cloud_cover, Some(CloudCover::Broken));
        assert_eq!(decoded.flight_rules, Some(FlightCategory::Vfr));
        assert_eq!(decoded.raw, KJFK);
        assert!(decoded.error.is_none());
    }

    #[test]
    fn test_vertical_visibility_counts_as_ceiling() {
        let decoded = decode_metar(LOW_IFR);
        assert_eq!(decoded.ceiling_ft, Some(200.0));
        assert_eq!(decoded.cloud_cover, Some(CloudCover::Overcast));
        assert_eq!(decoded.flight_rules, Some(FlightCategory::Lifr));
    }

    #[test]
    fn test_negative_temperatures_and_metric_visibility() {
        let decoded = decode_metar(COLD);
        assert_eq!(
            decoded.temperature,
            Some(Temperature { temp_c: -5, dewpoint_c: -8 })
        );
        assert_eq!(decoded.visibility_km, Some(3.0));
        assert_eq!(decoded.ceiling_ft, Some(800.0));
        assert_eq!(decoded.flight_rules, Some(FlightCategory::Ifr));
    }

    #[test]
    fn test_missing_groups_stay_absent() {
        let decoded = decode_metar("METAR XXXX 121200Z NIL");
        assert!(decoded.wind.is_none());
        assert!(decoded.visibility_km.is_none());
        assert!(decoded.ceiling_ft.is_none());
        assert!(decoded.temperature.is_none());
        assert_eq!(decoded.flight_rules, Some(FlightCategory::Unknown));
        assert!(decoded.error.is_none());
    }

    #[test]
    fn test_short_input_yields_only_raw_and_error() {
        let decoded = decode_metar("X");
        assert_eq!(decoded.raw, "X");
        assert!(decoded.error.is_some());
        assert!(decoded.wind.is_none());
        assert!(decoded.flight_rules.is_none());

        let json = serde_json::to_value(&decoded).unwrap();
        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 2);
    }

    #[test]
    fn test_empty_input_is_no_data_not_error() {
        let decoded = decode_metar("   ");
        assert_eq!(decoded.raw, "");
        assert!(decoded.error.is_none());
        assert!(decoded.flight_rules.is_none());
    }

    #[test]
    fn test_decoding_is_deterministic() {
        assert_eq!(decode_metar(KJFK), decode_metar(KJFK));
        assert_eq!(decode_metar("X"), decode_metar("X"));
    }

    #[test]
    fn test_remarks_are_ignored() {
        let decoded = decode_metar("METAR KBOS 121254Z 09010KT 10SM CLR 20/10 A3001 RMK OVC002");
        assert!(decoded.ceiling_ft.is_none());
        assert_eq!(decoded.cloud_cover, Some(CloudCover::Clear));
    }

    #[test]
    fn test_trend_groups_are_not_current_conditions() {
        let decoded =
            decode_metar("METAR ENGM 121250Z 24010KT CAVOK 15/08 Q1015 TEMPO 4000 SHRA BKN012");
        assert_eq!(decoded.visibility_km, Some(10.0));
        assert!(decoded.ceiling_ft.is_none());
        assert_eq!(decoded.cloud_cover, Some(CloudCover::Clear));
        assert_eq!(decoded.flight_rules, Some(FlightCategory::Unknown));

        let decoded = decode_metar(
            "METAR EGLL 121250Z VRB03KT 9999 SCT040 18/09 Q1021 BECMG 27025G35KT",
        );
        assert!(decoded.wind.is_none());
        assert_eq!(decoded.visibility_km, Some(10.0));
    }

    #[test]
    fn test_forecast_change_groups_end_observation() {
        let decoded =
            decode_metar("METAR EDDF 121250Z 25008KT 9999 FEW030 14/07 Q1018 PROB30 0800 FG OVC001");
        assert_eq!(decoded.visibility_km, Some(10.0));
        assert!(decoded.ceiling_ft.is_none());

        let decoded = decode_metar("METAR ENGM 120950Z 01005KT 3000 -SN BKN008 M05/M08 Q1002 NOSIG");
        assert_eq!(decoded.ceiling_ft, Some(800.0));
        assert_eq!(decoded.flight_rules, Some(FlightCategory::Ifr));
    }

    #[test]
    fn test_configured_thresholds_drive_flight_rules() {
        let strict = MetarDecoder::new(FlightCategoryThresholds {
            vfr_min_visibility_km: 20.0,
            ..FlightCategoryThresholds::default()
        });
        assert_eq!(strict.decode(KJFK).flight_rules, Some(FlightCategory::Mvfr));
    }
}

//! Known field names and their spelling variants.
//!
//! Each logical field has a canonical key (the upper-snake form the feed
//! documents) and a short list of variants seen across endpoint versions.
//! Keys are tried in order; the first present, non-null value wins.

use serde_json::{Map, Value};

use crate::domain::AgeBand;
use crate::normalize::coerce::{coerce_count, coerce_ratio, scalar_text};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldKey {
    pub canonical: &'static str,
    pub variants: &'static [&'static str],
}

impl FieldKey {
    pub fn candidates(&self) -> impl Iterator<Item = &'static str> {
        std::iter::once(self.canonical).chain(self.variants.iter().copied())
    }
}

const fn key(canonical: &'static str, variants: &'static [&'static str]) -> FieldKey {
    FieldKey {
        canonical,
        variants,
    }
}

pub const AREA_NAME: FieldKey = key("AREA_NM", &["area_nm", "areaNm"]);
pub const AREA_CODE: FieldKey = key("AREA_CD", &["area_cd", "areaCd"]);
pub const CONGESTION_LEVEL: FieldKey = key("AREA_CONGEST_LVL", &["area_congest_lvl", "areaCongestLvl"]);
pub const CONGESTION_MESSAGE: FieldKey = key("AREA_CONGEST_MSG", &["area_congest_msg", "areaCongestMsg"]);
pub const POPULATION_MIN: FieldKey = key("AREA_PPLTN_MIN", &["area_ppltn_min", "areaPpltnMin"]);
pub const POPULATION_MAX: FieldKey = key("AREA_PPLTN_MAX", &["area_ppltn_max", "areaPpltnMax"]);
pub const MALE_RATIO: FieldKey = key("MALE_PPLTN_RATE", &["male_ppltn_rate", "malePpltnRate"]);
pub const FEMALE_RATIO: FieldKey = key("FEMALE_PPLTN_RATE", &["female_ppltn_rate", "femalePpltnRate"]);
pub const OBSERVED_AT: FieldKey = key("PPLTN_TIME", &["ppltn_time", "ppltnTime"]);

pub const FORECASTS: FieldKey = key("FCST_PPLTN", &["fcst_ppltn", "fcstPpltn"]);
pub const FORECAST_TIME: FieldKey = key("FCST_TIME", &["fcst_time", "fcstTime"]);
pub const FORECAST_LEVEL: FieldKey = key("FCST_CONGEST_LVL", &["fcst_congest_lvl", "fcstCongestLvl"]);
pub const FORECAST_MIN: FieldKey = key("FCST_PPLTN_MIN", &["fcst_ppltn_min", "fcstPpltnMin"]);
pub const FORECAST_MAX: FieldKey = key("FCST_PPLTN_MAX", &["fcst_ppltn_max", "fcstPpltnMax"]);

const AGE_BANDS: [FieldKey; 8] = [
    key("PPLTN_RATE_0", &["ppltn_rate_0", "ppltnRate0"]),
    key("PPLTN_RATE_10", &["ppltn_rate_10", "ppltnRate10"]),
    key("PPLTN_RATE_20", &["ppltn_rate_20", "ppltnRate20"]),
    key("PPLTN_RATE_30", &["ppltn_rate_30", "ppltnRate30"]),
    key("PPLTN_RATE_40", &["ppltn_rate_40", "ppltnRate40"]),
    key("PPLTN_RATE_50", &["ppltn_rate_50", "ppltnRate50"]),
    key("PPLTN_RATE_60", &["ppltn_rate_60", "ppltnRate60"]),
    key("PPLTN_RATE_70", &["ppltn_rate_70", "ppltnRate70"]),
];

/// Keys whose presence marks an object as a current-conditions record
/// rather than an envelope (`RESULT`, `list_total_count`, ...).
const RECORD_MARKERS: [FieldKey; 4] = [AREA_NAME, AREA_CODE, CONGESTION_LEVEL, POPULATION_MIN];

pub fn age_band_key(band: AgeBand) -> FieldKey {
    AGE_BANDS[band as usize]
}

/// First present, non-null value among the key's candidates.
pub fn lookup<'a>(record: &'a Map<String, Value>, key: &FieldKey) -> Option<&'a Value> {
    key.candidates()
        .filter_map(|name| record.get(name))
        .find(|value| !value.is_null())
}

pub fn text(record: &Map<String, Value>, key: &FieldKey) -> Option<String> {
    lookup(record, key).and_then(scalar_text)
}

pub fn count(record: &Map<String, Value>, key: &FieldKey) -> u64 {
    coerce_count(lookup(record, key))
}

pub fn ratio(record: &Map<String, Value>, key: &FieldKey) -> f64 {
    coerce_ratio(lookup(record, key))
}

pub fn is_record(object: &Map<String, Value>) -> bool {
    RECORD_MARKERS.iter().any(|marker| lookup(object, marker).is_some())
}

pub fn is_forecast(object: &Map<String, Value>) -> bool {
    [FORECAST_TIME, FORECAST_LEVEL, FORECAST_MIN, FORECAST_MAX]
        .iter()
        .any(|k| lookup(object, k).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn canonical_key_wins_over_variants() {
        let rec = object(json!({"AREA_NM": "A", "area_nm": "B"}));
        assert_eq!(text(&rec, &AREA_NAME), Some("A".to_string()));
    }

    #[test]
    fn null_canonical_falls_through_to_variant() {
        let rec = object(json!({"AREA_NM": null, "areaNm": "B"}));
        assert_eq!(text(&rec, &AREA_NAME), Some("B".to_string()));
    }

    #[test]
    fn empty_string_counts_as_present() {
        let rec = object(json!({"AREA_PPLTN_MAX": "", "area_ppltn_max": "9"}));
        assert_eq!(count(&rec, &POPULATION_MAX), 0);
    }

    #[test]
    fn age_band_keys_follow_decades() {
        for band in AgeBand::ALL {
            assert_eq!(age_band_key(band).canonical, format!("PPLTN_RATE_{}", band.decade()));
        }
    }

    #[test]
    fn envelopes_are_not_records() {
        assert!(!is_record(&object(json!({"list_total_count": "1", "RESULT": {}}))));
        assert!(is_record(&object(json!({"area_congest_lvl": "여유"}))));
    }
}

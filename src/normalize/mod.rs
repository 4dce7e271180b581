//! Payload normalization: generic tree in, `AreaSnapshot` out.
//!
//! `normalize` is pure and total. It never fails on data shape or data
//! values; the only non-snapshot outcome is `Lookup::NotFound`.

use serde_json::{Map, Value};

use crate::domain::{AgeBand, AreaSnapshot, ForecastEntry, Lookup};

pub mod coerce;
pub mod fields;
pub mod shape;

pub use shape::{Shape, candidate_records};

/// Normalize a parsed payload for `requested_place`.
///
/// Record selection:
/// - the record whose name equals `requested_place` exactly
/// - otherwise the only record, when exactly one was returned
/// - otherwise `NotFound`
pub fn normalize(root: &Value, requested_place: &str) -> Lookup {
    let Some(candidates) = candidate_records(root) else {
        return Lookup::NotFound;
    };

    match select_record(&candidates.records, requested_place) {
        Some(record) => Lookup::Found(extract_snapshot(record, requested_place)),
        None => Lookup::NotFound,
    }
}

fn select_record<'a>(
    records: &[&'a Map<String, Value>],
    requested_place: &str,
) -> Option<&'a Map<String, Value>> {
    let exact = records
        .iter()
        .copied()
        .find(|record| fields::text(record, &fields::AREA_NAME).as_deref() == Some(requested_place));

    match (exact, records) {
        (Some(record), _) => Some(record),
        (None, [only]) => Some(*only),
        (None, _) => None,
    }
}

fn extract_snapshot(record: &Map<String, Value>, requested_place: &str) -> AreaSnapshot {
    // Single-result endpoints may omit the name; the request is the best label left.
    let area_name = fields::text(record, &fields::AREA_NAME)
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| requested_place.to_string());

    let (population_min, population_max) = ordered_range(
        fields::count(record, &fields::POPULATION_MIN),
        fields::count(record, &fields::POPULATION_MAX),
    );

    let age_band_ratios = AgeBand::ALL
        .iter()
        .map(|&band| (band, fields::ratio(record, &fields::age_band_key(band))))
        .collect();

    AreaSnapshot {
        area_name,
        area_code: fields::text(record, &fields::AREA_CODE).filter(|code| !code.is_empty()),
        congestion_level: fields::text(record, &fields::CONGESTION_LEVEL).unwrap_or_default(),
        congestion_message: fields::text(record, &fields::CONGESTION_MESSAGE).unwrap_or_default(),
        population_min,
        population_max,
        male_ratio: fields::ratio(record, &fields::MALE_RATIO),
        female_ratio: fields::ratio(record, &fields::FEMALE_RATIO),
        age_band_ratios,
        observed_at: fields::text(record, &fields::OBSERVED_AT).unwrap_or_default(),
        forecasts: extract_forecasts(record),
    }
}

fn extract_forecasts(record: &Map<String, Value>) -> Vec<ForecastEntry> {
    let Some(raw) = fields::lookup(record, &fields::FORECASTS) else {
        return Vec::new();
    };

    let keys: Vec<&str> = fields::FORECASTS.candidates().collect();
    let entries: Vec<&Map<String, Value>> = match shape::descend(raw, &keys) {
        Value::Array(items) => items.iter().filter_map(Value::as_object).collect(),
        // XML with a single forecast child collapses to an object.
        Value::Object(obj) if fields::is_forecast(obj) => vec![obj],
        _ => Vec::new(),
    };

    entries
        .into_iter()
        .filter(|entry| fields::is_forecast(entry))
        .map(|entry| {
            let (population_min, population_max) = ordered_range(
                fields::count(entry, &fields::FORECAST_MIN),
                fields::count(entry, &fields::FORECAST_MAX),
            );
            ForecastEntry {
                time_label: fields::text(entry, &fields::FORECAST_TIME).unwrap_or_default(),
                congestion_level: fields::text(entry, &fields::FORECAST_LEVEL).filter(|lvl| !lvl.is_empty()),
                population_min,
                population_max,
            }
        })
        .collect()
}

/// Keep `min <= max` when both bounds are known (non-zero).
fn ordered_range(min: u64, max: u64) -> (u64, u64) {
    if min > 0 && max > 0 && min > max {
        (max, min)
    } else {
        (min, max)
    }
}

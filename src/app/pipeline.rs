//! Shared "lookup pipeline" used by every command that hits the endpoint.
//!
//! fetch -> parse -> normalize
//!
//! The result is a plain `LookupRun` value. Callers keep it and pass it to
//! formatters/exporters explicitly; nothing is stashed in global state.

use chrono::{Local, NaiveDateTime};
use serde_json::Value;
use tracing::{debug, info};

use crate::data::CitydataClient;
use crate::domain::{FetchConfig, Lookup};
use crate::error::AppError;
use crate::normalize::{Shape, candidate_records, normalize};

/// Outputs of one lookup.
#[derive(Debug, Clone)]
pub struct LookupRun {
    pub place: String,
    pub lookup: Lookup,
    /// Payload shape that produced records, if any did.
    pub shape: Option<Shape>,
    pub fetched_at: NaiveDateTime,
}

/// Fetch `place` and normalize the response.
pub fn run_lookup(config: &FetchConfig, place: &str) -> Result<LookupRun, AppError> {
    let place = place.trim();
    if place.is_empty() {
        return Err(AppError::usage("Place name must not be empty."));
    }

    let client = CitydataClient::new(config.clone())?;
    let tree = client.fetch_tree(place)?;
    Ok(run_lookup_with_tree(place, &tree, Local::now().naive_local()))
}

/// Normalize an already-parsed payload.
pub fn run_lookup_with_tree(place: &str, tree: &Value, fetched_at: NaiveDateTime) -> LookupRun {
    let shape = candidate_records(tree).map(|c| c.shape);
    debug!(place, ?shape, "payload shape");

    let lookup = normalize(tree, place);
    match &lookup {
        Lookup::Found(snapshot) => info!(
            place,
            area = %snapshot.area_name,
            level = %snapshot.congestion_level,
            forecasts = snapshot.forecasts.len(),
            "snapshot normalized"
        ),
        Lookup::NotFound => info!(place, "no matching record"),
    }

    LookupRun {
        place: place.to_string(),
        lookup,
        shape,
        fetched_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn found_run_records_shape() {
        let tree = json!({"SeoulRtd.citydata_ppltn": [{"AREA_NM": "코엑스", "AREA_CONGEST_LVL": "여유"}]});
        let run = run_lookup_with_tree("코엑스", &tree, at());
        assert_eq!(run.shape, Some(Shape::FixedPath));
        assert_eq!(run.lookup.snapshot().map(|s| s.congestion_level.as_str()), Some("여유"));
        assert_eq!(run.fetched_at, at());
    }

    #[test]
    fn not_found_run_has_no_shape() {
        let tree = json!({"RESULT": {"CODE": "INFO-200"}});
        let run = run_lookup_with_tree("없는장소", &tree, at());
        assert_eq!(run.lookup, Lookup::NotFound);
        assert_eq!(run.shape, None);
    }

    #[test]
    fn empty_place_is_rejected_before_fetching() {
        let config = FetchConfig::with_key("KEY");
        let err = run_lookup(&config, "   ").unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_USAGE);
    }
}

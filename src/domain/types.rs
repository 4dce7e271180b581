//! Shared domain types.
//!
//! `AreaSnapshot` and `ForecastEntry` are plain values: built once by the
//! normalizer, then only read by formatters and exporters. They serialize to
//! JSON for the snapshot export.

use std::collections::BTreeMap;
use std::time::Duration;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Age bands reported by the population feed, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgeBand {
    #[serde(rename = "0s")]
    Under10,
    #[serde(rename = "10s")]
    Teens,
    #[serde(rename = "20s")]
    Twenties,
    #[serde(rename = "30s")]
    Thirties,
    #[serde(rename = "40s")]
    Forties,
    #[serde(rename = "50s")]
    Fifties,
    #[serde(rename = "60s")]
    Sixties,
    #[serde(rename = "70s+")]
    SeventiesPlus,
}

impl AgeBand {
    pub const ALL: [AgeBand; 8] = [
        AgeBand::Under10,
        AgeBand::Teens,
        AgeBand::Twenties,
        AgeBand::Thirties,
        AgeBand::Forties,
        AgeBand::Fifties,
        AgeBand::Sixties,
        AgeBand::SeventiesPlus,
    ];

    /// Korean label used in terminal output (`0대` … `70대 이상`).
    pub fn display_name(self) -> &'static str {
        match self {
            AgeBand::Under10 => "0대",
            AgeBand::Teens => "10대",
            AgeBand::Twenties => "20대",
            AgeBand::Thirties => "30대",
            AgeBand::Forties => "40대",
            AgeBand::Fifties => "50대",
            AgeBand::Sixties => "60대",
            AgeBand::SeventiesPlus => "70대 이상",
        }
    }

    /// Decade number used by the feed's `PPLTN_RATE_{n}` keys.
    pub fn decade(self) -> u8 {
        match self {
            AgeBand::Under10 => 0,
            AgeBand::Teens => 10,
            AgeBand::Twenties => 20,
            AgeBand::Thirties => 30,
            AgeBand::Forties => 40,
            AgeBand::Fifties => 50,
            AgeBand::Sixties => 60,
            AgeBand::SeventiesPlus => 70,
        }
    }
}

/// Normalized current conditions for one monitored place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaSnapshot {
    pub area_name: String,
    pub area_code: Option<String>,
    /// Opaque level label as sent by the feed (e.g. `보통`). Empty when absent.
    pub congestion_level: String,
    pub congestion_message: String,
    pub population_min: u64,
    pub population_max: u64,
    pub male_ratio: f64,
    pub female_ratio: f64,
    /// Always holds every `AgeBand`; missing bands are `0.0`.
    pub age_band_ratios: BTreeMap<AgeBand, f64>,
    /// Observation timestamp exactly as provided by the source.
    pub observed_at: String,
    pub forecasts: Vec<ForecastEntry>,
}

impl AreaSnapshot {
    pub fn age_ratio(&self, band: AgeBand) -> f64 {
        self.age_band_ratios.get(&band).copied().unwrap_or(0.0)
    }

    pub fn has_population(&self) -> bool {
        self.population_min > 0 || self.population_max > 0
    }
}

/// One predicted future time slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub time_label: String,
    pub congestion_level: Option<String>,
    pub population_min: u64,
    pub population_max: u64,
}

/// Outcome of normalizing one payload.
///
/// `NotFound` is an ordinary result: the payload parsed fine but held no
/// record for the requested place.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    Found(AreaSnapshot),
    NotFound,
}

impl Lookup {
    pub fn snapshot(&self) -> Option<&AreaSnapshot> {
        match self {
            Lookup::Found(snapshot) => Some(snapshot),
            Lookup::NotFound => None,
        }
    }
}

/// Response body format requested from the endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PayloadFormat {
    Xml,
    Json,
}

impl PayloadFormat {
    /// Path segment used in the request URL.
    pub fn as_path(self) -> &'static str {
        match self {
            PayloadFormat::Xml => "xml",
            PayloadFormat::Json => "json",
        }
    }
}

/// Resolved settings for one fetch against the city-data endpoint.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub base_url: String,
    pub api_key: String,
    pub service: String,
    pub format: PayloadFormat,
    pub start_index: u32,
    pub end_index: u32,
    pub timeout: Duration,
}

pub const DEFAULT_BASE_URL: &str = "http://openapi.seoul.go.kr:8088";
pub const DEFAULT_SERVICE: &str = "citydata_ppltn";
pub const DEFAULT_START_INDEX: u32 = 1;
pub const DEFAULT_END_INDEX: u32 = 5;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

impl FetchConfig {
    pub fn with_key(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            service: DEFAULT_SERVICE.to_string(),
            format: PayloadFormat::Xml,
            start_index: DEFAULT_START_INDEX,
            end_index: DEFAULT_END_INDEX,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

//! Seoul real-time city data (`citydata_ppltn`) endpoint client.
//!
//! Request URL layout:
//!
//! `{base}/{api_key}/{xml|json}/{service}/{start}/{end}/{place}`
//!
//! The place name is percent-encoded as a single path segment.

use std::time::Duration;

use reqwest::Url;
use reqwest::blocking::Client;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::data::tree::parse_payload;
use crate::domain::{DEFAULT_TIMEOUT_SECS, FetchConfig};
use crate::error::AppError;

pub const ENV_API_KEY: &str = "SEOUL_API_KEY";
pub const ENV_BASE_URL: &str = "SEOUL_API_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "SEOUL_API_TIMEOUT_SECS";

/// Load `.env` and resolve the fetch settings from the process environment.
pub fn config_from_env() -> Result<FetchConfig, AppError> {
    dotenvy::dotenv().ok();
    config_from_vars(|name| std::env::var(name).ok())
}

/// Resolve fetch settings from any variable source.
pub fn config_from_vars(get: impl Fn(&str) -> Option<String>) -> Result<FetchConfig, AppError> {
    let api_key = get(ENV_API_KEY)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::usage(format!("Missing {ENV_API_KEY} in environment (.env).")))?;

    let mut config = FetchConfig::with_key(api_key);

    if let Some(base) = get(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
        config.base_url = base.trim().trim_end_matches('/').to_string();
    }

    if let Some(raw) = get(ENV_TIMEOUT_SECS) {
        let secs = raw.trim().parse::<u64>().map_err(|_| {
            AppError::usage(format!(
                "{ENV_TIMEOUT_SECS} must be a whole number of seconds, got '{raw}'."
            ))
        })?;
        config.timeout = Duration::from_secs(if secs == 0 { DEFAULT_TIMEOUT_SECS } else { secs });
    }

    Ok(config)
}

/// Build the request URL for one place.
pub fn request_url(config: &FetchConfig, place: &str) -> Result<Url, AppError> {
    if config.start_index == 0 || config.end_index < config.start_index {
        return Err(AppError::usage(format!(
            "Invalid index range {}..{} (start must be >= 1 and <= end).",
            config.start_index, config.end_index
        )));
    }

    let mut url = Url::parse(&config.base_url)
        .map_err(|e| AppError::usage(format!("Invalid base URL '{}': {e}", config.base_url)))?;

    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| AppError::usage(format!("Base URL '{}' cannot take a path.", config.base_url)))?;
        segments
            .pop_if_empty()
            .push(&config.api_key)
            .push(config.format.as_path())
            .push(&config.service)
            .push(&config.start_index.to_string())
            .push(&config.end_index.to_string())
            .push(place);
    }

    Ok(url)
}

pub struct CitydataClient {
    client: Client,
    config: FetchConfig,
}

impl CitydataClient {
    pub fn new(config: FetchConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::upstream(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    /// Fetch the raw response body for `place`.
    pub fn fetch_raw(&self, place: &str) -> Result<Vec<u8>, AppError> {
        let url = request_url(&self.config, place)?;
        info!(place, format = self.config.format.as_path(), "requesting city data");

        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| AppError::upstream(format!("City data request failed: {}", e.without_url())))?;

        let status = resp.status();
        if !status.is_success() {
            warn!(place, %status, "city data request rejected");
            return Err(AppError::upstream(format!(
                "City data request failed with status {status}."
            )));
        }

        let body = resp
            .bytes()
            .map_err(|e| AppError::upstream(format!("Failed to read city data response: {}", e.without_url())))?;
        debug!(place, bytes = body.len(), "city data response received");

        Ok(body.to_vec())
    }

    /// Fetch and parse the response for `place` into a generic tree.
    pub fn fetch_tree(&self, place: &str) -> Result<Value, AppError> {
        let body = self.fetch_raw(place)?;
        parse_payload(&body, self.config.format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use crate::domain::PayloadFormat;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn url_encodes_place_as_one_segment() {
        let config = FetchConfig::with_key("KEY");
        let url = request_url(&config, "광화문·덕수궁").unwrap();
        assert_eq!(
            url.as_str(),
            "http://openapi.seoul.go.kr:8088/KEY/xml/citydata_ppltn/1/5/\
             %EA%B4%91%ED%99%94%EB%AC%B8%C2%B7%EB%8D%95%EC%88%98%EA%B6%81"
        );
    }

    #[test]
    fn url_escapes_slashes_and_spaces_in_place() {
        let mut config = FetchConfig::with_key("KEY");
        config.format = PayloadFormat::Json;
        let url = request_url(&config, "a/b c").unwrap();
        assert!(url.as_str().ends_with("/KEY/json/citydata_ppltn/1/5/a%2Fb%20c"));
    }

    #[test]
    fn url_rejects_bad_range() {
        let mut config = FetchConfig::with_key("KEY");
        config.start_index = 6;
        let err = request_url(&config, "여의도").unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_USAGE);
    }

    #[test]
    fn config_requires_api_key() {
        let err = config_from_vars(vars(&[])).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_USAGE);
        assert!(config_from_vars(vars(&[(ENV_API_KEY, "  ")])).is_err());
    }

    #[test]
    fn config_reads_overrides() {
        let config = config_from_vars(vars(&[
            (ENV_API_KEY, "abc"),
            (ENV_BASE_URL, "http://localhost:9000/"),
            (ENV_TIMEOUT_SECS, "3"),
        ]))
        .unwrap();
        assert_eq!(config.api_key, "abc");
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.timeout, Duration::from_secs(3));

        let err = config_from_vars(vars(&[(ENV_API_KEY, "abc"), (ENV_TIMEOUT_SECS, "soon")])).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_USAGE);
    }
}

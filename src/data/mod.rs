//! Upstream data access.
//!
//! - `citydata`: HTTP client for the city-population endpoint
//! - `tree`: response bytes (XML or JSON) to a generic `serde_json::Value`

pub mod citydata;
pub mod tree;

pub use citydata::{CitydataClient, config_from_env, request_url};
pub use tree::parse_payload;

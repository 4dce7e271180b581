//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the normalized records (`AreaSnapshot`, `ForecastEntry`, `AgeBand`)
//! - the lookup outcome (`Lookup`)
//! - fetch settings (`FetchConfig`, `PayloadFormat`)
//! - the hard-coded district/place catalog (`places`)

pub mod places;
pub mod types;

pub use types::*;

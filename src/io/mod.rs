//! Input/output helpers.
//!
//! - snapshot exports (raw TXT, forecast CSV, snapshot JSON) (`export`)

pub mod export;

pub use export::*;

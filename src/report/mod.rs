//! Presentation helpers: text summaries and the severity table.
//!
//! Nothing here feeds back into normalization; these functions only read
//! `AreaSnapshot` values.

pub mod format;
pub mod severity;

pub use format::*;
pub use severity::{SEVERITY_TABLE_VERSION, severity};

//! `citydata-ppltn` library crate.
//!
//! The binary (`ppltn`) is a thin wrapper around this library so that:
//!
//! - normalization is testable without network access or spawning processes
//! - the normalizer can be reused by other front-ends (dashboards, services)
//!
//! The core entry point is [`normalize::normalize`]: a pure function from a
//! parsed payload tree to a [`domain::Lookup`].

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod normalize;
pub mod report;

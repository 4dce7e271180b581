//! Command-line parsing for the city population lookup.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from fetching and normalization.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{DEFAULT_END_INDEX, DEFAULT_START_INDEX, PayloadFormat};

pub mod picker;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "ppltn", version, about = "Seoul real-time city population lookup")]
pub struct Cli {
    /// Log debug details (request, matched payload shape) to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the known districts and places.
    Places(PlacesArgs),
    /// Fetch one place and print a summary.
    ///
    /// Without a PLACE, an interactive district/place picker is shown.
    Show(ShowArgs),
    /// Fetch one place and write TXT / CSV / JSON files.
    Export(ExportArgs),
}

#[derive(Debug, Args, Clone)]
pub struct PlacesArgs {
    /// Only list places in this district.
    #[arg(short, long)]
    pub district: Option<String>,
}

/// Request options shared by commands that hit the endpoint.
#[derive(Debug, Args, Clone)]
pub struct FetchArgs {
    /// Response format to request.
    #[arg(long, value_enum, default_value_t = PayloadFormat::Xml)]
    pub format: PayloadFormat,

    /// First row index of the request range.
    #[arg(long, default_value_t = DEFAULT_START_INDEX)]
    pub start: u32,

    /// Last row index of the request range.
    #[arg(long, default_value_t = DEFAULT_END_INDEX)]
    pub end: u32,
}

#[derive(Debug, Args, Clone)]
pub struct ShowArgs {
    /// Place name as listed by `ppltn places`.
    pub place: Option<String>,

    #[command(flatten)]
    pub fetch: FetchArgs,

    /// Print the plain-text dump instead of the summary.
    #[arg(long)]
    pub raw: bool,
}

#[derive(Debug, Args, Clone)]
pub struct ExportArgs {
    /// Place name as listed by `ppltn places`.
    pub place: String,

    #[command(flatten)]
    pub fetch: FetchArgs,

    /// Write the plain-text dump.
    #[arg(long, value_name = "PATH")]
    pub txt: Option<PathBuf>,

    /// Write the forecast table as CSV.
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,

    /// Write the full snapshot as JSON.
    #[arg(long, value_name = "PATH")]
    pub json: Option<PathBuf>,
}

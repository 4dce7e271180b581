//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - sets up logging
//! - resolves fetch settings from `.env` / environment / flags
//! - runs the lookup pipeline
//! - prints summaries and writes optional exports

use clap::Parser;

use crate::cli::{Command, ExportArgs, FetchArgs, PlacesArgs, ShowArgs};
use crate::domain::places::{self, District};
use crate::domain::{FetchConfig, Lookup};
use crate::error::{AppError, EXIT_NOT_FOUND};

pub mod pipeline;

const SUBCOMMANDS: [&str; 3] = ["places", "show", "export"];

/// Entry point for the `ppltn` binary.
pub fn run() -> Result<(), AppError> {
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);
    crate::logging::init_logging(cli.verbose);

    match cli.command {
        Command::Places(args) => handle_places(args),
        Command::Show(args) => handle_show(args),
        Command::Export(args) => handle_export(args),
    }
}

fn handle_places(args: PlacesArgs) -> Result<(), AppError> {
    let selected = select_districts(args.district.as_deref())?;
    print!("{}", crate::report::format_places(&selected));
    Ok(())
}

/// All districts, or only the named one.
fn select_districts(filter: Option<&str>) -> Result<Vec<&'static District>, AppError> {
    let Some(name) = filter else {
        return Ok(places::districts());
    };
    let district = places::districts()
        .into_iter()
        .find(|d| d.name == name.trim())
        .ok_or_else(|| AppError::usage(format!("Unknown district: {name}")))?;
    Ok(vec![district])
}

fn handle_show(args: ShowArgs) -> Result<(), AppError> {
    let place = match &args.place {
        Some(place) => place.clone(),
        None => crate::cli::picker::prompt_for_place()?,
    };

    let config = fetch_config_from_args(&args.fetch)?;
    let run = pipeline::run_lookup(&config, &place)?;
    let snapshot = found_or_exit(&run)?;

    if args.raw {
        print!("{}", crate::report::format_raw_text(snapshot, run.fetched_at));
    } else {
        print!("{}", crate::report::format_summary(snapshot));
    }
    Ok(())
}

fn handle_export(args: ExportArgs) -> Result<(), AppError> {
    if args.txt.is_none() && args.csv.is_none() && args.json.is_none() {
        return Err(AppError::usage(
            "Nothing to export. Pass at least one of --txt, --csv, --json.",
        ));
    }

    let config = fetch_config_from_args(&args.fetch)?;
    let run = pipeline::run_lookup(&config, &args.place)?;
    let snapshot = found_or_exit(&run)?;

    if let Some(path) = &args.txt {
        crate::io::export::write_raw_text(path, snapshot, run.fetched_at)?;
        tracing::info!(path = %path.display(), "wrote text export");
    }
    if let Some(path) = &args.csv {
        crate::io::export::write_forecasts_csv(path, &snapshot.forecasts)?;
        tracing::info!(path = %path.display(), rows = snapshot.forecasts.len(), "wrote forecast CSV");
    }
    if let Some(path) = &args.json {
        crate::io::export::write_snapshot_json(path, snapshot, run.fetched_at)?;
        tracing::info!(path = %path.display(), "wrote snapshot JSON");
    }

    Ok(())
}

/// Turn `NotFound` into the dedicated exit code with an inline notice.
fn found_or_exit(run: &pipeline::LookupRun) -> Result<&crate::domain::AreaSnapshot, AppError> {
    match &run.lookup {
        Lookup::Found(snapshot) => Ok(snapshot),
        Lookup::NotFound => Err(AppError::new(
            EXIT_NOT_FOUND,
            crate::report::format_not_found(&run.place).trim_end(),
        )),
    }
}

pub fn fetch_config_from_args(args: &FetchArgs) -> Result<FetchConfig, AppError> {
    let mut config = crate::data::config_from_env()?;
    config.format = args.format;
    config.start_index = args.start;
    config.end_index = args.end;
    Ok(config)
}

/// Rewrite argv so `ppltn` defaults to `ppltn show`.
///
/// Rules (leading `-v`/`--verbose` is skipped when looking for the first token):
/// - `ppltn`                      -> `ppltn show`
/// - `ppltn 여의도`                -> `ppltn show 여의도`
/// - `ppltn --format json 여의도`  -> `ppltn show --format json 여의도`
/// - `ppltn --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let first = argv
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, arg)| !matches!(arg.as_str(), "-v" | "--verbose"))
        .map(|(idx, arg)| (idx, arg.clone()));

    let Some((idx, arg)) = first else {
        argv.push("show".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version || SUBCOMMANDS.contains(&arg.as_str()) {
        return argv;
    }

    argv.insert(idx, "show".to_string());
    argv
}

//! Interactive district/place picker.
//!
//! This is kept separate from clap parsing:
//! - clap handles structured flags/subcommands
//! - the picker provides the "run `ppltn show` and choose a place" UX
//!
//! Choices come from the hard-coded catalog in `domain::places`.

use std::io::{self, BufRead, Write};

use crate::domain::places;
use crate::error::AppError;

/// Prompt on stdin/stdout for a district, then a place inside it.
pub fn prompt_for_place() -> Result<String, AppError> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    pick_place(&mut input, &mut output)
}

/// Picker over arbitrary streams.
///
/// Behavior:
/// - list the options with 1-based numbers
/// - accept either a number or the exact name
/// - `q` cancels
pub fn pick_place<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<String, AppError> {
    let district_names: Vec<&str> = places::districts().iter().map(|d| d.name).collect();
    let district = choose("district", &district_names, input, output)?;

    let place_names = places::places_in(district)
        .ok_or_else(|| AppError::usage(format!("Unknown district: {district}")))?;
    let place = choose("place", &place_names, input, output)?;

    Ok(place.to_string())
}

fn choose<'a, R: BufRead, W: Write>(
    label: &str,
    options: &[&'a str],
    input: &mut R,
    output: &mut W,
) -> Result<&'a str, AppError> {
    let write_err = |e: io::Error| AppError::usage(format!("Failed to write prompt: {e}"));

    for (idx, option) in options.iter().enumerate() {
        writeln!(output, "{:>3}) {option}", idx + 1).map_err(write_err)?;
    }

    loop {
        write!(output, "Select a {label} by number (1-{}) or name (q to quit): ", options.len())
            .map_err(write_err)?;
        output.flush().map_err(write_err)?;

        let mut line = String::new();
        let bytes = input
            .read_line(&mut line)
            .map_err(|e| AppError::usage(format!("Failed to read input: {e}")))?;

        if bytes == 0 {
            return Err(AppError::usage(
                "No input received. Pass the place directly: `ppltn show <PLACE>`.",
            ));
        }

        let line = line.trim();
        if line.eq_ignore_ascii_case("q") {
            return Err(AppError::usage("Canceled."));
        }

        if let Ok(choice) = line.parse::<usize>() {
            if (1..=options.len()).contains(&choice) {
                return Ok(options[choice - 1]);
            }
            writeln!(output, "Invalid choice: {choice}. Enter a number between 1 and {}.", options.len())
                .map_err(write_err)?;
            continue;
        }

        if let Some(&found) = options.iter().find(|o| **o == line) {
            return Ok(found);
        }
        writeln!(output, "Unknown {label}: {line}").map_err(write_err)?;
    }
}

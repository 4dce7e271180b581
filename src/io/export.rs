//! File exports for a snapshot.
//!
//! - raw TXT: the headline values as plain text
//! - forecast CSV: one row per forecast entry, in feed order
//! - snapshot JSON: the whole snapshot plus its severity score

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::{AreaSnapshot, ForecastEntry};
use crate::error::AppError;
use crate::report::{SEVERITY_TABLE_VERSION, format_raw_text, severity};

/// On-disk JSON layout for an exported snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotFile {
    pub tool: String,
    pub generated_at: NaiveDateTime,
    pub severity_table_version: u32,
    pub severity: u8,
    pub snapshot: AreaSnapshot,
}

pub fn write_raw_text(path: &Path, snapshot: &AreaSnapshot, generated_at: NaiveDateTime) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::usage(format!("Failed to create text export '{}': {e}", path.display())))?;
    file.write_all(format_raw_text(snapshot, generated_at).as_bytes())
        .map_err(|e| AppError::usage(format!("Failed to write text export: {e}")))?;
    Ok(())
}

pub fn write_forecasts_csv(path: &Path, forecasts: &[ForecastEntry]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::usage(format!("Failed to create forecast CSV '{}': {e}", path.display())))?;

    writer
        .write_record(["time", "congestion_level", "population_min", "population_max"])
        .map_err(|e| AppError::usage(format!("Failed to write forecast CSV header: {e}")))?;

    for f in forecasts {
        let min = f.population_min.to_string();
        let max = f.population_max.to_string();
        writer
            .write_record([
                f.time_label.as_str(),
                f.congestion_level.as_deref().unwrap_or(""),
                min.as_str(),
                max.as_str(),
            ])
            .map_err(|e| AppError::usage(format!("Failed to write forecast CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::usage(format!("Failed to flush forecast CSV: {e}")))?;
    Ok(())
}

pub fn write_snapshot_json(path: &Path, snapshot: &AreaSnapshot, generated_at: NaiveDateTime) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::usage(format!("Failed to create snapshot JSON '{}': {e}", path.display())))?;

    let out = SnapshotFile {
        tool: "ppltn".to_string(),
        generated_at,
        severity_table_version: SEVERITY_TABLE_VERSION,
        severity: severity(&snapshot.congestion_level),
        snapshot: snapshot.clone(),
    };

    serde_json::to_writer_pretty(file, &out)
        .map_err(|e| AppError::usage(format!("Failed to write snapshot JSON: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use chrono::NaiveDate;

    use crate::domain::AgeBand;

    fn snapshot() -> AreaSnapshot {
        AreaSnapshot {
            area_name: "잠실 관광특구".to_string(),
            area_code: None,
            congestion_level: "붐빔".to_string(),
            congestion_message: String::new(),
            population_min: 30000,
            population_max: 32000,
            male_ratio: 47.5,
            female_ratio: 52.5,
            age_band_ratios: AgeBand::ALL.iter().map(|b| (*b, 12.5)).collect::<BTreeMap<_, _>>(),
            observed_at: "2025-01-01 14:00".to_string(),
            forecasts: vec![
                ForecastEntry {
                    time_label: "2025-01-01 15:00".to_string(),
                    congestion_level: Some("붐빔, 매우".to_string()),
                    population_min: 31000,
                    population_max: 33000,
                },
                ForecastEntry {
                    time_label: "2025-01-01 16:00".to_string(),
                    congestion_level: None,
                    population_min: 0,
                    population_max: 0,
                },
            ],
        }
    }

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(14, 5, 0)
            .unwrap()
    }

    #[test]
    fn forecast_csv_quotes_and_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fcst.csv");
        write_forecasts_csv(&path, &snapshot().forecasts).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let expected = concat!(
            "time,congestion_level,population_min,population_max\n",
            "2025-01-01 15:00,\"붐빔, 매우\",31000,33000\n",
            "2025-01-01 16:00,,0,0\n",
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn snapshot_json_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snap.json");
        write_snapshot_json(&path, &snapshot(), at()).unwrap();

        let back: SnapshotFile = serde_json::from_reader(File::open(&path).unwrap()).unwrap();
        assert_eq!(back.snapshot, snapshot());
        assert_eq!(back.severity, 6);
        assert_eq!(back.severity_table_version, SEVERITY_TABLE_VERSION);

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"70s+\": 12.5"));
    }

    #[test]
    fn raw_text_file_matches_formatter() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("raw.txt");
        write_raw_text(&path, &snapshot(), at()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, format_raw_text(&snapshot(), at()));
    }

    #[test]
    fn missing_directory_is_usage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("out.csv");
        let err = write_forecasts_csv(&path, &[]).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_USAGE);
    }
}

//! Text formatting for snapshots.
//!
//! All functions return `String` so callers decide where output goes
//! (stdout, a file, a test assertion).

use chrono::{NaiveDateTime, Timelike};

use crate::domain::places::{self, District};
use crate::domain::{AgeBand, AreaSnapshot, ForecastEntry};
use crate::report::severity::{SEVERITY_MAX, severity};

/// Shown in place of an empty congestion label.
pub const UNKNOWN_LEVEL: &str = "정보없음";

/// Full terminal summary for one snapshot.
pub fn format_summary(snapshot: &AreaSnapshot) -> String {
    let mut out = String::new();

    match &snapshot.area_code {
        Some(code) => out.push_str(&format!("=== {} ({code}) ===\n", snapshot.area_name)),
        None => out.push_str(&format!("=== {} ===\n", snapshot.area_name)),
    }
    if let Some(district) = places::find_district(&snapshot.area_name) {
        out.push_str(&format!("District: {}\n", district.name));
    }
    let (lat, lon) = places::coordinates(&snapshot.area_name);
    out.push_str(&format!("Location: {lat:.4}, {lon:.4}\n"));
    if !snapshot.observed_at.is_empty() {
        out.push_str(&format!("Observed: {}\n", snapshot.observed_at));
    }

    let level = level_label(&snapshot.congestion_level);
    out.push_str(&format!(
        "Congestion: {level} (severity {}/{SEVERITY_MAX})\n",
        severity(&snapshot.congestion_level)
    ));
    if !snapshot.congestion_message.is_empty() {
        out.push_str(&format!("Message: {}\n", snapshot.congestion_message));
    }

    if snapshot.has_population() {
        out.push_str(&format!(
            "Population: {} ~ {}\n",
            fmt_thousands(snapshot.population_min),
            fmt_thousands(snapshot.population_max)
        ));
    } else {
        out.push_str("Population: unknown\n");
    }
    out.push_str(&format!(
        "Gender: male {}% | female {}%\n",
        fmt_ratio(snapshot.male_ratio),
        fmt_ratio(snapshot.female_ratio)
    ));

    out.push_str("\nAge bands:\n");
    for band in AgeBand::ALL {
        out.push_str(&format!(
            "  {:<10} {:>6}%\n",
            band.display_name(),
            fmt_ratio(snapshot.age_ratio(band))
        ));
    }

    out.push('\n');
    out.push_str(&format_forecasts(&snapshot.forecasts));

    out
}

/// Forecast table, or a one-line note when the feed sent none.
pub fn format_forecasts(forecasts: &[ForecastEntry]) -> String {
    if forecasts.is_empty() {
        return "Forecast: none (current data only)\n".to_string();
    }

    let mut out = String::new();
    out.push_str("Forecast:\n");
    out.push_str(&format!("  {:<18} {:<10} {:>10} {:>10}\n", "time", "level", "min", "max"));
    for f in forecasts {
        let level = f.congestion_level.as_deref().unwrap_or("-");
        out.push_str(&format!(
            "  {:<18} {:<10} {:>10} {:>10}\n",
            f.time_label,
            level,
            fmt_thousands(f.population_min),
            fmt_thousands(f.population_max)
        ));
    }
    out
}

/// Plain-text dump of the headline values, as offered for download.
pub fn format_raw_text(snapshot: &AreaSnapshot, generated_at: NaiveDateTime) -> String {
    format!(
        "[{}] {}\n혼잡도: {}\n인구: {} ~ {}\n남성:{}%, 여성:{}%\n메시지:{}\n",
        iso_timestamp(generated_at),
        snapshot.area_name,
        level_label(&snapshot.congestion_level),
        snapshot.population_min,
        snapshot.population_max,
        fmt_ratio(snapshot.male_ratio),
        fmt_ratio(snapshot.female_ratio),
        snapshot.congestion_message,
    )
}

/// ISO-8601 local time; microseconds only when non-zero.
fn iso_timestamp(at: NaiveDateTime) -> String {
    if at.nanosecond() / 1_000 == 0 {
        at.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        at.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}

/// Inline notice for a place with no matching record.
pub fn format_not_found(place: &str) -> String {
    format!("No data found for '{place}'. The feed returned no matching record.\n")
}

/// District/place listing.
pub fn format_places(districts: &[&District]) -> String {
    let mut out = String::new();
    for district in districts {
        out.push_str(&format!("{}\n", district.name));
        let places = places::places_in(district.name).unwrap_or_default();
        for place in places {
            out.push_str(&format!("  - {place}\n"));
        }
    }
    out
}

pub fn level_label(level: &str) -> &str {
    if level.trim().is_empty() {
        UNKNOWN_LEVEL
    } else {
        level
    }
}

/// `12000` -> `12,000`.
pub fn fmt_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Ratios keep one decimal for whole numbers (`0.0`, `50.0`) and full precision otherwise.
pub fn fmt_ratio(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.1}")
    } else {
        format!("{v}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use chrono::NaiveDate;

    fn snapshot() -> AreaSnapshot {
        let mut age_band_ratios: BTreeMap<AgeBand, f64> = AgeBand::ALL.iter().map(|b| (*b, 0.0)).collect();
        age_band_ratios.insert(AgeBand::Twenties, 24.1);
        AreaSnapshot {
            area_name: "광화문·덕수궁".to_string(),
            area_code: Some("POI009".to_string()),
            congestion_level: "보통".to_string(),
            congestion_message: "크게 붐비지는 않아요.".to_string(),
            population_min: 12000,
            population_max: 14000,
            male_ratio: 51.2,
            female_ratio: 48.8,
            age_band_ratios,
            observed_at: "2025-01-01 13:50".to_string(),
            forecasts: vec![ForecastEntry {
                time_label: "2025-01-01 14:00".to_string(),
                congestion_level: None,
                population_min: 1000,
                population_max: 2500,
            }],
        }
    }

    #[test]
    fn thousands_separator() {
        assert_eq!(fmt_thousands(0), "0");
        assert_eq!(fmt_thousands(999), "999");
        assert_eq!(fmt_thousands(1000), "1,000");
        assert_eq!(fmt_thousands(1234567), "1,234,567");
    }

    #[test]
    fn ratio_formatting() {
        assert_eq!(fmt_ratio(0.0), "0.0");
        assert_eq!(fmt_ratio(51.2), "51.2");
        assert_eq!(fmt_ratio(50.0), "50.0");
    }

    #[test]
    fn raw_text_layout() {
        let at = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(13, 55, 2)
            .unwrap();
        let txt = format_raw_text(&snapshot(), at);
        let expected = concat!(
            "[2025-01-01T13:55:02] 광화문·덕수궁\n",
            "혼잡도: 보통\n",
            "인구: 12000 ~ 14000\n",
            "남성:51.2%, 여성:48.8%\n",
            "메시지:크게 붐비지는 않아요.\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn raw_text_timestamp_keeps_microseconds() {
        let at = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_micro_opt(13, 55, 2, 123456)
            .unwrap();
        let txt = format_raw_text(&snapshot(), at);
        assert!(txt.starts_with("[2025-01-01T13:55:02.123456] 광화문·덕수궁\n"));

        let at = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_nano_opt(13, 55, 2, 7_000)
            .unwrap();
        assert!(format_raw_text(&snapshot(), at).starts_with("[2025-01-01T13:55:02.000007]"));
    }

    #[test]
    fn places_listing_for_one_district() {
        let jongno = places::districts()
            .into_iter()
            .find(|d| d.name == "종로구")
            .unwrap();
        let expected = concat!(
            "종로구\n",
            "  - 경복궁\n",
            "  - 광화문·덕수궁\n",
            "  - 보신각\n",
            "  - 인사동\n",
            "  - 창덕궁·종묘\n",
            "  - 청계천\n",
        );
        assert_eq!(format_places(&[jongno]), expected);
    }

    #[test]
    fn places_listing_for_all_districts() {
        let all = places::districts();
        let txt = format_places(&all);

        let headers: Vec<&str> = txt.lines().filter(|l| !l.starts_with("  - ")).collect();
        let names: Vec<&str> = all.iter().map(|d| d.name).collect();
        assert_eq!(headers, names);

        let place_count: usize = all.iter().map(|d| d.places.len()).sum();
        assert_eq!(txt.lines().count(), all.len() + place_count);
        assert!(txt.contains("영등포구\n"));
        assert!(txt.contains("  - 63빌딩\n"));
    }

    #[test]
    fn summary_mentions_key_fields() {
        let txt = format_summary(&snapshot());
        assert!(txt.starts_with("=== 광화문·덕수궁 (POI009) ===\n"));
        assert!(txt.contains("District: 종로구\n"));
        assert!(txt.contains("Congestion: 보통 (severity 3/7)\n"));
        assert!(txt.contains("Population: 12,000 ~ 14,000\n"));
        assert!(txt.contains("24.1%"));
        assert!(txt.contains("2,500"));
    }

    #[test]
    fn empty_level_shows_placeholder() {
        let mut snap = snapshot();
        snap.congestion_level.clear();
        snap.forecasts.clear();
        let txt = format_summary(&snap);
        assert!(txt.contains("Congestion: 정보없음"));
        assert!(txt.contains("Forecast: none"));

        snap.population_min = 0;
        snap.population_max = 0;
        assert!(format_summary(&snap).contains("Population: unknown\n"));
    }
}

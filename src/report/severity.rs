//! Congestion label to severity score (1..=7).
//!
//! This is display policy, not data: the normalizer keeps the level label
//! opaque. The label table is versioned so a change in scoring is visible in
//! exports that record `SEVERITY_TABLE_VERSION`.

pub const SEVERITY_TABLE_VERSION: u32 = 1;
pub const SEVERITY_MIN: u8 = 1;
pub const SEVERITY_MAX: u8 = 7;
/// Score for labels that are neither in the table nor numeric.
pub const DEFAULT_SEVERITY: u8 = 3;

const TABLE_V1: &[(&str, u8)] = &[
    ("여유", 1),
    ("매우여유", 1),
    ("거의여유", 1),
    ("보통", 3),
    ("약간 붐빔", 4),
    ("붐빔", 6),
    ("매우붐빔", 7),
];

/// Score a level label. Numeric labels are clamped into range.
pub fn severity(label: &str) -> u8 {
    let label = label.trim();
    TABLE_V1
        .iter()
        .find(|(known, _)| *known == label)
        .map(|(_, score)| *score)
        .or_else(|| {
            label
                .parse::<i64>()
                .ok()
                .map(|n| n.clamp(SEVERITY_MIN as i64, SEVERITY_MAX as i64) as u8)
        })
        .unwrap_or(DEFAULT_SEVERITY)
}

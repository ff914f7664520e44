//! User preferences: which weekdays, time windows and clubs the user plays at.
//!
//! Preferences are persisted as one JSON blob (see [`store`]) and applied to
//! aggregated slots by [`filter`]. Older blobs stored each weekday as
//! `{start, end}` or `null`; [`UserPreferences::from_value`] migrates them.

pub mod changes;
pub mod filter;
pub mod store;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::debug;

use crate::data_fetcher::processors::time_to_minutes;
use crate::error::AppError;

pub use changes::PreferenceChanges;
pub use filter::{DurationFilter, FilterCriteria, SkipReason, apply, skip_reason, slot_passes};
pub use store::PreferencesStore;

/// Number of weekdays, indexed 0 (Sunday) through 6 (Saturday).
pub const WEEKDAYS: u8 = 7;

/// A local Bali time window, `HH:MM` to `HH:MM`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: String,
    pub end: String,
}

impl TimeRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Start and end in minutes since midnight, if both parse and start < end.
    pub fn minutes(&self) -> Option<(u32, u32)> {
        let start = time_to_minutes(&self.start)?;
        let end = time_to_minutes(&self.end)?;
        (start < end).then_some((start, end))
    }

    /// Length of the window in minutes, zero when malformed.
    pub fn length_minutes(&self) -> u32 {
        self.minutes().map_or(0, |(start, end)| end - start)
    }

    /// True if `[start, start + duration]` lies inside this window.
    pub fn contains(&self, start_minutes: u32, duration_minutes: u32) -> bool {
        match self.minutes() {
            Some((start, end)) => start_minutes >= start && start_minutes + duration_minutes <= end,
            None => false,
        }
    }
}

impl FromStr for TimeRange {
    type Err = AppError;

    /// Parses `HH:MM-HH:MM`, zero-padding both ends.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            AppError::invalid_parameter(format!(
                "Invalid time range '{s}', expected HH:MM-HH:MM with start before end"
            ))
        };
        let (start, end) = s.split_once('-').ok_or_else(invalid)?;
        let start = time_to_minutes(start.trim()).ok_or_else(invalid)?;
        let end = time_to_minutes(end.trim()).ok_or_else(invalid)?;
        if start >= end {
            return Err(invalid());
        }
        Ok(Self::new(format_minutes(start), format_minutes(end)))
    }
}

fn format_minutes(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Parses a weekday as `0`-`6` (Sunday first) or an English day name.
pub fn parse_weekday(value: &str) -> Result<u8, AppError> {
    const NAMES: [&str; WEEKDAYS as usize] = [
        "sunday",
        "monday",
        "tuesday",
        "wednesday",
        "thursday",
        "friday",
        "saturday",
    ];

    let value = value.trim().to_ascii_lowercase();
    if let Ok(index) = value.parse::<u8>() {
        if index < WEEKDAYS {
            return Ok(index);
        }
    } else if value.len() >= 3 {
        if let Some(index) = NAMES.iter().position(|name| name.starts_with(&value)) {
            // position is always below WEEKDAYS
            return Ok(index as u8);
        }
    }

    Err(AppError::invalid_parameter(format!(
        "Invalid weekday '{value}', expected 0-6 or a day name such as mon"
    )))
}

/// Per-weekday setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAvailability {
    pub enabled: bool,
    /// Empty means any time of day.
    #[serde(default)]
    pub ranges: Vec<TimeRange>,
}

impl Default for DayAvailability {
    fn default() -> Self {
        Self {
            enabled: true,
            ranges: Vec::new(),
        }
    }
}

impl DayAvailability {
    /// Reads one stored weekday, accepting the legacy shapes.
    ///
    /// - `{enabled, ranges}` is taken as is
    /// - `{start, end}` becomes an enabled day with that single window
    /// - anything else, `null` included, becomes an enabled day without windows
    pub fn from_value(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::default();
        };

        if let (Some(enabled), Some(ranges)) = (object.get("enabled"), object.get("ranges")) {
            let ranges = ranges
                .as_array()
                .map(|items| {
                    items
                        .iter()
                        .filter_map(|item| serde_json::from_value::<TimeRange>(item.clone()).ok())
                        .collect()
                })
                .unwrap_or_default();
            return Self {
                enabled: is_truthy(enabled),
                ranges: normalize_ranges(ranges),
            };
        }

        if let (Some(start), Some(end)) = (object.get("start"), object.get("end")) {
            debug!("Migrating legacy day window {start}-{end}");
            return Self {
                enabled: true,
                ranges: vec![TimeRange::new(value_to_string(start), value_to_string(end))],
            };
        }

        Self::default()
    }
}

/// The whole preferences blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Weekday (0 = Sunday) to setting. Always holds all seven days.
    pub availability: BTreeMap<u8, DayAvailability>,
    /// Club names to show; empty means every club.
    pub clubs: Vec<String>,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            availability: (0..WEEKDAYS)
                .map(|day| (day, DayAvailability::default()))
                .collect(),
            clubs: Vec::new(),
        }
    }
}

impl UserPreferences {
    /// Parses a stored blob, migrating legacy weekday shapes.
    ///
    /// Returns `None` when the blob lacks an `availability` object or a
    /// `clubs` array; callers fall back to defaults.
    pub fn from_value(value: &Value) -> Option<Self> {
        let availability = value.get("availability")?.as_object()?;
        let clubs = value.get("clubs")?.as_array()?;

        let availability = (0..WEEKDAYS)
            .map(|day| {
                let setting = availability
                    .get(&day.to_string())
                    .map(DayAvailability::from_value)
                    .unwrap_or_default();
                (day, setting)
            })
            .collect();
        let clubs = clubs
            .iter()
            .filter_map(|club| club.as_str().map(str::to_string))
            .collect();

        Some(Self {
            availability,
            clubs,
        })
    }

    /// Setting for a weekday; days missing from the map count as enabled.
    pub fn day(&self, weekday: u8) -> DayAvailability {
        self.availability.get(&weekday).cloned().unwrap_or_default()
    }

    /// Replaces a weekday's ranges, keeping them sorted and merged.
    pub fn set_ranges(&mut self, weekday: u8, ranges: Vec<TimeRange>) {
        let entry = self.availability.entry(weekday).or_default();
        entry.ranges = normalize_ranges(ranges);
    }

    pub fn set_enabled(&mut self, weekday: u8, enabled: bool) {
        self.availability.entry(weekday).or_default().enabled = enabled;
    }

    /// Re-applies range normalization to every day.
    pub fn normalize(&mut self) {
        for day in self.availability.values_mut() {
            day.ranges = normalize_ranges(std::mem::take(&mut day.ranges));
        }
    }
}

/// Sorts ranges by start and merges overlapping ones.
///
/// Ranges that do not parse, or that end before they start, are dropped.
/// Touching ranges (`08:00-10:00`, `10:00-12:00`) stay separate.
pub fn normalize_ranges(ranges: Vec<TimeRange>) -> Vec<TimeRange> {
    let mut parsed: Vec<(u32, u32, TimeRange)> = ranges
        .into_iter()
        .filter_map(|range| range.minutes().map(|(start, end)| (start, end, range)))
        .collect();
    parsed.sort_by_key(|(start, _, _)| *start);

    let mut merged: Vec<(u32, u32, TimeRange)> = Vec::with_capacity(parsed.len());
    for (start, end, range) in parsed {
        if let Some(previous) = merged.last_mut() {
            if start < previous.1 {
                if end > previous.1 {
                    previous.1 = end;
                    previous.2.end = range.end;
                }
                continue;
            }
        }
        merged.push((start, end, range));
    }

    merged.into_iter().map(|(_, _, range)| range).collect()
}

/// True when any preference restricts the slot list.
pub fn has_active_preferences(prefs: &UserPreferences) -> bool {
    !prefs.clubs.is_empty()
        || prefs
            .availability
            .values()
            .any(|day| !day.enabled || !day.ranges.is_empty())
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Null => false,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

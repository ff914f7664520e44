//! Applies user preferences and view criteria to aggregated slots.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use std::fmt;
use std::str::FromStr;

use super::{UserPreferences, has_active_preferences};
use crate::constants::filtering::MIN_LEAD_TIME_MINUTES;
use crate::data_fetcher::models::{Region, TimeSlot};
use crate::data_fetcher::processors::{bali_instant, time_to_minutes, weekday_index};
use crate::error::AppError;

/// Duration selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DurationFilter {
    /// `"60+"`: an hour or longer
    #[default]
    AtLeastSixty,
    /// `"60"`
    Sixty,
    /// `"90"`
    Ninety,
}

impl DurationFilter {
    pub fn matches(&self, duration: u32) -> bool {
        match self {
            DurationFilter::AtLeastSixty => duration >= 60,
            DurationFilter::Sixty => duration == 60,
            DurationFilter::Ninety => duration == 90,
        }
    }

    /// Shortest game the selector can match.
    pub fn minutes(&self) -> u32 {
        match self {
            DurationFilter::Ninety => 90,
            DurationFilter::AtLeastSixty | DurationFilter::Sixty => 60,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DurationFilter::AtLeastSixty => "60+",
            DurationFilter::Sixty => "60",
            DurationFilter::Ninety => "90",
        }
    }
}

impl FromStr for DurationFilter {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "60+" => Ok(DurationFilter::AtLeastSixty),
            "60" => Ok(DurationFilter::Sixty),
            "90" => Ok(DurationFilter::Ninety),
            other => Err(AppError::invalid_parameter(format!(
                "Invalid duration '{other}', expected 60+, 60 or 90"
            ))),
        }
    }
}

impl fmt::Display for DurationFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// View criteria chosen for one listing, independent of stored preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub duration: DurationFilter,
    /// `None` shows both regions.
    pub location: Option<Region>,
    /// Explicit club selection, `None` for all clubs.
    pub club: Option<String>,
    /// Ignore stored preferences (clubs, weekdays, time windows).
    pub show_all: bool,
}

/// Why fetching a date is pointless under the current preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    DayDisabled,
    DurationTooLong,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::DayDisabled => write!(f, "This day is turned off in your preferences"),
            SkipReason::DurationTooLong => {
                write!(f, "None of your time windows on this day fit a game this long")
            }
        }
    }
}

/// Slots passing every rule, in their original order.
///
/// Pure: the same inputs always yield the same output, and applying the
/// filter to its own output changes nothing.
pub fn apply(
    slots: &[TimeSlot],
    prefs: &UserPreferences,
    criteria: &FilterCriteria,
    now: DateTime<Utc>,
) -> Vec<TimeSlot> {
    let cutoff = now + Duration::minutes(MIN_LEAD_TIME_MINUTES);
    slots
        .iter()
        .filter(|slot| slot_passes(slot, prefs, criteria, cutoff))
        .cloned()
        .collect()
}

/// Single-slot check behind [`apply`]; `cutoff` is the earliest allowed start.
pub fn slot_passes(
    slot: &TimeSlot,
    prefs: &UserPreferences,
    criteria: &FilterCriteria,
    cutoff: DateTime<Utc>,
) -> bool {
    match bali_instant(&slot.date, &slot.time) {
        Some(start) if start > cutoff => {}
        _ => return false,
    }

    if !criteria.duration.matches(slot.duration) {
        return false;
    }

    if criteria.location.is_some_and(|location| slot.location != location) {
        return false;
    }

    if !criteria.show_all && !passes_preferences(slot, prefs) {
        return false;
    }

    match &criteria.club {
        Some(club) => slot.club == *club,
        None => true,
    }
}

fn passes_preferences(slot: &TimeSlot, prefs: &UserPreferences) -> bool {
    if !prefs.clubs.is_empty() && !prefs.clubs.contains(&slot.club) {
        return false;
    }

    let Ok(date) = NaiveDate::parse_from_str(&slot.date, "%Y-%m-%d") else {
        return false;
    };
    let day = prefs.day(weekday_index(date));
    if !day.enabled {
        return false;
    }
    if day.ranges.is_empty() {
        return true;
    }

    let Some(start) = time_to_minutes(&slot.time) else {
        return false;
    };
    day.ranges
        .iter()
        .any(|range| range.contains(start, slot.duration))
}

/// Reports whether a date can be skipped without fetching.
///
/// Always `None` when no preference is active.
pub fn skip_reason(
    date: NaiveDate,
    duration: DurationFilter,
    prefs: &UserPreferences,
) -> Option<SkipReason> {
    if !has_active_preferences(prefs) {
        return None;
    }

    let day = prefs.day(weekday_index(date));
    if !day.enabled {
        return Some(SkipReason::DayDisabled);
    }
    if day.ranges.is_empty() {
        return None;
    }

    let needed = duration.minutes();
    if day.ranges.iter().any(|range| range.length_minutes() >= needed) {
        None
    } else {
        Some(SkipReason::DurationTooLong)
    }
}

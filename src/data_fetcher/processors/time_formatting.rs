use crate::constants::locale::BALI_UTC_OFFSET_HOURS;
use crate::error::AppError;
use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveTime, Offset, Utc};

/// Fixed UTC offset of Bali (WITA). Bali has no daylight saving.
pub fn bali_offset() -> FixedOffset {
    FixedOffset::east_opt(BALI_UTC_OFFSET_HOURS * 3600).unwrap_or_else(|| Utc.fix())
}

/// Converts an upstream UTC time of day (`HH:MM:SS` or `HH:MM`) into Bali local time.
///
/// The hour wraps past midnight; the date is not touched. Input whose hour
/// is not numeric is returned unchanged.
///
/// # Examples
///
/// ```
/// use padel_slots::data_fetcher::processors::convert_to_bali_time;
///
/// assert_eq!(convert_to_bali_time("00:00:00"), "08:00:00");
/// assert_eq!(convert_to_bali_time("20:30:00"), "04:30:00");
/// ```
pub fn convert_to_bali_time(utc_time: &str) -> String {
    let mut parts = utc_time.split(':');
    let Some(hour) = parts.next().and_then(|h| h.trim().parse::<i64>().ok()) else {
        return utc_time.to_string();
    };
    let minute = parts
        .next()
        .and_then(|m| m.trim().parse::<u32>().ok())
        .unwrap_or(0);
    let second = parts
        .next()
        .and_then(|s| s.trim().parse::<u32>().ok())
        .unwrap_or(0);

    let bali_hour = (hour + i64::from(BALI_UTC_OFFSET_HOURS)).rem_euclid(24);
    format!("{bali_hour:02}:{minute:02}:{second:02}")
}

/// Current date in Bali for the given instant.
pub fn bali_today(now: DateTime<Utc>) -> NaiveDate {
    now.with_timezone(&bali_offset()).date_naive()
}

/// Bali date `offset_days` from `now`, formatted `YYYY-MM-DD`.
pub fn date_string(now: DateTime<Utc>, offset_days: i64) -> String {
    (bali_today(now) + Duration::days(offset_days))
        .format("%Y-%m-%d")
        .to_string()
}

/// The next `days` Bali dates starting today.
pub fn next_days(now: DateTime<Utc>, days: u32) -> Vec<String> {
    (0..i64::from(days))
        .map(|offset| date_string(now, offset))
        .collect()
}

/// Parses a strict `YYYY-MM-DD` date.
pub fn parse_date(date: &str) -> Result<NaiveDate, AppError> {
    let well_formed = date.len() == 10
        && date.char_indices().all(|(i, c)| match i {
            4 | 7 => c == '-',
            _ => c.is_ascii_digit(),
        });
    if !well_formed {
        return Err(AppError::datetime_parse_error(format!(
            "expected YYYY-MM-DD, got '{date}'"
        )));
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|e| AppError::datetime_parse_error(format!("invalid date '{date}': {e}")))
}

/// Minutes since midnight for `HH:MM` or `HH:MM:SS`.
pub fn time_to_minutes(time: &str) -> Option<u32> {
    let mut parts = time.split(':');
    let hour: u32 = parts.next()?.trim().parse().ok()?;
    let minute: u32 = parts.next()?.trim().parse().ok()?;
    // 24:00 is the only valid time in hour 24, marking the end of the day
    if minute > 59 || hour > 24 || (hour == 24 && minute > 0) {
        return None;
    }
    Some(hour * 60 + minute)
}

/// Absolute instant of a Bali-local date and time.
pub fn bali_instant(date: &str, time: &str) -> Option<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    let time = NaiveTime::parse_from_str(time, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M"))
        .ok()?;
    let local = date.and_time(time);
    Some(DateTime::<Utc>::from_naive_utc_and_offset(
        local - Duration::hours(i64::from(BALI_UTC_OFFSET_HOURS)),
        Utc,
    ))
}

/// Weekday index with Sunday as 0, as stored in preferences.
pub fn weekday_index(date: NaiveDate) -> u8 {
    // num_days_from_sunday is always in 0..7
    date.weekday().num_days_from_sunday() as u8
}

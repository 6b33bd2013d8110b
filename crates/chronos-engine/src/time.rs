//! Relative-date resolution and human-readable time formatting.
//!
//! The resolver understands a handful of fixed English phrases ("today",
//! "tomorrow", "this week", "next week") and turns them into instant ranges
//! anchored on local midnight in the user's timezone. The formatters render
//! instants as wall-clock text in a given timezone.

use chrono::{
    DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone,
    Utc,
};
use chrono_tz::Tz;

use crate::error::{EngineError, Result};
use crate::event::DateRange;

/// Parse an IANA timezone name (e.g. "America/New_York").
///
/// # Errors
/// Returns `EngineError::InvalidTimezone` for unknown names.
pub fn parse_timezone(label: &str) -> Result<Tz> {
    label
        .parse::<Tz>()
        .map_err(|_| EngineError::InvalidTimezone(label.to_string()))
}

/// Parse an ISO 8601 datetime string into `DateTime<Utc>`.
///
/// Accepts RFC 3339 with an offset (e.g. "2026-02-17T14:00:00-05:00"), a
/// naive "2026-02-17T14:00:00" with optional fractional seconds, and a bare
/// date "2026-02-17" (midnight). Naive forms are interpreted as UTC.
///
/// # Errors
/// Returns `EngineError::InvalidDateTime` when no form matches.
pub fn parse_instant(s: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|ndt| ndt.and_utc())
        .map_err(|e| EngineError::InvalidDateTime {
            input: s.to_string(),
            message: e.to_string(),
        })
}

/// Resolve a relative date phrase into a range of instants.
///
/// Matching is case-insensitive and by substring, checked in the order
/// "today", "tomorrow", "this week", "next week". Days span local
/// 00:00:00.000 to 23:59:59.999; weeks run Monday through Sunday.
/// Returns `None` for anything else.
pub fn parse_relative_date(input: &str, now: DateTime<Utc>, tz: Tz) -> Option<DateRange> {
    let phrase = input.trim().to_lowercase();
    let today = now.with_timezone(&tz).date_naive();

    let (first_day, last_day) = if phrase.contains("today") {
        (today, today)
    } else if phrase.contains("tomorrow") {
        let tomorrow = today.succ_opt()?;
        (tomorrow, tomorrow)
    } else if phrase.contains("this week") {
        let monday = week_start(today)?;
        (monday, monday.checked_add_signed(Duration::days(6))?)
    } else if phrase.contains("next week") {
        let monday = week_start(today)?.checked_add_signed(Duration::days(7))?;
        (monday, monday.checked_add_signed(Duration::days(6))?)
    } else {
        return None;
    };

    Some(DateRange {
        start: local_instant(tz, first_day.and_time(NaiveTime::MIN))?,
        end: local_instant(tz, last_moment(last_day)?)?,
    })
}

fn week_start(date: NaiveDate) -> Option<NaiveDate> {
    let offset = i64::from(date.weekday().num_days_from_monday());
    date.checked_sub_signed(Duration::days(offset))
}

fn last_moment(date: NaiveDate) -> Option<NaiveDateTime> {
    date.and_hms_milli_opt(23, 59, 59, 999)
}

/// Map a local wall-clock time in `tz` to an instant.
///
/// Ambiguous times (DST fall-back) take the earlier instant. Times inside a
/// DST gap shift forward by the length of a typical gap (one hour).
fn local_instant(tz: Tz, local: NaiveDateTime) -> Option<DateTime<Utc>> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Some(dt.with_timezone(&Utc)),
        LocalResult::None => tz
            .from_local_datetime(&(local + Duration::hours(1)))
            .earliest()
            .map(|dt| dt.with_timezone(&Utc)),
    }
}

/// Format the wall-clock time of `instant` in `tz`, e.g. "2:05 PM".
pub fn format_time(instant: DateTime<Utc>, tz: Tz) -> String {
    instant.with_timezone(&tz).format("%-I:%M %p").to_string()
}

/// Format the calendar date of `instant` in `tz`, e.g. "Jan 14, 2026".
pub fn format_date(instant: DateTime<Utc>, tz: Tz) -> String {
    instant.with_timezone(&tz).format("%b %-d, %Y").to_string()
}

/// Format date and time together, e.g. "Jan 14, 2026 2:05 PM".
pub fn format_date_time(instant: DateTime<Utc>, tz: Tz) -> String {
    format!("{} {}", format_date(instant, tz), format_time(instant, tz))
}

/// Format a slot for an assistant answer, e.g. "Tue Jan 14, 2:00–2:30 PM".
///
/// The meridiem is repeated when it changes within the slot, and both dates are
/// written out when the slot crosses midnight.
pub fn format_slot_range(start: DateTime<Utc>, end: DateTime<Utc>, tz: Tz) -> String {
    let local_start = start.with_timezone(&tz);
    let local_end = end.with_timezone(&tz);

    if local_start.date_naive() != local_end.date_naive() {
        return format!(
            "{} – {}",
            local_start.format("%a %b %-d, %-I:%M %p"),
            local_end.format("%a %b %-d, %-I:%M %p")
        );
    }

    let day = local_start.format("%a %b %-d");
    if local_start.format("%p").to_string() == local_end.format("%p").to_string() {
        format!(
            "{day}, {}–{}",
            local_start.format("%-I:%M"),
            local_end.format("%-I:%M %p")
        )
    } else {
        format!(
            "{day}, {}–{}",
            local_start.format("%-I:%M %p"),
            local_end.format("%-I:%M %p")
        )
    }
}

//! Normalize Google Calendar API event payloads into [`CalendarEvent`]s.
//!
//! Cancelled events are dropped. All-day events (those carrying `date` rather
//! than `dateTime`) start at 00:00:00 UTC on their first day and end at
//! 23:59:59 UTC on their last day; Google's all-day end date is exclusive.
//! Empty or missing titles become "(No title)", empty or missing zones "UTC".

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EngineError, Result};
use crate::event::{Attendee, CalendarEvent};
use crate::time::parse_instant;

const UNTITLED: &str = "(No title)";
const CANCELLED: &str = "cancelled";

/// One edge (`start` or `end`) of a Google event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleEventTime {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

/// The subset of a Google Calendar event resource the engine reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleCalendarEvent {
    pub id: String,
    #[serde(default)]
    pub summary: Option<String>,
    pub start: GoogleEventTime,
    pub end: GoogleEventTime,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub attendees: Vec<Attendee>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub color_id: Option<String>,
}

/// Convert Google events into engine events, tagging each with `calendar_id`.
///
/// # Errors
/// Returns `EngineError::MissingTime` when an edge has neither `dateTime` nor
/// `date`, and `EngineError::InvalidDateTime` when a timestamp does not parse.
pub fn normalize_google_events(
    events: &[GoogleCalendarEvent],
    calendar_id: Option<&str>,
) -> Result<Vec<CalendarEvent>> {
    let normalized: Vec<CalendarEvent> = events
        .iter()
        .filter(|e| e.status.as_deref() != Some(CANCELLED))
        .map(|e| normalize_event(e, calendar_id))
        .collect::<Result<_>>()?;

    debug!(
        received = events.len(),
        normalized = normalized.len(),
        "normalized provider events"
    );

    Ok(normalized)
}

fn normalize_event(event: &GoogleCalendarEvent, calendar_id: Option<&str>) -> Result<CalendarEvent> {
    let start_time = match (&event.start.date_time, &event.start.date) {
        (Some(dt), _) => parse_instant(dt)?,
        (None, Some(date)) => parse_date(date)?.and_time(NaiveTime::MIN).and_utc(),
        (None, None) => return Err(missing(event, "start")),
    };

    let end_time = match (&event.end.date_time, &event.end.date) {
        (Some(dt), _) => parse_instant(dt)?,
        (None, Some(date)) => last_second_of_previous_day(parse_date(date)?, date)?,
        (None, None) => return Err(missing(event, "end")),
    };

    Ok(CalendarEvent {
        id: event.id.clone(),
        title: non_empty(event.summary.as_deref()).unwrap_or(UNTITLED).to_string(),
        start_time,
        end_time,
        timezone: non_empty(event.start.time_zone.as_deref())
            .unwrap_or("UTC")
            .to_string(),
        all_day: event.start.date.is_some(),
        attendees: event.attendees.clone(),
        location: event.location.clone(),
        description: event.description.clone(),
        color_id: event.color_id.clone(),
        calendar_id: calendar_id.map(str::to_string),
    })
}

/// Google sends `""` for some cleared fields; treat it like an absent one.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| EngineError::InvalidDateTime {
        input: s.to_string(),
        message: e.to_string(),
    })
}

fn last_second_of_previous_day(exclusive_end: NaiveDate, raw: &str) -> Result<DateTime<Utc>> {
    exclusive_end
        .checked_sub_signed(Duration::days(1))
        .and_then(|d| d.and_hms_opt(23, 59, 59))
        .map(|ndt| ndt.and_utc())
        .ok_or_else(|| EngineError::InvalidDateTime {
            input: raw.to_string(),
            message: "date out of range".to_string(),
        })
}

fn missing(event: &GoogleCalendarEvent, edge: &'static str) -> EngineError {
    EngineError::MissingTime {
        event_id: event.id.clone(),
        edge,
    }
}

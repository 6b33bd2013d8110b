//! Value types shared by every engine component.
//!
//! Instants are always `DateTime<Utc>`. The `timezone` carried on an event is a
//! display label only; interval math never reads it.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// An attendee on a calendar event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendee {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_status: Option<String>,
}

/// A normalized calendar event.
///
/// `start_time <= end_time` is assumed but not enforced. `id` is expected to be
/// unique within the collection an operation receives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// IANA timezone label the event was authored in. Informational only.
    #[serde(default = "default_timezone_label")]
    pub timezone: String,
    #[serde(default)]
    pub all_day: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attendees: Vec<Attendee>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendar_id: Option<String>,
}

fn default_timezone_label() -> String {
    "UTC".to_string()
}

impl CalendarEvent {
    /// Build a timed event with only the required fields set.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            start_time,
            end_time,
            timezone: default_timezone_label(),
            all_day: false,
            attendees: Vec::new(),
            location: None,
            description: None,
            color_id: None,
            calendar_id: None,
        }
    }

    pub fn duration(&self) -> Duration {
        self.end_time - self.start_time
    }
}

/// A half-open `[start, end)` span labeled busy or free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeBusyBlock {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub busy: bool,
}

impl FreeBusyBlock {
    pub fn free(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start,
            end,
            busy: false,
        }
    }

    pub fn busy(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start,
            end,
            busy: true,
        }
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// A candidate meeting slot. `score` only orders slots against each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub score: i32,
}

/// Events reported together by the conflict detector.
pub type ConflictGroup = Vec<CalendarEvent>;

/// Hour-of-day bounds (0-23) restricting which free blocks may host slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkHours {
    pub start: u32,
    pub end: u32,
}

impl WorkHours {
    /// Validate and build work hours.
    ///
    /// # Errors
    /// Returns `EngineError::InvalidWorkHours` if either bound is above 23.
    pub fn new(start: u32, end: u32) -> Result<Self> {
        let hours = Self { start, end };
        hours.validate()?;
        Ok(hours)
    }

    /// Check that both bounds are valid hours of the day.
    pub fn validate(&self) -> Result<()> {
        if self.start > 23 || self.end > 23 {
            return Err(EngineError::InvalidWorkHours {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }
}

/// A resolved `[start, end]` range, as produced by the relative-date resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

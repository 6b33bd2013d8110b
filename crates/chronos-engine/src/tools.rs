//! Tool-call handlers that expose the engine to the orchestration layer.
//!
//! Calls arrive as a tagged [`ToolCall`] (discriminant field `"tool"`).
//! Timestamps and timezones are validated here, before anything reaches the
//! reasoning core, and each execution is recorded as a [`ToolStep`].

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::chat::ToolStep;
use crate::config::EngineConfig;
use crate::conflict::find_conflicts;
use crate::error::{EngineError, Result};
use crate::event::{CalendarEvent, ConflictGroup, FreeBusyBlock, TimeSlot, WorkHours};
use crate::freebusy::{busy_blocks, compute_free_busy};
use crate::slots::find_available_slots;
use crate::time::{parse_instant, parse_timezone};

/// Supplies the events of one user for a time range.
pub trait CalendarProvider {
    /// Events intersecting `[start, end)`.
    fn list_events(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<CalendarEvent>>;
}

/// A provider backed by a fixed event list.
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    events: Vec<CalendarEvent>,
}

impl StaticProvider {
    pub fn new(events: Vec<CalendarEvent>) -> Self {
        Self { events }
    }
}

impl CalendarProvider for StaticProvider {
    fn list_events(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<CalendarEvent>> {
        Ok(self
            .events
            .iter()
            .filter(|e| e.end_time > start && e.start_time < end)
            .cloned()
            .collect())
    }
}

/// A tool invocation requested by the model.
///
/// Missing `timezone` fields fall back to the configured default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tool", rename_all = "snake_case")]
pub enum ToolCall {
    GetCalendarEvents {
        time_min: String,
        time_max: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timezone: Option<String>,
    },
    CalendarFreebusy {
        time_min: String,
        time_max: String,
    },
    SummarizeCalendar {
        events: Vec<CalendarEvent>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timezone: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        time_min: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        time_max: Option<String>,
    },
    AnalyzeAvailability {
        events: Vec<CalendarEvent>,
        duration_minutes: u32,
        time_min: String,
        time_max: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timezone: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        work_hours: Option<WorkHours>,
    },
}

impl ToolCall {
    /// The wire name of this tool.
    pub fn name(&self) -> &'static str {
        match self {
            Self::GetCalendarEvents { .. } => "get_calendar_events",
            Self::CalendarFreebusy { .. } => "calendar_freebusy",
            Self::SummarizeCalendar { .. } => "summarize_calendar",
            Self::AnalyzeAvailability { .. } => "analyze_availability",
        }
    }
}

/// The result of a tool invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ToolOutput {
    Events {
        events: Vec<CalendarEvent>,
    },
    FreeBusy {
        busy: Vec<FreeBusyBlock>,
    },
    CalendarSummary {
        free_busy: Vec<FreeBusyBlock>,
        conflicts: Vec<ConflictGroup>,
    },
    Availability {
        slots: Vec<TimeSlot>,
    },
}

/// Executes tool calls for a single user request.
///
/// The runner enforces the configured tool-call budget and keeps the
/// [`ToolStep`] of every call it accepted, failed ones included.
pub struct ToolRunner<'a, P: CalendarProvider> {
    provider: &'a P,
    config: &'a EngineConfig,
    steps: Vec<ToolStep>,
}

impl<'a, P: CalendarProvider> ToolRunner<'a, P> {
    pub fn new(provider: &'a P, config: &'a EngineConfig) -> Self {
        Self {
            provider,
            config,
            steps: Vec::new(),
        }
    }

    /// Run one tool call.
    ///
    /// # Errors
    /// Returns `EngineError::ToolBudgetExceeded` once `max_tool_calls` calls
    /// have been accepted, and otherwise any validation or provider error of
    /// the call itself.
    pub fn run(&mut self, call: ToolCall) -> Result<ToolOutput> {
        let limit = self.config.max_tool_calls;
        if self.steps.len() >= limit {
            warn!(tool = call.name(), limit, "tool call rejected: budget exhausted");
            return Err(EngineError::ToolBudgetExceeded { limit });
        }

        let mut step = ToolStep::running(&call);
        let result = self.execute(call);
        match &result {
            Ok(output) => step.succeed(output.clone()),
            Err(e) => {
                warn!(tool = %step.tool_name, error = %e, "tool call failed");
                step.fail(e.to_string());
            }
        }
        debug!(tool = %step.tool_name, state = ?step.state, "tool call finished");
        self.steps.push(step);
        result
    }

    pub fn steps(&self) -> &[ToolStep] {
        &self.steps
    }

    pub fn into_steps(self) -> Vec<ToolStep> {
        self.steps
    }

    fn execute(&self, call: ToolCall) -> Result<ToolOutput> {
        match call {
            ToolCall::GetCalendarEvents {
                time_min,
                time_max,
                timezone,
            } => {
                self.timezone(timezone.as_deref())?;
                let (start, end) = parse_window(&time_min, &time_max)?;
                let events = self.provider.list_events(start, end)?;
                Ok(ToolOutput::Events { events })
            }
            ToolCall::CalendarFreebusy { time_min, time_max } => {
                let (start, end) = parse_window(&time_min, &time_max)?;
                let events = self.provider.list_events(start, end)?;
                Ok(ToolOutput::FreeBusy {
                    busy: busy_blocks(&events, start, end),
                })
            }
            ToolCall::SummarizeCalendar {
                events,
                timezone,
                time_min,
                time_max,
            } => {
                self.timezone(timezone.as_deref())?;
                let window = summary_window(&events, time_min.as_deref(), time_max.as_deref())?;
                let free_busy = window
                    .map(|(start, end)| compute_free_busy(&events, start, end))
                    .unwrap_or_default();
                Ok(ToolOutput::CalendarSummary {
                    free_busy,
                    conflicts: find_conflicts(&events),
                })
            }
            ToolCall::AnalyzeAvailability {
                events,
                duration_minutes,
                time_min,
                time_max,
                timezone,
                work_hours,
            } => {
                let tz = self.timezone(timezone.as_deref())?;
                let (start, end) = parse_window(&time_min, &time_max)?;
                let work_hours = work_hours.or(self.config.work_hours);
                if let Some(hours) = &work_hours {
                    hours.validate()?;
                }
                let mut slots =
                    find_available_slots(&events, duration_minutes, start, end, work_hours, tz);
                slots.truncate(self.config.max_suggestions);
                Ok(ToolOutput::Availability { slots })
            }
        }
    }

    fn timezone(&self, label: Option<&str>) -> Result<Tz> {
        parse_timezone(label.unwrap_or(&self.config.default_timezone))
    }
}

/// Parse a `[time_min, time_max]` pair, rejecting reversed windows.
pub fn parse_window(time_min: &str, time_max: &str) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let start = parse_instant(time_min)?;
    let end = parse_instant(time_max)?;
    if start > end {
        return Err(EngineError::InvalidWindow {
            start: time_min.to_string(),
            end: time_max.to_string(),
        });
    }
    Ok((start, end))
}

/// The window a summary covers: the explicit bounds where given, otherwise the
/// span of the events themselves. `None` when there is nothing to span.
fn summary_window(
    events: &[CalendarEvent],
    time_min: Option<&str>,
    time_max: Option<&str>,
) -> Result<Option<(DateTime<Utc>, DateTime<Utc>)>> {
    let start = match time_min {
        Some(s) => Some(parse_instant(s)?),
        None => events.iter().map(|e| e.start_time).min(),
    };
    let end = match time_max {
        Some(s) => Some(parse_instant(s)?),
        None => events.iter().map(|e| e.end_time).max(),
    };

    match (start, end) {
        (Some(start), Some(end)) if start > end => Err(EngineError::InvalidWindow {
            start: start.to_rfc3339(),
            end: end.to_rfc3339(),
        }),
        (Some(start), Some(end)) => Ok(Some((start, end))),
        _ => Ok(None),
    }
}

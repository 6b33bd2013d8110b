//! Find and rank candidate meeting slots.
//!
//! Slots are cut from the free blocks of [`compute_free_busy`] by sliding a
//! window of the requested duration in fixed steps, then ranked by a small
//! additive heuristic. Wall-clock hours are read in the caller's timezone;
//! instants themselves are never shifted.

use chrono::{DateTime, Duration, Timelike, Utc};
use chrono_tz::Tz;
use tracing::debug;

use crate::event::{CalendarEvent, TimeSlot, WorkHours};
use crate::freebusy::compute_free_busy;

/// Distance between consecutive candidate slot starts.
pub const SLOT_STEP_MINUTES: i64 = 30;

/// Score every slot starts from.
pub const BASE_SCORE: i32 = 100;

/// Bonus for slots starting in `[MORNING_START_HOUR, MORNING_END_HOUR)`.
pub const MORNING_BONUS: i32 = 20;
pub const MORNING_START_HOUR: u32 = 9;
pub const MORNING_END_HOUR: u32 = 11;

/// Bonus for each side of a slot left clear of adjacent events.
pub const BUFFER_BONUS: i32 = 10;
pub const BUFFER_MINUTES: i64 = 30;

/// Find slots of `duration_minutes` inside the free time of `[start, end)`.
///
/// When `work_hours` is given, a free block is skipped entirely if its start
/// hour is before `work_hours.start` or its end hour is after `work_hours.end`.
/// The filter applies to whole blocks, not to individual slots.
///
/// Returns slots sorted by descending score. Slots with equal scores keep
/// their chronological order.
pub fn find_available_slots(
    events: &[CalendarEvent],
    duration_minutes: u32,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    work_hours: Option<WorkHours>,
    tz: Tz,
) -> Vec<TimeSlot> {
    let duration = Duration::minutes(i64::from(duration_minutes));
    let step = Duration::minutes(SLOT_STEP_MINUTES);

    let mut slots = Vec::new();

    for block in compute_free_busy(events, start, end) {
        if block.busy || block.end - block.start < duration {
            continue;
        }

        if let Some(hours) = work_hours {
            let block_start_hour = block.start.with_timezone(&tz).hour();
            let block_end_hour = block.end.with_timezone(&tz).hour();
            if block_start_hour < hours.start || block_end_hour > hours.end {
                continue;
            }
        }

        let mut slot_start = block.start;
        while slot_start + duration <= block.end {
            let slot_end = slot_start + duration;
            slots.push(TimeSlot {
                start: slot_start,
                end: slot_end,
                score: score_slot(slot_start, slot_end, events, tz),
            });
            slot_start = slot_start + step;
        }
    }

    slots.sort_by(|a, b| b.score.cmp(&a.score));

    debug!(
        events = events.len(),
        duration_minutes,
        slots = slots.len(),
        "found available slots"
    );

    slots
}

/// Score a candidate slot `[start, end)` against the surrounding events.
///
/// - `BASE_SCORE` to begin with.
/// - `+MORNING_BONUS` when the slot starts between 09:00 and 11:00 local time.
/// - `+BUFFER_BONUS` when no event ends in the 30 minutes before `start`
///   (`start - 30min < event.end <= start`).
/// - `+BUFFER_BONUS` when no event starts in the 30 minutes before `end`
///   (`end - 30min <= event.start < end`).
pub fn score_slot(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    events: &[CalendarEvent],
    tz: Tz,
) -> i32 {
    let mut score = BASE_SCORE;

    let hour = start.with_timezone(&tz).hour();
    if (MORNING_START_HOUR..MORNING_END_HOUR).contains(&hour) {
        score += MORNING_BONUS;
    }

    let buffer = Duration::minutes(BUFFER_MINUTES);

    let has_buffer_before = !events
        .iter()
        .any(|e| e.end_time > start - buffer && e.end_time <= start);
    let has_buffer_after = !events
        .iter()
        .any(|e| e.start_time >= end - buffer && e.start_time < end);

    if has_buffer_before {
        score += BUFFER_BONUS;
    }
    if has_buffer_after {
        score += BUFFER_BONUS;
    }

    score
}

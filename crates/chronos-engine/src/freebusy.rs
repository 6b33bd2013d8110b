//! Partition a time window into free and busy blocks.
//!
//! Events are swept in start order with a cursor. Every event inside the window
//! contributes its own busy block, unmerged and unclipped, so busy blocks may
//! overlap each other when events do. Free blocks are exactly the gaps the
//! cursor crosses and are always bounded by the window.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::event::{CalendarEvent, FreeBusyBlock};

/// Compute the free/busy blocks covering `[start, end)`.
///
/// Events ending at or before `start`, or starting at or after `end`, are
/// ignored. The remaining events are stably sorted by start time. An empty
/// event list yields a single free block spanning the whole window.
pub fn compute_free_busy(
    events: &[CalendarEvent],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Vec<FreeBusyBlock> {
    let mut in_window: Vec<&CalendarEvent> = events
        .iter()
        .filter(|e| e.end_time > start && e.start_time < end)
        .collect();

    // Stable: events sharing a start time keep their input order.
    in_window.sort_by_key(|e| e.start_time);

    let mut blocks = Vec::with_capacity(in_window.len() * 2 + 1);
    let mut cursor = start;

    for event in in_window {
        if cursor < event.start_time {
            blocks.push(FreeBusyBlock::free(cursor, event.start_time));
        }
        blocks.push(FreeBusyBlock::busy(event.start_time, event.end_time));
        cursor = cursor.max(event.end_time);
    }

    if cursor < end {
        blocks.push(FreeBusyBlock::free(cursor, end));
    }

    debug!(
        events = events.len(),
        blocks = blocks.len(),
        %start,
        %end,
        "computed free/busy blocks"
    );

    blocks
}

/// The free blocks of [`compute_free_busy`], in window order.
pub fn free_blocks(
    events: &[CalendarEvent],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Vec<FreeBusyBlock> {
    compute_free_busy(events, start, end)
        .into_iter()
        .filter(|b| !b.busy)
        .collect()
}

/// The busy blocks of [`compute_free_busy`], in event start order.
pub fn busy_blocks(
    events: &[CalendarEvent],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Vec<FreeBusyBlock> {
    compute_free_busy(events, start, end)
        .into_iter()
        .filter(|b| b.busy)
        .collect()
}

//! Group overlapping events into conflict groups.
//!
//! Grouping is a greedy single pass in input order. Each unclaimed event anchors
//! a group and claims every later unclaimed event that overlaps the anchor
//! itself. Membership is never tested transitively, so two non-anchor members
//! of a group need not overlap each other.
//! Adjacent events (where one ends exactly when another starts) are NOT conflicts.

use std::collections::HashSet;

use tracing::debug;

use crate::event::{CalendarEvent, ConflictGroup};

/// Whether two events overlap in time.
///
/// Two events overlap when `a.start < b.end && b.start < a.end`. Touching
/// endpoints do not count.
pub fn has_overlap(a: &CalendarEvent, b: &CalendarEvent) -> bool {
    a.start_time < b.end_time && b.start_time < a.end_time
}

/// Find conflict groups among `events`.
///
/// Returns groups of two or more events, each made of an anchor followed by the
/// later events that overlap it, in input order. Events overlapping nothing are
/// omitted. Claims are tracked by event id.
pub fn find_conflicts(events: &[CalendarEvent]) -> Vec<ConflictGroup> {
    let mut groups = Vec::new();
    let mut processed: HashSet<&str> = HashSet::new();

    for (i, anchor) in events.iter().enumerate() {
        if !processed.insert(anchor.id.as_str()) {
            continue;
        }

        let mut group = vec![anchor.clone()];
        for other in &events[i + 1..] {
            if processed.contains(other.id.as_str()) {
                continue;
            }
            if has_overlap(anchor, other) {
                group.push(other.clone());
                processed.insert(other.id.as_str());
            }
        }

        if group.len() > 1 {
            groups.push(group);
        }
    }

    debug!(
        events = events.len(),
        groups = groups.len(),
        "detected conflict groups"
    );

    groups
}

//! Benchmarks for the partitioner, slot finder, and conflict detector on a
//! busy week of calendar data.

use std::hint::black_box;

use chrono::{DateTime, Duration, TimeZone, Utc};
use chrono_tz::Tz;
use chronos_engine::{compute_free_busy, find_available_slots, find_conflicts, CalendarEvent};
use criterion::{criterion_group, criterion_main, Criterion};

fn week_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 0, 0, 0).unwrap()
}

/// Seven days of 45-minute meetings every 75 minutes from 08:00 to 18:00,
/// with every third meeting double-booked.
fn busy_week() -> Vec<CalendarEvent> {
    let mut events = Vec::new();
    for day in 0..7 {
        let day_start = week_start() + Duration::days(day) + Duration::hours(8);
        for slot in 0..8 {
            let start = day_start + Duration::minutes(slot * 75);
            let id = format!("d{day}-s{slot}");
            events.push(CalendarEvent::new(
                id.clone(),
                "Meeting",
                start,
                start + Duration::minutes(45),
            ));
            if slot % 3 == 0 {
                events.push(CalendarEvent::new(
                    format!("{id}-overlap"),
                    "Overlap",
                    start + Duration::minutes(15),
                    start + Duration::minutes(60),
                ));
            }
        }
    }
    events
}

fn bench_engine(c: &mut Criterion) {
    let events = busy_week();
    let start = week_start();
    let end = start + Duration::days(7);

    c.bench_function("compute_free_busy/week", |b| {
        b.iter(|| compute_free_busy(black_box(&events), start, end))
    });

    c.bench_function("find_available_slots/week_30min", |b| {
        b.iter(|| find_available_slots(black_box(&events), 30, start, end, None, Tz::UTC))
    });

    c.bench_function("find_conflicts/week", |b| {
        b.iter(|| find_conflicts(black_box(&events)))
    });
}

criterion_group!(benches, bench_engine);
criterion_main!(benches);

use chrono::{DateTime, Datelike, Duration, Utc};
use tracing::trace;

use crate::datetime::{format_long, same_day};
use crate::event::Event;

pub const DEFAULT_UPCOMING_LIMIT: usize = 3;

/// Events whose `date` falls on the given (day, month, year) triple.
#[must_use]
pub fn events_for_day(events: &[Event], day: u32, month: u32, year: i32) -> Vec<Event> {
    events
        .iter()
        .filter(|e| e.date.day() == day && e.date.month() == month && e.date.year() == year)
        .cloned()
        .collect()
}

/// Events whose `date` falls on the same calendar day as `date`.
#[must_use]
pub fn events_for_date(events: &[Event], date: DateTime<Utc>) -> Vec<Event> {
    events_for_day(events, date.day(), date.month(), date.year())
}

/// Stable ascending sort by start time; events with identical start times
/// keep their original relative order.
#[must_use]
pub fn sort_by_start_time(events: &[Event]) -> Vec<Event> {
    let mut sorted = events.to_vec();
    sorted.sort_by_key(|e| e.start_time);
    sorted
}

/// Events that have not fully elapsed as of `now`, ascending by calendar day
/// then start time, truncated to `limit`.
#[must_use]
pub fn upcoming_events(events: &[Event], now: DateTime<Utc>, limit: usize) -> Vec<Event> {
    let mut upcoming: Vec<Event> = events
        .iter()
        .filter(|e| e.is_upcoming(now))
        .cloned()
        .collect();

    upcoming.sort_by(|a, b| {
        if same_day(a.date, b.date) {
            a.start_time.cmp(&b.start_time)
        } else {
            a.date.cmp(&b.date)
        }
    });
    upcoming.truncate(limit);

    trace!(count = upcoming.len(), limit, "derived upcoming events");
    upcoming
}

/// Human date header: `Today`, `Tomorrow`, `Yesterday` for the days adjacent
/// to `now`, otherwise the long display form.
#[must_use]
pub fn format_date_header(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    if same_day(date, now) {
        return "Today".to_string();
    }
    if same_day(date, now + Duration::days(1)) {
        return "Tomorrow".to_string();
    }
    if same_day(date, now - Duration::days(1)) {
        return "Yesterday".to_string();
    }
    format_long(date)
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};

    use super::{
        DEFAULT_UPCOMING_LIMIT, events_for_date, events_for_day, format_date_header,
        sort_by_start_time, upcoming_events,
    };
    use crate::event::Event;

    fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, day, hour, minute, 0).unwrap()
    }

    fn event(title: &str, day: u32, start_hour: u32, end_hour: u32) -> Event {
        Event::new(title, at(day, start_hour, 0), at(day, end_hour, 0))
    }

    #[test]
    fn day_filter_includes_only_the_matching_triple() {
        let events = vec![event("Gym", 2, 9, 10), event("Dentist", 3, 14, 15)];

        let hits = events_for_day(&events, 2, 3, 2026);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Gym");

        assert!(events_for_day(&events, 2, 4, 2026).is_empty());
        assert!(events_for_day(&events, 2, 3, 2025).is_empty());
        assert_eq!(events_for_date(&events, at(3, 23, 59)).len(), 1);
    }

    #[test]
    fn start_time_sort_is_stable_for_ties() {
        let first = event("First", 2, 9, 10);
        let second = event("Second", 2, 8, 9);
        let tied_a = event("Tied A", 2, 9, 11);

        let sorted = sort_by_start_time(&[first.clone(), second.clone(), tied_a.clone()]);
        assert_eq!(sorted[0].title, "Second");
        assert_eq!(sorted[1].title, "First");
        assert_eq!(sorted[2].title, "Tied A");
    }

    #[test]
    fn elapsed_events_drop_out_of_upcoming() {
        let a = event("A", 2, 9, 10);
        let b = event("B", 2, 14, 15);
        let now = at(2, 11, 0);

        let upcoming = upcoming_events(&[a, b], now, DEFAULT_UPCOMING_LIMIT);
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].title, "B");
    }

    #[test]
    fn upcoming_orders_by_day_then_start_time() {
        let tomorrow = event("A", 3, 9, 10);
        let today = event("B", 2, 14, 15);
        let now = at(2, 8, 0);

        let upcoming = upcoming_events(&[tomorrow, today], now, DEFAULT_UPCOMING_LIMIT);
        assert_eq!(upcoming.len(), 2);
        assert_eq!(upcoming[0].title, "B");
        assert_eq!(upcoming[1].title, "A");
    }

    #[test]
    fn upcoming_respects_the_limit() {
        let events: Vec<Event> = (0..5).map(|i| event("E", 3 + i, 9, 10)).collect();
        let now = at(2, 8, 0);

        assert_eq!(upcoming_events(&events, now, 3).len(), 3);
        assert_eq!(upcoming_events(&events, now, 10).len(), 5);
    }

    #[test]
    fn date_header_names_adjacent_days() {
        let now = at(2, 11, 0);
        assert_eq!(format_date_header(at(2, 23, 0), now), "Today");
        assert_eq!(format_date_header(at(3, 1, 0), now), "Tomorrow");
        assert_eq!(format_date_header(at(1, 5, 0), now), "Yesterday");
        assert_eq!(format_date_header(at(6, 5, 0), now), "Friday, March 6, 2026");
    }
}

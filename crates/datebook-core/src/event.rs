use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::datetime::same_day;

/// A single calendar event. `date` locates the event on the grid at day
/// granularity; `start_time`/`end_time` carry the clock times. The serialized
/// shape matches the persisted blob: camelCase keys, ISO-8601 date-times.
///
/// `date` and `start_time` are independently meaningful: day-matching keys off
/// `date`, clock display keys off `start_time`, and deserialization accepts
/// records where the two disagree. `Event::new` keeps them consistent for
/// events built in-process.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,

    pub title: String,

    #[serde(default)]
    pub description: String,

    pub date: DateTime<Utc>,

    #[serde(default)]
    pub location: String,

    pub start_time: DateTime<Utc>,

    pub end_time: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Event {
    /// New event with a fresh opaque id and `date` derived from
    /// `start_time`'s calendar day.
    pub fn new(title: impl Into<String>, start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            description: String::new(),
            date: start_time.date_naive().and_time(NaiveTime::MIN).and_utc(),
            location: String::new(),
            start_time,
            end_time,
            color: None,
        }
    }

    /// True while the event has not fully elapsed: `now` falls before the
    /// event's day, or on the event's day before its end time.
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        now < self.date || (same_day(now, self.date) && now < self.end_time)
    }

    /// The event's color tag, or the palette default when untagged.
    pub fn color_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.color.as_deref().unwrap_or(default)
    }
}

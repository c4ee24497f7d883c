use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::Config;
use crate::datetime::same_day;
use crate::event::Event;

/// Coarse temporal classification for the events listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeBucket {
    #[default]
    All,
    Upcoming,
    Past,
    Today,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending by calendar day, then start time.
    #[default]
    Newest,
    /// Descending by calendar day, then start time.
    Oldest,
    /// Case-insensitive by title.
    Alphabetical,
}

/// The events-listing pipeline: free-text search, time bucket, and color
/// filters AND-combined, then one of three sort orders. An empty color set
/// means no color filtering.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub search: String,
    pub time_bucket: TimeBucket,
    pub colors: Vec<String>,
    pub sort: SortOrder,
}

impl EventFilter {
    /// True when no filter narrows the listing and the default sort applies.
    #[must_use]
    pub fn is_neutral(&self) -> bool {
        self.search.is_empty()
            && self.time_bucket == TimeBucket::All
            && self.colors.is_empty()
            && self.sort == SortOrder::Newest
    }

    /// Whether a single event passes every active filter.
    #[must_use]
    pub fn matches(&self, event: &Event, now: DateTime<Utc>, default_color: &str) -> bool {
        if !self.search.is_empty() {
            let query = self.search.to_lowercase();
            let hit = event.title.to_lowercase().contains(&query)
                || event.description.to_lowercase().contains(&query)
                || event.location.to_lowercase().contains(&query);
            if !hit {
                return false;
            }
        }

        let in_bucket = match self.time_bucket {
            TimeBucket::All => true,
            TimeBucket::Upcoming => event.is_upcoming(now),
            TimeBucket::Past => !event.is_upcoming(now),
            TimeBucket::Today => same_day(event.date, now),
        };
        if !in_bucket {
            return false;
        }

        if !self.colors.is_empty() {
            let color = event.color_or(default_color);
            if !self.colors.iter().any(|c| c == color) {
                return false;
            }
        }

        true
    }

    /// Filters and sorts the collection for display.
    #[must_use]
    pub fn apply(&self, events: &[Event], now: DateTime<Utc>, cfg: &Config) -> Vec<Event> {
        let default_color = cfg.default_color();
        let mut result: Vec<Event> = events
            .iter()
            .filter(|e| self.matches(e, now, default_color))
            .cloned()
            .collect();

        match self.sort {
            SortOrder::Newest => result.sort_by(|a, b| chronological(a, b)),
            SortOrder::Oldest => result.sort_by(|a, b| chronological(b, a)),
            SortOrder::Alphabetical => {
                result.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()));
            }
        }

        trace!(
            total = events.len(),
            kept = result.len(),
            bucket = ?self.time_bucket,
            sort = ?self.sort,
            "applied event filter"
        );
        result
    }
}

fn chronological(a: &Event, b: &Event) -> Ordering {
    if same_day(a.date, b.date) {
        a.start_time.cmp(&b.start_time)
    } else {
        a.date.cmp(&b.date)
    }
}

use anyhow::Context;
use chrono::{DateTime, Datelike, Utc};
use tracing::trace;

use crate::datetime::{days_in_month, first_weekday_index};
use crate::event::Event;
use crate::query::events_for_day;

/// Fixed header row, Sunday first.
pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// How many events a day cell shows before collapsing into "+N more".
pub const DAY_EVENT_DISPLAY_CAP: usize = 2;

/// One real day on the grid. `events` holds the full day's list in
/// collection order; the display cap is applied by the accessors.
#[derive(Debug, Clone, PartialEq)]
pub struct DayCell {
    pub day: u32,
    pub is_today: bool,
    pub is_selected: bool,
    pub events: Vec<Event>,
}

impl DayCell {
    /// The events a cell renders directly, at most [`DAY_EVENT_DISPLAY_CAP`].
    #[must_use]
    pub fn visible_events(&self) -> &[Event] {
        let cap = self.events.len().min(DAY_EVENT_DISPLAY_CAP);
        &self.events[..cap]
    }

    /// How many events the cap hides.
    #[must_use]
    pub fn overflow_count(&self) -> usize {
        self.events.len().saturating_sub(DAY_EVENT_DISPLAY_CAP)
    }

    /// The "+N more" indicator, or `None` when everything fits.
    #[must_use]
    pub fn overflow_label(&self) -> Option<String> {
        let hidden = self.overflow_count();
        (hidden > 0).then(|| format!("+{hidden} more"))
    }
}

/// A month packed into week-aligned rows of exactly 7 cells; `None` cells are
/// the leading/trailing padding around the month's real days.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<Vec<Option<DayCell>>>,
}

impl MonthGrid {
    /// Cells of the first column through last, flattened in calendar order.
    pub fn cells(&self) -> impl Iterator<Item = &Option<DayCell>> {
        self.weeks.iter().flatten()
    }

    /// The populated cell for a day number, if the day exists in this month.
    #[must_use]
    pub fn day(&self, day: u32) -> Option<&DayCell> {
        self.cells()
            .filter_map(|c| c.as_ref())
            .find(|c| c.day == day)
    }
}

/// Builds the week-aligned grid for (year, month): leading padding equal to
/// the first day's weekday index, one cell per day carrying that day's
/// events, and trailing padding out to a whole row of 7.
///
/// The only failure is an invalid (year, month) pair.
pub fn build_month_grid(
    year: i32,
    month: u32,
    events: &[Event],
    today: DateTime<Utc>,
    selected: Option<DateTime<Utc>>,
) -> anyhow::Result<MonthGrid> {
    let total_days =
        days_in_month(year, month).with_context(|| format!("invalid month {year}-{month}"))?;
    let start_weekday =
        first_weekday_index(year, month).with_context(|| format!("invalid month {year}-{month}"))?;

    let mut weeks: Vec<Vec<Option<DayCell>>> = Vec::new();
    let mut day = 1;

    while day <= total_days {
        let mut week: Vec<Option<DayCell>> = Vec::with_capacity(7);

        for slot in 0..7 {
            if day == 1 && slot < start_weekday {
                week.push(None);
            } else if day <= total_days {
                let is_today =
                    today.year() == year && today.month() == month && today.day() == day;
                let is_selected = selected.is_some_and(|s| {
                    s.year() == year && s.month() == month && s.day() == day
                });

                week.push(Some(DayCell {
                    day,
                    is_today,
                    is_selected,
                    events: events_for_day(events, day, month, year),
                }));
                day += 1;
            } else {
                week.push(None);
            }
        }

        weeks.push(week);
    }

    trace!(year, month, rows = weeks.len(), "built month grid");
    Ok(MonthGrid { year, month, weeks })
}

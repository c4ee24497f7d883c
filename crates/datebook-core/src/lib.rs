//! Core of a personal event/calendar manager: the event entity, a
//! whole-collection persistence layer over an abstract key-value backend,
//! pure query/derivation functions, the month-grid builder, and the events
//! listing filter pipeline.
//!
//! Everything that compares against "now" takes it as an explicit parameter;
//! nothing in this crate samples the clock, so every derivation is
//! deterministic and replayable.

pub mod config;
pub mod datetime;
pub mod event;
pub mod filter;
pub mod grid;
pub mod logging;
pub mod query;
pub mod store;

pub use config::{Config, resolve_data_dir};
pub use event::Event;
pub use filter::{EventFilter, SortOrder, TimeBucket};
pub use grid::{DAY_EVENT_DISPLAY_CAP, DayCell, MonthGrid, WEEKDAY_LABELS, build_month_grid};
pub use query::{
    DEFAULT_UPCOMING_LIMIT, events_for_date, events_for_day, format_date_header,
    sort_by_start_time, upcoming_events,
};
pub use store::{EventStore, FileBackend, MemoryBackend, StorageBackend};

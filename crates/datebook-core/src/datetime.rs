use chrono::{DateTime, Datelike, NaiveDate, Utc};

/// Calendar day equality: year, month, and day-of-month all match,
/// ignoring time of day.
#[must_use]
pub fn same_day(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    a.date_naive() == b.date_naive()
}

/// Number of days in the given month, or `None` for an invalid month.
#[must_use]
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some(next.signed_duration_since(first).num_days() as u32)
}

/// Weekday index of the first day of the month, 0 = Sunday.
#[must_use]
pub fn first_weekday_index(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    Some(first.weekday().num_days_from_sunday())
}

/// Long-form display date, e.g. `Monday, March 2, 2026`.
#[must_use]
pub fn format_long(dt: DateTime<Utc>) -> String {
    dt.format("%A, %B %-d, %Y").to_string()
}

/// Clock-time display, e.g. `9:05 AM`.
#[must_use]
pub fn format_clock(dt: DateTime<Utc>) -> String {
    dt.format("%-I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{days_in_month, first_weekday_index, format_clock, format_long, same_day};

    #[test]
    fn same_day_ignores_time_of_day() {
        let morning = Utc.with_ymd_and_hms(2026, 2, 16, 5, 0, 0).unwrap();
        let night = Utc.with_ymd_and_hms(2026, 2, 16, 23, 59, 59).unwrap();
        let next = Utc.with_ymd_and_hms(2026, 2, 17, 0, 0, 0).unwrap();

        assert!(same_day(morning, night));
        assert!(!same_day(night, next));
    }

    #[test]
    fn month_lengths_including_leap_february() {
        assert_eq!(days_in_month(2026, 2), Some(28));
        assert_eq!(days_in_month(2028, 2), Some(29));
        assert_eq!(days_in_month(2026, 8), Some(31));
        assert_eq!(days_in_month(2026, 9), Some(30));
        assert_eq!(days_in_month(2026, 13), None);
    }

    #[test]
    fn first_weekday_index_is_sunday_based() {
        // February 2026 starts on a Sunday, August 2025 on a Friday.
        assert_eq!(first_weekday_index(2026, 2), Some(0));
        assert_eq!(first_weekday_index(2025, 8), Some(5));
        assert_eq!(first_weekday_index(2026, 0), None);
    }

    #[test]
    fn display_formats() {
        let dt = Utc.with_ymd_and_hms(2026, 3, 2, 9, 5, 0).unwrap();
        assert_eq!(format_long(dt), "Monday, March 2, 2026");
        assert_eq!(format_clock(dt), "9:05 AM");
    }
}

//! Rolling day windows shared by the workout metrics.

use chrono::{Days, NaiveDate};
use common::DateRange;

pub const WEEK_DAYS: u64 = 7;
pub const WEEK_COUNT: usize = 4;

/// `count` consecutive, non-overlapping windows of `days` days, the newest
/// ending on `today` (inclusive). Oldest first.
pub fn rolling_windows(today: NaiveDate, count: usize, days: u64) -> Vec<DateRange> {
    let mut windows: Vec<DateRange> = (0..count as u64)
        .map(|back| DateRange::ending_on(today - Days::new(back * days), days))
        .collect();
    windows.reverse();
    windows
}

/// The four rolling weeks ending on `today`, oldest first.
pub fn rolling_weeks(today: NaiveDate) -> Vec<DateRange> {
    rolling_windows(today, WEEK_COUNT, WEEK_DAYS)
}

/// The range covered by `windows`, assuming they are ordered oldest first.
pub fn span(windows: &[DateRange]) -> Option<DateRange> {
    Some(DateRange::new(windows.first()?.start, windows.last()?.end))
}

/// Splits `items` into one bucket per window; items outside every window are dropped.
pub fn bucket<'a, T>(
    windows: &[DateRange],
    items: &'a [T],
    date_of: impl Fn(&T) -> NaiveDate,
) -> Vec<Vec<&'a T>> {
    windows
        .iter()
        .map(|window| {
            items
                .iter()
                .filter(|item| window.contains(date_of(item)))
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_rolling_weeks_are_contiguous_and_oldest_first() {
        let weeks = rolling_weeks(date(2025, 10, 18));

        assert_eq!(weeks.len(), 4);
        assert_eq!(weeks[3], DateRange::new(date(2025, 10, 12), date(2025, 10, 18)));
        assert_eq!(weeks[0], DateRange::new(date(2025, 9, 21), date(2025, 9, 27)));
        for pair in weeks.windows(2) {
            assert_eq!(pair[0].end_exclusive(), pair[1].start);
        }
        assert!(weeks.iter().all(|week| week.days() == 7));
        assert_eq!(span(&weeks).unwrap().days(), 28);
    }

    #[test]
    fn test_bucket_drops_items_outside_windows() {
        let weeks = rolling_weeks(date(2025, 10, 18));
        let days = [date(2025, 9, 20), date(2025, 9, 21), date(2025, 10, 18), date(2025, 10, 19)];

        let buckets = bucket(&weeks, &days, |day| *day);
        assert_eq!(buckets[0], vec![&date(2025, 9, 21)]);
        assert!(buckets[1].is_empty());
        assert_eq!(buckets[3], vec![&date(2025, 10, 18)]);
    }
}

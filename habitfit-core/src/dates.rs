//! Calendar helpers shared by the derivations.
//!
//! Weekdays are numbered 0 (Sunday) through 6 (Saturday).

use chrono::{Datelike, Duration, NaiveDate};

/// Number of days in the rolling weekly series.
pub const WEEK_LEN: u32 = 7;

/// Returns the weekday index of `date`, 0 = Sunday.
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// Returns the `count` calendar days ending at `end`, oldest first.
pub fn trailing_days(end: NaiveDate, count: u32) -> Vec<NaiveDate> {
    (0..count)
        .rev()
        .map(|offset| end - Duration::days(i64::from(offset)))
        .collect()
}

/// Returns every calendar day from `from` to `to` inclusive.
///
/// Empty when `from` is after `to`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> Vec<NaiveDate> {
    from.iter_days().take_while(|day| *day <= to).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_weekday_index_starts_on_sunday() {
        // 2025-01-05 is a Sunday
        assert_eq!(weekday_index(date(2025, 1, 5)), 0);
        assert_eq!(weekday_index(date(2025, 1, 6)), 1);
        assert_eq!(weekday_index(date(2025, 1, 11)), 6);
    }

    #[test]
    fn test_trailing_days_oldest_first() {
        let days = trailing_days(date(2025, 3, 2), WEEK_LEN);
        assert_eq!(days.len(), 7);
        assert_eq!(days[0], date(2025, 2, 24));
        assert_eq!(days[6], date(2025, 3, 2));
    }

    #[test]
    fn test_days_between_inclusive() {
        let days = days_between(date(2024, 12, 30), date(2025, 1, 2));
        assert_eq!(
            days,
            vec![
                date(2024, 12, 30),
                date(2024, 12, 31),
                date(2025, 1, 1),
                date(2025, 1, 2)
            ]
        );
    }

    #[test]
    fn test_days_between_reversed_is_empty() {
        assert!(days_between(date(2025, 1, 2), date(2025, 1, 1)).is_empty());
    }
}

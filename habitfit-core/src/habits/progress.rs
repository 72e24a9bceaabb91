//! Derived views over the habit list.
//!
//! Every function takes the reference date explicitly; none of them read
//! the clock or touch storage.

use chrono::NaiveDate;

use crate::dates::{trailing_days, WEEK_LEN};
use crate::models::{DayProgress, Habit};

/// Habits scheduled on `today`'s weekday, sorted by order.
pub fn todays_habits(habits: &[Habit], today: NaiveDate) -> Vec<&Habit> {
    let mut scheduled: Vec<&Habit> = habits.iter().filter(|h| h.is_scheduled_on(today)).collect();
    scheduled.sort_by_key(|h| h.order);
    scheduled
}

pub fn is_completed_today(habit: &Habit, today: NaiveDate) -> bool {
    habit.is_completed_on(today)
}

/// Consecutive completed days ending today, or ending yesterday when today
/// is not done yet.
///
/// An unfinished today is neither counted nor treated as a gap. If neither
/// today nor yesterday is completed the streak is 0.
pub fn streak(habit: &Habit, today: NaiveDate) -> u32 {
    let start = if habit.is_completed_on(today) {
        Some(today)
    } else {
        today.pred_opt().filter(|day| habit.is_completed_on(*day))
    };
    let Some(mut day) = start else {
        return 0;
    };

    let mut count = 0;
    while habit.is_completed_on(day) {
        count += 1;
        match day.pred_opt() {
            Some(previous) => day = previous,
            None => break,
        }
    }
    count
}

/// Completion of the habits scheduled on `date`'s weekday.
pub fn day_progress(habits: &[Habit], date: NaiveDate) -> DayProgress {
    let scheduled = habits.iter().filter(|h| h.is_scheduled_on(date));
    let (completed, total) = scheduled.fold((0, 0), |(completed, total), habit| {
        (completed + usize::from(habit.is_completed_on(date)), total + 1)
    });
    DayProgress::new(date, completed, total)
}

pub fn today_progress(habits: &[Habit], today: NaiveDate) -> DayProgress {
    day_progress(habits, today)
}

/// Progress for the seven days ending `today`, oldest first.
///
/// Each day counts the habits scheduled on that day's own weekday.
pub fn week_progress(habits: &[Habit], today: NaiveDate) -> Vec<DayProgress> {
    trailing_days(today, WEEK_LEN)
        .into_iter()
        .map(|date| day_progress(habits, date))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::all_days;
    use chrono::Duration;
    use std::collections::BTreeSet;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn days(list: &[u8]) -> BTreeSet<u8> {
        list.iter().copied().collect()
    }

    /// Completed on each of the `n` days ending `end`.
    fn completed_run(end: NaiveDate, n: i64) -> Vec<NaiveDate> {
        (0..n).map(|i| end - Duration::days(i)).collect()
    }

    #[test]
    fn test_streak_counts_today_when_completed() {
        let today = date(2025, 5, 20);
        for n in 1..10 {
            let habit = Habit::new("Read", "📚", all_days(), 0)
                .with_completed_dates(completed_run(today, n));
            assert_eq!(streak(&habit, today), n as u32);
        }
    }

    #[test]
    fn test_streak_skips_unfinished_today() {
        let today = date(2025, 5, 20);
        let yesterday = today - Duration::days(1);
        for n in 1..10 {
            let habit = Habit::new("Read", "📚", all_days(), 0)
                .with_completed_dates(completed_run(yesterday, n));
            assert_eq!(streak(&habit, today), n as u32);
        }
    }

    #[test]
    fn test_streak_zero_when_today_and_yesterday_missed() {
        let today = date(2025, 5, 20);
        let habit = Habit::new("Read", "📚", all_days(), 0)
            .with_completed_dates(completed_run(today - Duration::days(2), 5));
        assert_eq!(streak(&habit, today), 0);

        let empty = Habit::new("Read", "📚", all_days(), 0);
        assert_eq!(streak(&empty, today), 0);
    }

    #[test]
    fn test_streak_stops_at_first_gap() {
        let today = date(2025, 5, 20);
        let habit = Habit::new("Read", "📚", all_days(), 0)
            .with_completed_dates([today, today - Duration::days(2)]);
        assert_eq!(streak(&habit, today), 1);
    }

    #[test]
    fn test_streak_ignores_future_dates() {
        let today = date(2025, 5, 20);
        let habit = Habit::new("Read", "📚", all_days(), 0)
            .with_completed_dates([today + Duration::days(1), today]);
        assert_eq!(streak(&habit, today), 1);
    }

    #[test]
    fn test_todays_habits_filters_and_sorts() {
        // 2025-01-06 is a Monday
        let monday = date(2025, 1, 6);
        let habits = vec![
            Habit::new("Weekend", "🌱", days(&[0, 6]), 0),
            Habit::new("Gym", "💪", days(&[1, 3, 5]), 2),
            Habit::new("Read", "📚", all_days(), 1),
        ];

        let names: Vec<&str> = todays_habits(&habits, monday)
            .iter()
            .map(|h| h.name.as_str())
            .collect();
        assert_eq!(names, vec!["Read", "Gym"]);
    }

    #[test]
    fn test_is_completed_today() {
        let today = date(2025, 1, 6);
        let habit = Habit::new("Read", "📚", all_days(), 0).with_completed_dates([today]);

        assert!(is_completed_today(&habit, today));
        assert!(!is_completed_today(&habit, today + Duration::days(1)));
    }

    #[test]
    fn test_today_progress() {
        let today = date(2025, 1, 6);
        let habits = vec![
            Habit::new("A", "💧", all_days(), 0).with_completed_dates([today]),
            Habit::new("B", "💧", all_days(), 1),
            Habit::new("C", "💧", all_days(), 2),
            // Not scheduled on Mondays; completion must not count
            Habit::new("D", "💧", days(&[2]), 3).with_completed_dates([today]),
        ];

        let progress = today_progress(&habits, today);
        assert_eq!(progress.completed, 1);
        assert_eq!(progress.total, 3);
        assert_eq!(progress.percentage, 33);
        assert_eq!(progress.date, today);
    }

    #[test]
    fn test_today_progress_with_nothing_scheduled() {
        let progress = today_progress(&[], date(2025, 1, 6));
        assert_eq!(progress.total, 0);
        assert_eq!(progress.percentage, 0);
    }

    #[test]
    fn test_week_progress_uses_each_days_schedule() {
        // Window Thu 2025-01-02 .. Wed 2025-01-08, completion on Wed 2025-01-08
        let wednesday = date(2025, 1, 8);
        let habits = vec![Habit::new("Gym", "💪", days(&[1, 3, 5]), 0)
            .with_completed_dates([wednesday])];

        let week = week_progress(&habits, wednesday);
        assert_eq!(week.len(), 7);
        assert_eq!(week[0].date, date(2025, 1, 2));
        assert_eq!(week[6].date, wednesday);

        let totals: Vec<usize> = week.iter().map(|d| d.total).collect();
        // Thu Fri Sat Sun Mon Tue Wed
        assert_eq!(totals, vec![0, 1, 0, 0, 1, 0, 1]);

        let completed: Vec<usize> = week.iter().map(|d| d.completed).collect();
        assert_eq!(completed, vec![0, 0, 0, 0, 0, 0, 1]);
        assert_eq!(week[6].percentage, 100);
        assert_eq!(week[4].percentage, 0);
    }

    #[test]
    fn test_week_progress_window_containing_wednesday() {
        // Completion on a Wednesday in the middle of the window
        let wednesday = date(2025, 1, 8);
        let today = date(2025, 1, 11); // Saturday
        let habits = vec![
            Habit::new("Gym", "💪", days(&[1, 3, 5]), 0).with_completed_dates([wednesday]),
            Habit::new("Read", "📚", all_days(), 1),
        ];

        let week = week_progress(&habits, today);
        let wed = week.iter().find(|d| d.date == wednesday).unwrap();
        assert_eq!(wed.total, 2);
        assert_eq!(wed.completed, 1);
        assert_eq!(wed.percentage, 50);

        let tuesday = week.iter().find(|d| d.date == date(2025, 1, 7)).unwrap();
        assert_eq!(tuesday.total, 1);
    }
}

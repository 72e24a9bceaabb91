use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use uuid::Uuid;

use super::schedule::format_schedule;
use crate::dates::weekday_index;

/// A recurring habit tracked per calendar day.
///
/// Serialized with camelCase field names; this is the persisted layout of
/// the habit collection record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: String,
    pub name: String,
    pub emoji: String,
    pub created_at: DateTime<Utc>,
    pub completed_dates: BTreeSet<NaiveDate>,
    pub scheduled_days: BTreeSet<u8>,
    pub order: usize,
}

impl Habit {
    pub fn new(
        name: impl Into<String>,
        emoji: impl Into<String>,
        scheduled_days: BTreeSet<u8>,
        order: usize,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            emoji: emoji.into(),
            created_at: Utc::now(),
            completed_dates: BTreeSet::new(),
            scheduled_days,
            order,
        }
    }

    pub fn with_completed_dates(mut self, dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.completed_dates = dates.into_iter().collect();
        self
    }

    pub fn is_completed_on(&self, date: NaiveDate) -> bool {
        self.completed_dates.contains(&date)
    }

    pub fn is_scheduled_on(&self, date: NaiveDate) -> bool {
        self.scheduled_days.contains(&weekday_index(date))
    }

    /// Flips completion for `date`. Returns whether the habit is now
    /// completed on that date.
    pub fn toggle_on(&mut self, date: NaiveDate) -> bool {
        if self.completed_dates.remove(&date) {
            false
        } else {
            self.completed_dates.insert(date);
            true
        }
    }
}

impl fmt::Display for Habit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({})",
            self.emoji,
            self.name,
            format_schedule(&self.scheduled_days)
        )
    }
}

/// Replacement values for a habit's editable fields.
#[derive(Debug, Clone, PartialEq)]
pub struct HabitUpdate {
    pub name: String,
    pub emoji: String,
    pub scheduled_days: BTreeSet<u8>,
}

/// Completion summary for a single calendar day. Derived, never persisted.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct DayProgress {
    pub date: NaiveDate,
    pub completed: usize,
    pub total: usize,
    pub percentage: u8,
}

impl DayProgress {
    pub fn new(date: NaiveDate, completed: usize, total: usize) -> Self {
        let percentage = if total > 0 {
            ((completed as f64 / total as f64) * 100.0).round() as u8
        } else {
            0
        };
        Self {
            date,
            completed,
            total,
            percentage,
        }
    }
}

impl fmt::Display for DayProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}/{} ({}%)",
            self.date, self.completed, self.total, self.percentage
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::schedule::all_days;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_habit_new() {
        let habit = Habit::new("Read", "📚", all_days(), 3);

        assert_eq!(habit.name, "Read");
        assert_eq!(habit.emoji, "📚");
        assert_eq!(habit.order, 3);
        assert!(habit.completed_dates.is_empty());
        assert_eq!(habit.scheduled_days.len(), 7);
        assert!(!habit.id.is_empty());
    }

    #[test]
    fn test_habit_ids_are_unique() {
        let a = Habit::new("A", "💧", all_days(), 0);
        let b = Habit::new("A", "💧", all_days(), 1);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_toggle_on_flips() {
        let mut habit = Habit::new("Meditate", "🧘", all_days(), 0);
        let day = date(2025, 6, 1);

        assert!(habit.toggle_on(day));
        assert!(habit.is_completed_on(day));
        assert!(!habit.toggle_on(day));
        assert!(!habit.is_completed_on(day));
    }

    #[test]
    fn test_is_scheduled_on() {
        let habit = Habit::new("Gym", "💪", [1, 3, 5].into_iter().collect(), 0);

        assert!(habit.is_scheduled_on(date(2025, 1, 6))); // Monday
        assert!(!habit.is_scheduled_on(date(2025, 1, 7))); // Tuesday
    }

    #[test]
    fn test_json_layout_is_camel_case() {
        let habit = Habit::new("Read", "📚", all_days(), 0)
            .with_completed_dates([date(2025, 1, 2), date(2025, 1, 1)]);
        let json = serde_json::to_value(&habit).unwrap();

        assert!(json.get("createdAt").is_some());
        assert!(json.get("scheduledDays").is_some());
        assert_eq!(
            json["completedDates"],
            serde_json::json!(["2025-01-01", "2025-01-02"])
        );
    }

    #[test]
    fn test_day_progress_percentage() {
        let day = date(2025, 1, 1);
        assert_eq!(DayProgress::new(day, 1, 3).percentage, 33);
        assert_eq!(DayProgress::new(day, 2, 3).percentage, 67);
        assert_eq!(DayProgress::new(day, 0, 0).percentage, 0);
        assert_eq!(DayProgress::new(day, 4, 4).percentage, 100);
    }

    #[test]
    fn test_day_progress_display() {
        let progress = DayProgress::new(date(2025, 1, 1), 1, 2);
        assert_eq!(progress.to_string(), "2025-01-01: 1/2 (50%)");
    }
}

//! Versioned load of the habit collection record.
//!
//! Record history:
//! - v0: habits have no `scheduledDays` and no `order`
//! - v1: `scheduledDays` added (missing means every day)
//! - v2: `order` added (missing means position in the stored array)
//!
//! The record carries no version tag, so every step is detected per field
//! and applied once when the store is constructed.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use std::collections::BTreeSet;

use crate::models::{all_days, Habit};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredHabit {
    id: String,
    name: String,
    #[serde(default)]
    emoji: String,
    created_at: DateTime<Utc>,
    #[serde(default)]
    completed_dates: Vec<NaiveDate>,
    #[serde(default)]
    scheduled_days: Option<Vec<u8>>,
    #[serde(default)]
    order: Option<usize>,
}

/// What the load step had to repair.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    pub filled_schedules: usize,
    pub filled_orders: usize,
    pub dropped_duplicate_dates: usize,
    pub dropped_invalid_days: usize,
}

impl MigrationReport {
    pub fn is_clean(&self) -> bool {
        *self == Self::default()
    }
}

/// Parses a stored habit record, upgrading it to the current layout.
///
/// The result is sorted by order and renumbered densely from zero.
pub fn load_habits(json: &str) -> Result<(Vec<Habit>, MigrationReport), serde_json::Error> {
    let stored: Vec<StoredHabit> = serde_json::from_str(json)?;
    let mut report = MigrationReport::default();

    let mut habits: Vec<Habit> = stored
        .into_iter()
        .enumerate()
        .map(|(index, habit)| upgrade(index, habit, &mut report))
        .collect();

    habits.sort_by_key(|habit| habit.order);
    normalize_order(&mut habits);

    Ok((habits, report))
}

fn upgrade(index: usize, stored: StoredHabit, report: &mut MigrationReport) -> Habit {
    let stored_dates = stored.completed_dates.len();
    let completed_dates: BTreeSet<NaiveDate> = stored.completed_dates.into_iter().collect();
    report.dropped_duplicate_dates += stored_dates - completed_dates.len();

    let scheduled_days = match stored.scheduled_days {
        Some(days) => {
            report.dropped_invalid_days += days.iter().filter(|d| **d >= 7).count();
            days.into_iter().filter(|d| *d < 7).collect()
        }
        None => {
            report.filled_schedules += 1;
            all_days()
        }
    };

    let order = stored.order.unwrap_or_else(|| {
        report.filled_orders += 1;
        index
    });

    Habit {
        id: stored.id,
        name: stored.name,
        emoji: stored.emoji,
        created_at: stored.created_at,
        completed_dates,
        scheduled_days,
        order,
    }
}

/// Reassigns orders 0..n-1 following the current sequence.
pub(crate) fn normalize_order(habits: &mut [Habit]) {
    for (index, habit) in habits.iter_mut().enumerate() {
        habit.order = index;
    }
}

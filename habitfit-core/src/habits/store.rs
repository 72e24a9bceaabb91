use chrono::NaiveDate;
use std::collections::BTreeSet;

use super::migrate::{load_habits, normalize_order};
use crate::error::StoreError;
use crate::models::{all_days, Habit, HabitUpdate};
use crate::storage::KeyValueStorage;

/// Storage key of the habit collection record.
pub const HABITS_KEY: &str = "habit-tracker-data";

const DEFAULT_HABITS: [(&str, &str); 4] = [
    ("Drink Water", "💧"),
    ("Exercise", "🏃"),
    ("Read", "📚"),
    ("Meditate", "🧘"),
];

/// Owns the habit list and writes it through to storage.
///
/// Habits are kept sorted by `order`, and orders are always `0..n-1`.
///
/// Every mutation builds the next state, persists it, and only then swaps
/// it in. A failed write returns the error and leaves the in-memory state
/// untouched. Mutations on an unknown id are no-ops reported through the
/// return value.
pub struct HabitStore<S> {
    storage: S,
    habits: Vec<Habit>,
}

impl<S: KeyValueStorage> HabitStore<S> {
    /// Loads the habit record, migrating older layouts.
    ///
    /// An absent record yields an empty store.
    pub fn load(storage: S) -> Result<Self, StoreError> {
        let habits = Self::read(&storage)?.unwrap_or_default();
        Ok(Self { storage, habits })
    }

    /// Like [`HabitStore::load`], but seeds and persists the default habits
    /// when no record exists yet. An existing empty list is left alone.
    pub fn load_or_seed(storage: S) -> Result<Self, StoreError> {
        match Self::read(&storage)? {
            Some(habits) => Ok(Self { storage, habits }),
            None => {
                let mut store = Self {
                    storage,
                    habits: Vec::new(),
                };
                let defaults = DEFAULT_HABITS
                    .iter()
                    .enumerate()
                    .map(|(order, (name, emoji))| Habit::new(*name, *emoji, all_days(), order))
                    .collect();
                store.commit(defaults)?;
                tracing::info!("Seeded {} default habit(s)", store.habits.len());
                Ok(store)
            }
        }
    }

    fn read(storage: &S) -> Result<Option<Vec<Habit>>, StoreError> {
        let Some(json) = storage.get(HABITS_KEY)? else {
            tracing::info!("No habit record found, starting with 0 habits");
            return Ok(None);
        };

        let (habits, report) = load_habits(&json).map_err(|source| StoreError::Decode {
            key: HABITS_KEY,
            source,
        })?;
        if !report.is_clean() {
            tracing::warn!("Migrated habit record: {:?}", report);
        }
        tracing::info!("Loaded {} habit(s)", habits.len());
        Ok(Some(habits))
    }

    /// All habits, sorted by order.
    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn len(&self) -> usize {
        self.habits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.habits.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == id)
    }

    /// Looks a habit up by id, then by case-insensitive name.
    pub fn find(&self, query: &str) -> Option<&Habit> {
        self.get(query).or_else(|| {
            self.habits
                .iter()
                .find(|h| h.name.eq_ignore_ascii_case(query.trim()))
        })
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.habits.iter().position(|h| h.id == id)
    }

    /// Appends a new habit. `None` schedules it on every day.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        emoji: impl Into<String>,
        scheduled_days: Option<BTreeSet<u8>>,
    ) -> Result<Habit, StoreError> {
        let habit = Habit::new(
            name,
            emoji,
            scheduled_days.unwrap_or_else(all_days),
            self.habits.len(),
        );

        let mut next = self.habits.clone();
        next.push(habit.clone());
        self.commit(next)?;

        Ok(habit)
    }

    /// Replaces name, emoji and schedule. Returns `false` if `id` is unknown.
    pub fn update(&mut self, id: &str, update: HabitUpdate) -> Result<bool, StoreError> {
        let Some(index) = self.position(id) else {
            return Ok(false);
        };

        let mut next = self.habits.clone();
        let habit = &mut next[index];
        habit.name = update.name;
        habit.emoji = update.emoji;
        habit.scheduled_days = update.scheduled_days;
        self.commit(next)?;

        Ok(true)
    }

    /// Deletes a habit and compacts the remaining orders.
    pub fn remove(&mut self, id: &str) -> Result<bool, StoreError> {
        let Some(index) = self.position(id) else {
            return Ok(false);
        };

        let mut next = self.habits.clone();
        next.remove(index);
        normalize_order(&mut next);
        self.commit(next)?;

        Ok(true)
    }

    /// Moves the habit at `from` to `to` in the ordered sequence.
    ///
    /// `to` past the end moves the habit last. Returns `false` when `from`
    /// is out of range.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<bool, StoreError> {
        if from >= self.habits.len() {
            return Ok(false);
        }

        let mut next = self.habits.clone();
        let moved = next.remove(from);
        let to = to.min(next.len());
        next.insert(to, moved);
        normalize_order(&mut next);
        self.commit(next)?;

        Ok(true)
    }

    /// Flips completion of `today` for a habit.
    ///
    /// Returns the new completion state, or `None` if `id` is unknown.
    pub fn toggle(&mut self, id: &str, today: NaiveDate) -> Result<Option<bool>, StoreError> {
        let Some(index) = self.position(id) else {
            return Ok(None);
        };

        let mut next = self.habits.clone();
        let completed = next[index].toggle_on(today);
        self.commit(next)?;

        Ok(Some(completed))
    }

    fn commit(&mut self, next: Vec<Habit>) -> Result<(), StoreError> {
        let json = serde_json::to_string(&next).map_err(|source| StoreError::Encode {
            key: HABITS_KEY,
            source,
        })?;
        self.storage.set(HABITS_KEY, &json)?;
        tracing::debug!("Persisted {} habit(s)", next.len());

        self.habits = next;
        Ok(())
    }
}

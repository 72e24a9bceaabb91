//! Habit engine: the habit store and the derivations computed from it.

mod migrate;
mod progress;
mod store;

pub use migrate::{load_habits, MigrationReport};
pub use progress::{
    day_progress, is_completed_today, streak, today_progress, todays_habits, week_progress,
};
pub use store::{HabitStore, HABITS_KEY};

//! Habitfit Core Library
//!
//! Habit scheduling and streak engine, nutrition goal and aggregation engine,
//! and the food classification adapter shared by habitfit front ends.
//!
//! Both engines follow the same shape: a store owns the canonical records and
//! writes them through a [`KeyValueStorage`] provider on every mutation, and a
//! set of pure derivation functions compute views from the store's state plus
//! an explicit reference date.

pub mod dates;
pub mod error;
pub mod food;
pub mod habits;
pub mod models;
pub mod nutrition;
pub mod storage;

pub use error::StoreError;
pub use food::{lookup_nutrition, match_food_from_label, FoodEntry, FoodMatch, FALLBACK_FOOD};
pub use habits::HabitStore;
pub use models::{
    DailyLog, DayProgress, Habit, HabitUpdate, Meal, NewMeal, NutritionFacts, ProfileUpdate,
    ScheduleError, UserProfile,
};
pub use nutrition::{daily_calorie_goal, NutritionStore};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};

mod habit;
mod meal;
mod profile;
mod schedule;

pub use habit::{DayProgress, Habit, HabitUpdate};
pub use meal::{local_now, DailyLog, Meal, NewMeal, NutritionFacts};
pub(crate) use meal::round_non_negative;
pub use profile::{ProfileUpdate, UserProfile};
pub use schedule::{all_days, format_schedule, parse_schedule, ScheduleError};

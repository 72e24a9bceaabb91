//! Derived views over the meal log and profile.
//!
//! All functions are pure: the reference date and the viewer's time zone are
//! passed in and nothing is written back. Meals are bucketed by the calendar
//! date of their timestamp converted to that zone.

use chrono::{NaiveDate, TimeZone};
use serde::Serialize;

use crate::dates::{days_between, trailing_days, WEEK_LEN};
use crate::models::{DailyLog, Meal, NutritionFacts, UserProfile};

/// Summed calories and macros for one day plus the meal count.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct NutritionTotals {
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
    pub meals_count: usize,
}

impl NutritionTotals {
    pub fn from_meals<'a>(meals: impl IntoIterator<Item = &'a Meal>) -> Self {
        let (facts, meals_count) = meals
            .into_iter()
            .fold((NutritionFacts::default(), 0), |(acc, count), meal| {
                (acc + meal.facts(), count + 1)
            });
        Self {
            calories: facts.calories,
            protein: facts.protein,
            carbs: facts.carbs,
            fat: facts.fat,
            meals_count,
        }
    }
}

/// Consumption against the daily goal.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct CalorieSummary {
    pub consumed: u32,
    pub goal: u32,
    pub remaining: u32,
    /// Percent of goal, capped at 100.
    pub progress: f64,
    pub over_goal: bool,
}

/// Share of total macro grams, in percent.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct MacroSplit {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// Meals whose calendar date in `tz` is `date`, in insertion order.
pub fn meals_on<'a>(meals: &'a [Meal], date: NaiveDate, tz: &impl TimeZone) -> Vec<&'a Meal> {
    meals
        .iter()
        .filter(|m| m.local_date_in(tz) == date)
        .collect()
}

pub fn todays_meals<'a>(meals: &'a [Meal], today: NaiveDate, tz: &impl TimeZone) -> Vec<&'a Meal> {
    meals_on(meals, today, tz)
}

pub fn todays_nutrition(meals: &[Meal], today: NaiveDate, tz: &impl TimeZone) -> NutritionTotals {
    NutritionTotals::from_meals(todays_meals(meals, today, tz))
}

/// `min(100, 100 * calories / goal)`; 0 without a profile.
///
/// A goal of 0 (only reachable through out-of-range inputs) also yields 0.
pub fn calorie_progress(
    profile: Option<&UserProfile>,
    meals: &[Meal],
    today: NaiveDate,
    tz: &impl TimeZone,
) -> f64 {
    let Some(profile) = profile else {
        return 0.0;
    };
    if profile.daily_calorie_goal == 0 {
        return 0.0;
    }

    let calories = todays_nutrition(meals, today, tz).calories;
    (f64::from(calories) / f64::from(profile.daily_calorie_goal) * 100.0).min(100.0)
}

pub fn calorie_summary(
    profile: &UserProfile,
    meals: &[Meal],
    today: NaiveDate,
    tz: &impl TimeZone,
) -> CalorieSummary {
    let consumed = todays_nutrition(meals, today, tz).calories;
    let goal = profile.daily_calorie_goal;
    CalorieSummary {
        consumed,
        goal,
        remaining: goal.saturating_sub(consumed),
        progress: calorie_progress(Some(profile), meals, today, tz),
        over_goal: consumed >= goal,
    }
}

/// Macro shares of `totals`; one third each when nothing was eaten.
pub fn macro_split(totals: &NutritionTotals) -> MacroSplit {
    let total = f64::from(totals.protein) + f64::from(totals.carbs) + f64::from(totals.fat);
    if total == 0.0 {
        let third = 100.0 / 3.0;
        return MacroSplit {
            protein: third,
            carbs: third,
            fat: third,
        };
    }

    MacroSplit {
        protein: f64::from(totals.protein) / total * 100.0,
        carbs: f64::from(totals.carbs) / total * 100.0,
        fat: f64::from(totals.fat) / total * 100.0,
    }
}

/// One log per calendar day from `from` to `to` inclusive, empty days
/// included.
pub fn daily_logs(
    meals: &[Meal],
    from: NaiveDate,
    to: NaiveDate,
    tz: &impl TimeZone,
) -> Vec<DailyLog> {
    days_between(from, to)
        .into_iter()
        .map(|date| log_for(meals, date, tz))
        .collect()
}

/// Logs for the seven days ending `today`, oldest first.
pub fn weekly_data(meals: &[Meal], today: NaiveDate, tz: &impl TimeZone) -> Vec<DailyLog> {
    trailing_days(today, WEEK_LEN)
        .into_iter()
        .map(|date| log_for(meals, date, tz))
        .collect()
}

fn log_for(meals: &[Meal], date: NaiveDate, tz: &impl TimeZone) -> DailyLog {
    DailyLog::new(date, meals_on(meals, date, tz).into_iter().cloned().collect())
}

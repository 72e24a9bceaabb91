//! Nutrition engine: profile and meal store, calorie goal formula, and the
//! derivations computed from them.

mod calories;
mod store;
mod summary;

pub use calories::{
    basal_metabolic_rate, daily_calorie_goal, total_daily_energy_expenditure,
    ACTIVITY_MULTIPLIER, CALORIE_SURPLUS,
};
pub use store::{NutritionStore, MEALS_KEY, PROFILE_KEY};
pub use summary::{
    calorie_progress, calorie_summary, daily_logs, macro_split, meals_on, todays_meals,
    todays_nutrition, weekly_data, CalorieSummary, MacroSplit, NutritionTotals,
};

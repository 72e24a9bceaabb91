//! Daily calorie goal.
//!
//! Mifflin-St Jeor BMR (male constant), scaled by a fixed moderate activity
//! multiplier, plus a fixed surplus for weight gain. The constants are
//! product decisions and are not user-configurable.

/// Moderately active: exercise 3-5 days/week.
pub const ACTIVITY_MULTIPLIER: f64 = 1.55;

/// Weight-gain surplus in kcal/day.
pub const CALORIE_SURPLUS: f64 = 500.0;

/// Basal Metabolic Rate in kcal/day.
///
/// Formula: BMR = 10 x weight(kg) + 6.25 x height(cm) - 5 x age + 5
pub fn basal_metabolic_rate(age: u32, weight_kg: f64, height_cm: f64) -> f64 {
    10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age) + 5.0
}

/// Total Daily Energy Expenditure in kcal/day.
pub fn total_daily_energy_expenditure(age: u32, weight_kg: f64, height_cm: f64) -> f64 {
    basal_metabolic_rate(age, weight_kg, height_cm) * ACTIVITY_MULTIPLIER
}

/// Daily calorie goal: `round(TDEE + 500)`.
///
/// Inputs are expected to be positive; out-of-range inputs that would give a
/// negative goal saturate at 0.
pub fn daily_calorie_goal(age: u32, weight_kg: f64, height_cm: f64) -> u32 {
    let goal = total_daily_energy_expenditure(age, weight_kg, height_cm) + CALORIE_SURPLUS;
    goal.round().max(0.0) as u32
}

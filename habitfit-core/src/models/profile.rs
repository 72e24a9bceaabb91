use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::nutrition::daily_calorie_goal;

/// The user's body metrics and the calorie goal derived from them.
///
/// `daily_calorie_goal` is recomputed from age, weight and height whenever
/// the profile is created or updated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub age: u32,
    /// Kilograms
    pub weight: f64,
    /// Centimeters
    pub height: f64,
    pub daily_calorie_goal: u32,
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn new(age: u32, weight: f64, height: f64) -> Self {
        Self {
            age,
            weight,
            height,
            daily_calorie_goal: daily_calorie_goal(age, weight, height),
            created_at: Utc::now(),
        }
    }

    /// Merges `update` into the profile, recomputing the goal when any body
    /// metric was provided.
    pub fn apply(&mut self, update: &ProfileUpdate) {
        if update.is_empty() {
            return;
        }

        self.age = update.age.unwrap_or(self.age);
        self.weight = update.weight.unwrap_or(self.weight);
        self.height = update.height.unwrap_or(self.height);
        self.daily_calorie_goal = daily_calorie_goal(self.age, self.weight, self.height);
    }
}

impl fmt::Display for UserProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Profile")?;
        writeln!(f, "{}", "=".repeat(30))?;
        writeln!(f, "Age:    {}", self.age)?;
        writeln!(f, "Weight: {} kg", self.weight)?;
        writeln!(f, "Height: {} cm", self.height)?;
        write!(f, "Daily calorie goal: {} kcal", self.daily_calorie_goal)
    }
}

/// A partial profile update. `None` fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub age: Option<u32>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.age.is_none() && self.weight.is_none() && self.height.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_new_computes_goal() {
        let profile = UserProfile::new(25, 70.0, 175.0);
        assert_eq!(profile.daily_calorie_goal, daily_calorie_goal(25, 70.0, 175.0));
    }

    #[test]
    fn test_apply_partial_update_recomputes_goal() {
        let mut profile = UserProfile::new(25, 70.0, 175.0);
        let before = profile.daily_calorie_goal;

        profile.apply(&ProfileUpdate {
            weight: Some(80.0),
            ..Default::default()
        });

        assert_eq!(profile.age, 25);
        assert_eq!(profile.weight, 80.0);
        assert_eq!(profile.height, 175.0);
        assert_eq!(profile.daily_calorie_goal, daily_calorie_goal(25, 80.0, 175.0));
        // 10 kcal per kg, times the activity multiplier
        assert_eq!(profile.daily_calorie_goal, before + 155);
    }

    #[test]
    fn test_apply_empty_update_is_noop() {
        let mut profile = UserProfile::new(30, 60.0, 165.0);
        let snapshot = profile.clone();

        profile.apply(&ProfileUpdate::default());
        assert_eq!(profile, snapshot);
    }

    #[test]
    fn test_json_layout_is_camel_case() {
        let profile = UserProfile::new(25, 70.0, 175.0);
        let json = serde_json::to_value(&profile).unwrap();

        assert_eq!(json["dailyCalorieGoal"], profile.daily_calorie_goal);
        assert!(json.get("createdAt").is_some());
    }
}

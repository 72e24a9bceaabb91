use std::fmt;

use serde::Serialize;

use super::table::{lookup, FoodEntry, FALLBACK_FOOD, FOOD_TABLE, KEYWORD_MAPPINGS};
use crate::models::{round_non_negative, NutritionFacts};

impl FoodEntry {
    /// Values for one serving, each field rounded independently.
    pub fn per_serving(&self) -> NutritionFacts {
        let scale = |per_100g: f64| round_non_negative(per_100g * self.serving_size / 100.0);
        NutritionFacts {
            calories: scale(self.calories),
            protein: scale(self.protein),
            carbs: scale(self.carbs),
            fat: scale(self.fat),
        }
    }
}

/// Maps a free-text label to a key of the nutrition table.
///
/// Precedence: exact key, then the first key (in table order) that is a
/// substring of the label or contains it, then the first keyword mapping
/// found in the label, then [`FALLBACK_FOOD`]. Matching is case-insensitive;
/// whitespace is significant, so an empty label matches the first table key.
pub fn match_food_from_label(label: &str) -> &'static str {
    let label = label.to_lowercase();

    if let Some((key, _)) = FOOD_TABLE.iter().find(|(key, _)| *key == label) {
        return *key;
    }

    if let Some((key, _)) = FOOD_TABLE
        .iter()
        .find(|(key, _)| label.contains(key) || key.contains(label.as_str()))
    {
        return *key;
    }

    KEYWORD_MAPPINGS
        .iter()
        .find(|(keyword, _)| label.contains(keyword))
        .map(|(_, key)| *key)
        .unwrap_or(FALLBACK_FOOD)
}

/// Nutrition for `servings` servings of `key`, or `None` for an unknown key.
///
/// Rounded once per serving and again after scaling.
pub fn lookup_nutrition(key: &str, servings: f64) -> Option<NutritionFacts> {
    let entry = lookup(key)?;
    Some(entry.per_serving().scaled(servings))
}

/// A classified label together with the nutrition of the matched food.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoodMatch {
    pub label: String,
    pub key: &'static str,
    pub servings: f64,
    pub facts: NutritionFacts,
}

impl FoodMatch {
    pub fn classify(label: &str, servings: f64) -> Self {
        let key = match_food_from_label(label);
        // every key returned by the matcher is in the table
        let facts = lookup_nutrition(key, servings).unwrap_or_default();
        tracing::debug!("Matched label '{}' to '{}'", label, key);

        Self {
            label: label.to_string(),
            key,
            servings,
            facts,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.key == FALLBACK_FOOD
    }
}

impl fmt::Display for FoodMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x{} -> {}", self.key, self.servings, self.facts)
    }
}

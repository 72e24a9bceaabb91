//! Food classification: maps free-text labels onto the static nutrition
//! table and scales the matched entry by servings.

mod matcher;
mod table;

pub use matcher::{lookup_nutrition, match_food_from_label, FoodMatch};
pub use table::{lookup, FoodEntry, FALLBACK_FOOD, FOOD_TABLE, KEYWORD_MAPPINGS};

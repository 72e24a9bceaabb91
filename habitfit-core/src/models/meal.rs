use chrono::{DateTime, FixedOffset, Local, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;
use uuid::Uuid;

/// Calories (kcal) and macros (grams), rounded to whole numbers.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NutritionFacts {
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
}

impl NutritionFacts {
    pub fn new(calories: u32, protein: u32, carbs: u32, fat: u32) -> Self {
        Self {
            calories,
            protein,
            carbs,
            fat,
        }
    }

    /// Multiplies every field by `servings`, rounding each independently.
    pub fn scaled(&self, servings: f64) -> Self {
        let scale = |v: u32| round_non_negative(f64::from(v) * servings);
        Self {
            calories: scale(self.calories),
            protein: scale(self.protein),
            carbs: scale(self.carbs),
            fat: scale(self.fat),
        }
    }
}

impl Add for NutritionFacts {
    type Output = Self;

    /// Saturates at `u32::MAX` per field.
    fn add(self, other: Self) -> Self {
        Self {
            calories: self.calories.saturating_add(other.calories),
            protein: self.protein.saturating_add(other.protein),
            carbs: self.carbs.saturating_add(other.carbs),
            fat: self.fat.saturating_add(other.fat),
        }
    }
}

impl fmt::Display for NutritionFacts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Calories: {} | Protein: {}g | Carbs: {}g | Fat: {}g",
            self.calories, self.protein, self.carbs, self.fat
        )
    }
}

pub(crate) fn round_non_negative(value: f64) -> u32 {
    value.round().max(0.0) as u32
}

/// A logged meal.
///
/// The timestamp keeps the UTC offset it was logged with, but day bucketing
/// converts it to the viewer's zone first: a meal logged at `02:00Z` counts
/// toward the previous day in New York.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub id: String,
    pub name: String,
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub timestamp: DateTime<FixedOffset>,
}

impl Meal {
    /// Creates a meal from `fields`, stamped with `timestamp`.
    pub fn from_new(fields: NewMeal, timestamp: DateTime<FixedOffset>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: fields.name,
            calories: fields.facts.calories,
            protein: fields.facts.protein,
            carbs: fields.facts.carbs,
            fat: fields.facts.fat,
            image_url: fields.image_url,
            timestamp,
        }
    }

    /// The calendar day this meal counts toward in `tz`.
    pub fn local_date_in(&self, tz: &impl TimeZone) -> NaiveDate {
        self.timestamp.with_timezone(tz).date_naive()
    }

    pub fn facts(&self) -> NutritionFacts {
        NutritionFacts::new(self.calories, self.protein, self.carbs, self.fat)
    }
}

impl fmt::Display for Meal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} - {}",
            self.timestamp.with_timezone(&Local).format("%H:%M"),
            self.name,
            self.facts()
        )
    }
}

/// Caller-supplied fields for a new meal; id and timestamp are stamped by
/// the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMeal {
    pub name: String,
    pub facts: NutritionFacts,
    pub image_url: Option<String>,
}

impl NewMeal {
    pub fn new(name: impl Into<String>, facts: NutritionFacts) -> Self {
        Self {
            name: name.into(),
            facts,
            image_url: None,
        }
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }
}

/// Current wall-clock time with the local UTC offset.
pub fn local_now() -> DateTime<FixedOffset> {
    Local::now().into()
}

/// Meals logged on one calendar day and their totals. Derived, never
/// persisted.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DailyLog {
    pub date: NaiveDate,
    pub meals: Vec<Meal>,
    pub total_calories: u32,
    pub total_protein: u32,
    pub total_carbs: u32,
    pub total_fat: u32,
}

impl DailyLog {
    pub fn new(date: NaiveDate, meals: Vec<Meal>) -> Self {
        let totals = meals
            .iter()
            .map(Meal::facts)
            .fold(NutritionFacts::default(), |acc, facts| acc + facts);
        Self {
            date,
            meals,
            total_calories: totals.calories,
            total_protein: totals.protein,
            total_carbs: totals.carbs,
            total_fat: totals.fat,
        }
    }

    pub fn totals(&self) -> NutritionFacts {
        NutritionFacts::new(
            self.total_calories,
            self.total_protein,
            self.total_carbs,
            self.total_fat,
        )
    }
}

use chrono::{DateTime, FixedOffset};

use crate::error::StoreError;
use crate::models::{local_now, Meal, NewMeal, ProfileUpdate, UserProfile};
use crate::storage::KeyValueStorage;

/// Storage key of the profile record.
pub const PROFILE_KEY: &str = "nutrition_profile";

/// Storage key of the meal collection record.
pub const MEALS_KEY: &str = "nutrition_meals";

/// Owns the user profile and the meal log.
///
/// The profile and the meal list are separate records; each mutation writes
/// only the record it changed, before updating in-memory state.
pub struct NutritionStore<S> {
    storage: S,
    profile: Option<UserProfile>,
    meals: Vec<Meal>,
}

impl<S: KeyValueStorage> NutritionStore<S> {
    pub fn load(storage: S) -> Result<Self, StoreError> {
        let profile: Option<UserProfile> = match storage.get(PROFILE_KEY)? {
            Some(json) => Some(serde_json::from_str(&json).map_err(|source| {
                StoreError::Decode {
                    key: PROFILE_KEY,
                    source,
                }
            })?),
            None => None,
        };

        let meals: Vec<Meal> = match storage.get(MEALS_KEY)? {
            Some(json) => serde_json::from_str(&json).map_err(|source| StoreError::Decode {
                key: MEALS_KEY,
                source,
            })?,
            None => Vec::new(),
        };

        tracing::info!(
            "Loaded {} meal(s), profile {}",
            meals.len(),
            if profile.is_some() { "present" } else { "absent" }
        );

        Ok(Self {
            storage,
            profile,
            meals,
        })
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    /// Meals in insertion order.
    pub fn meals(&self) -> &[Meal] {
        &self.meals
    }

    pub fn get_meal(&self, id: &str) -> Option<&Meal> {
        self.meals.iter().find(|m| m.id == id)
    }

    /// Creates the profile, replacing any existing one.
    pub fn setup_profile(
        &mut self,
        age: u32,
        weight: f64,
        height: f64,
    ) -> Result<UserProfile, StoreError> {
        let profile = UserProfile::new(age, weight, height);
        self.commit_profile(profile.clone())?;
        Ok(profile)
    }

    /// Merges `update` into the profile. Returns `false` when there is no
    /// profile to update.
    pub fn update_profile(&mut self, update: &ProfileUpdate) -> Result<bool, StoreError> {
        let Some(current) = &self.profile else {
            return Ok(false);
        };

        let mut next = current.clone();
        next.apply(update);
        self.commit_profile(next)?;

        Ok(true)
    }

    /// Logs a meal stamped with the current local time.
    pub fn add_meal(&mut self, fields: NewMeal) -> Result<Meal, StoreError> {
        self.add_meal_at(fields, local_now())
    }

    /// Logs a meal with an explicit timestamp.
    pub fn add_meal_at(
        &mut self,
        fields: NewMeal,
        timestamp: DateTime<FixedOffset>,
    ) -> Result<Meal, StoreError> {
        let meal = Meal::from_new(fields, timestamp);

        let mut next = self.meals.clone();
        next.push(meal.clone());
        self.commit_meals(next)?;

        Ok(meal)
    }

    /// Deletes a meal. Returns `false` if `id` is unknown.
    pub fn remove_meal(&mut self, id: &str) -> Result<bool, StoreError> {
        if self.get_meal(id).is_none() {
            return Ok(false);
        }

        let next: Vec<Meal> = self.meals.iter().filter(|m| m.id != id).cloned().collect();
        self.commit_meals(next)?;

        Ok(true)
    }

    fn commit_profile(&mut self, profile: UserProfile) -> Result<(), StoreError> {
        let json = serde_json::to_string(&profile).map_err(|source| StoreError::Encode {
            key: PROFILE_KEY,
            source,
        })?;
        self.storage.set(PROFILE_KEY, &json)?;
        tracing::debug!("Persisted profile, goal {} kcal", profile.daily_calorie_goal);

        self.profile = Some(profile);
        Ok(())
    }

    fn commit_meals(&mut self, meals: Vec<Meal>) -> Result<(), StoreError> {
        let json = serde_json::to_string(&meals).map_err(|source| StoreError::Encode {
            key: MEALS_KEY,
            source,
        })?;
        self.storage.set(MEALS_KEY, &json)?;
        tracing::debug!("Persisted {} meal(s)", meals.len());

        self.meals = meals;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NutritionFacts;
    use crate::nutrition::daily_calorie_goal;
    use crate::storage::{MemoryStorage, StorageError};

    fn at(rfc3339: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(rfc3339).unwrap()
    }

    fn meal(name: &str, calories: u32) -> NewMeal {
        NewMeal::new(name, NutritionFacts::new(calories, 10, 20, 5))
    }

    struct ReadOnlyStorage(MemoryStorage);

    impl KeyValueStorage for ReadOnlyStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.0.get(key)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Backend("read-only".to_string()))
        }
    }

    #[test]
    fn test_load_empty() {
        let store = NutritionStore::load(MemoryStorage::new()).unwrap();
        assert!(store.profile().is_none());
        assert!(store.meals().is_empty());
    }

    #[test]
    fn test_setup_profile_computes_goal() {
        let mut store = NutritionStore::load(MemoryStorage::new()).unwrap();
        let profile = store.setup_profile(25, 70.0, 175.0).unwrap();

        assert_eq!(profile.daily_calorie_goal, 3094);
        assert_eq!(store.profile(), Some(&profile));
    }

    #[test]
    fn test_setup_profile_overwrites() {
        let mut store = NutritionStore::load(MemoryStorage::new()).unwrap();
        store.setup_profile(25, 70.0, 175.0).unwrap();
        store.setup_profile(40, 85.0, 180.0).unwrap();

        let profile = store.profile().unwrap();
        assert_eq!(profile.age, 40);
        assert_eq!(profile.daily_calorie_goal, daily_calorie_goal(40, 85.0, 180.0));
    }

    #[test]
    fn test_update_profile_merges_and_recomputes() {
        let mut store = NutritionStore::load(MemoryStorage::new()).unwrap();
        store.setup_profile(25, 70.0, 175.0).unwrap();

        let updated = store
            .update_profile(&ProfileUpdate {
                age: Some(35),
                ..Default::default()
            })
            .unwrap();

        assert!(updated);
        let profile = store.profile().unwrap();
        assert_eq!(profile.age, 35);
        assert_eq!(profile.weight, 70.0);
        assert_eq!(profile.daily_calorie_goal, daily_calorie_goal(35, 70.0, 175.0));
    }

    #[test]
    fn test_update_profile_without_profile_is_noop() {
        let storage = MemoryStorage::new();
        let mut store = NutritionStore::load(&storage).unwrap();

        let updated = store
            .update_profile(&ProfileUpdate {
                weight: Some(80.0),
                ..Default::default()
            })
            .unwrap();

        assert!(!updated);
        assert!(store.profile().is_none());
        assert!(!storage.contains(PROFILE_KEY));
    }

    #[test]
    fn test_add_meal_appends_and_stamps() {
        let mut store = NutritionStore::load(MemoryStorage::new()).unwrap();
        let first = store.add_meal(meal("dal", 174)).unwrap();
        let second = store.add_meal(meal("roti", 21)).unwrap();

        assert_ne!(first.id, second.id);
        assert!(second.timestamp >= first.timestamp);
        let names: Vec<&str> = store.meals().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["dal", "roti"]);
    }

    #[test]
    fn test_add_meal_at_keeps_timestamp() {
        let mut store = NutritionStore::load(MemoryStorage::new()).unwrap();
        let when = at("2025-02-01T19:30:00+05:30");
        let logged = store
            .add_meal_at(meal("thali", 800).with_image_url("file:///thali.jpg"), when)
            .unwrap();

        assert_eq!(logged.timestamp, when);
        assert_eq!(logged.image_url.as_deref(), Some("file:///thali.jpg"));
        assert_eq!(logged.calories, 800);
    }

    #[test]
    fn test_remove_meal() {
        let mut store = NutritionStore::load(MemoryStorage::new()).unwrap();
        let a = store.add_meal(meal("a", 1)).unwrap();
        let b = store.add_meal(meal("b", 2)).unwrap();

        assert!(store.remove_meal(&a.id).unwrap());
        assert!(!store.remove_meal(&a.id).unwrap());
        assert!(!store.remove_meal("missing").unwrap());

        assert_eq!(store.meals().len(), 1);
        assert_eq!(store.meals()[0].id, b.id);
    }

    #[test]
    fn test_records_persist_independently() {
        let storage = MemoryStorage::new();
        {
            let mut store = NutritionStore::load(&storage).unwrap();
            store.add_meal(meal("rice", 260)).unwrap();
            assert!(!storage.contains(PROFILE_KEY));
            store.setup_profile(30, 60.0, 165.0).unwrap();
        }

        let reloaded = NutritionStore::load(&storage).unwrap();
        assert_eq!(reloaded.meals().len(), 1);
        assert_eq!(reloaded.meals()[0].name, "rice");
        assert_eq!(reloaded.profile().unwrap().age, 30);
    }

    #[test]
    fn test_failed_write_keeps_state() {
        let storage = ReadOnlyStorage(MemoryStorage::new());
        let mut store = NutritionStore::load(&storage).unwrap();

        assert!(store.add_meal(meal("rice", 260)).is_err());
        assert!(store.meals().is_empty());

        assert!(store.setup_profile(30, 60.0, 165.0).is_err());
        assert!(store.profile().is_none());
    }

    #[test]
    fn test_loads_recorded_layout() {
        let storage = MemoryStorage::new()
            .with_record(
                PROFILE_KEY,
                r#"{"age":25,"weight":70,"height":175,"dailyCalorieGoal":3094,"createdAt":"2025-01-01T10:00:00.000Z"}"#,
            )
            .with_record(
                MEALS_KEY,
                r#"[{"id":"1736500000000","name":"chicken biryani","calories":875,"protein":45,"carbs":113,"fat":30,"timestamp":"2025-01-10T13:00:00.000Z"}]"#,
            );

        let store = NutritionStore::load(&storage).unwrap();
        assert_eq!(store.profile().unwrap().weight, 70.0);
        assert_eq!(store.meals()[0].id, "1736500000000");
    }
}

//! Reference table loading.
//!
//! Workout burn rates and food profiles are read once from CSV and kept
//! as immutable key → row maps. A missing key is not a load error; the
//! recorder discovers it when an observation asks for it.

use crate::{FoodProfile, Result, WorkoutRate};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::Path;

/// A row that can be looked up by a string key
pub trait ReferenceRow: DeserializeOwned {
    /// Human-readable table name for log messages
    const TABLE: &'static str;

    fn key(&self) -> &str;
}

impl ReferenceRow for WorkoutRate {
    const TABLE: &'static str = "workout rates";

    fn key(&self) -> &str {
        &self.workout_type
    }
}

impl ReferenceRow for FoodProfile {
    const TABLE: &'static str = "food profiles";

    fn key(&self) -> &str {
        &self.food_name
    }
}

/// Immutable mapping from key to reference row
#[derive(Clone, Debug)]
pub struct ReferenceTable<T> {
    rows: HashMap<String, T>,
}

impl<T: ReferenceRow> ReferenceTable<T> {
    /// Load a table from a CSV file with a header row
    pub fn load(path: &Path) -> Result<Self> {
        let reader = csv::ReaderBuilder::new().trim(csv::Trim::Headers).from_path(path)?;
        let table = Self::from_reader(reader)?;
        tracing::info!("Loaded {} {} from {:?}", table.len(), T::TABLE, path);
        Ok(table)
    }

    fn from_reader<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Self> {
        let mut table = Self { rows: HashMap::new() };
        for result in reader.deserialize::<T>() {
            table.insert(result?);
        }
        Ok(table)
    }

    /// Build a table from rows already in memory (first row per key wins)
    pub fn from_rows(rows: impl IntoIterator<Item = T>) -> Self {
        let mut table = Self { rows: HashMap::new() };
        for row in rows {
            table.insert(row);
        }
        table
    }

    /// Returns false and keeps the existing row when the key is taken
    fn insert(&mut self, row: T) -> bool {
        if self.rows.contains_key(row.key()) {
            tracing::warn!(
                "Duplicate key {:?} in {}, keeping the first row",
                row.key(),
                T::TABLE
            );
            return false;
        }
        self.rows.insert(row.key().to_string(), row);
        true
    }

    /// Exact-match lookup; no case or whitespace normalization
    pub fn get(&self, key: &str) -> Option<&T> {
        self.rows.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.rows.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Both reference tables, loaded together at startup
#[derive(Clone, Debug)]
pub struct References {
    pub workouts: ReferenceTable<WorkoutRate>,
    pub foods: ReferenceTable<FoodProfile>,
}

impl References {
    /// Load both tables; any read or parse failure is fatal
    pub fn load(workout_path: &Path, food_path: &Path) -> Result<Self> {
        Ok(Self {
            workouts: ReferenceTable::load(workout_path)?,
            foods: ReferenceTable::load(food_path)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_load_workout_rates() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("workout_data.csv");
        std::fs::write(
            &path,
            "Workout Type,Calories\n\"Boxing, punching bag\",8.0\nBowling,3.0\n",
        )
        .unwrap();

        let table = ReferenceTable::<WorkoutRate>::load(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.get("Boxing, punching bag").unwrap().calories_per_unit,
            8.0
        );
        assert!(table.get("bowling").is_none());
    }

    #[test]
    fn test_load_food_profiles_ignores_extra_columns() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("food_data.csv");
        std::fs::write(
            &path,
            "Food,Measure,Calories,Protein,Carbs,Fats\nLobster,1 lb,120,22.5,1.3,1.6\n",
        )
        .unwrap();

        let table = ReferenceTable::<FoodProfile>::load(&path).unwrap();
        let lobster = table.get("Lobster").unwrap();
        assert_eq!(lobster.calories, 120.0);
        assert_eq!(lobster.protein, 22.5);
        assert_eq!(lobster.carbs, 1.3);
        assert_eq!(lobster.fats, 1.6);
    }

    #[test]
    fn test_duplicate_keys_keep_first_row() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("workout_data.csv");
        std::fs::write(&path, "Workout Type,Calories\nCroquet,2.5\nCroquet,9.9\n").unwrap();

        let table = ReferenceTable::<WorkoutRate>::load(&path).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("Croquet").unwrap().calories_per_unit, 2.5);
    }

    #[test]
    fn test_in_memory_duplicates_keep_first_row() {
        crate::logging::init_test();
        let rate = |calories_per_unit| WorkoutRate {
            workout_type: "Croquet".into(),
            calories_per_unit,
        };

        let mut table = ReferenceTable::from_rows(vec![rate(2.5), rate(9.9)]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("Croquet").unwrap().calories_per_unit, 2.5);

        // Same rule as CSV loading: later rows with a taken key are refused
        assert!(!table.insert(rate(4.0)));
        assert_eq!(table.get("Croquet").unwrap().calories_per_unit, 2.5);
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = References::load(
            &temp_dir.path().join("missing_workouts.csv"),
            &temp_dir.path().join("missing_foods.csv"),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_row_is_fatal() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("workout_data.csv");
        std::fs::write(&path, "Workout Type,Calories\nWrestling,lots\n").unwrap();

        match ReferenceTable::<WorkoutRate>::load(&path) {
            Err(Error::Csv(_)) => {}
            other => panic!("Expected CSV error, got {:?}", other),
        }
    }
}

//! Recording observations into the owned tables.
//!
//! Each operation appends exactly one row, or none when a workout type
//! or food item has no reference row. Derived values are computed here
//! once and never recomputed.

use crate::{
    Error, FitnessTables, FoodRecord, References, Result, StepRecord, WaterRecord,
    WorkoutRecord, STEP_CALORIE_FACTOR,
};
use chrono::NaiveDate;

/// What to do when a workout type or food item is missing from its reference table
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LookupPolicy {
    /// Log a warning and drop the observation
    #[default]
    Lenient,
    /// Return an error; nothing is appended
    Strict,
}

/// Appends observations, resolving derived values against the reference tables
#[derive(Clone, Copy, Debug)]
pub struct Recorder<'r> {
    references: &'r References,
    policy: LookupPolicy,
}

impl<'r> Recorder<'r> {
    pub fn new(references: &'r References) -> Self {
        Self {
            references,
            policy: LookupPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: LookupPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> LookupPolicy {
        self.policy
    }

    /// Record a step count; burned calories are `steps × 0.4`
    pub fn record_steps<'t>(
        &self,
        tables: &'t mut FitnessTables,
        user_id: &str,
        steps: i64,
        date: NaiveDate,
    ) -> &'t StepRecord {
        tables.push_steps(StepRecord {
            user_id: user_id.to_string(),
            date,
            steps,
            burned_calories: steps as f64 * STEP_CALORIE_FACTOR,
        })
    }

    /// Record a workout; burned calories are `rate × weight × duration`
    ///
    /// Returns `Ok(None)` when the workout type is unknown and the policy
    /// is lenient.
    pub fn record_workout<'t>(
        &self,
        tables: &'t mut FitnessTables,
        user_id: &str,
        workout_type: &str,
        duration: f64,
        weight: f64,
        date: NaiveDate,
    ) -> Result<Option<&'t WorkoutRecord>> {
        let Some(rate) = self.references.workouts.get(workout_type) else {
            return match self.policy {
                LookupPolicy::Lenient => {
                    tracing::warn!(
                        user = user_id,
                        "Information not found for this workout type: {:?}",
                        workout_type
                    );
                    Ok(None)
                }
                LookupPolicy::Strict => Err(Error::UnknownWorkout(workout_type.to_string())),
            };
        };

        let record = tables.push_workout(WorkoutRecord {
            user_id: user_id.to_string(),
            date,
            workout_type: workout_type.to_string(),
            duration,
            burned_calories: rate.calories_per_unit * weight * duration,
            weight,
        });
        tracing::debug!(
            "Recorded {} for {}: {} kcal",
            workout_type,
            user_id,
            record.burned_calories
        );
        Ok(Some(record))
    }

    /// Record a food item; macros are copied from its profile
    ///
    /// Returns `Ok(None)` when the food is unknown and the policy is lenient.
    pub fn record_food<'t>(
        &self,
        tables: &'t mut FitnessTables,
        user_id: &str,
        food_name: &str,
        date: NaiveDate,
    ) -> Result<Option<&'t FoodRecord>> {
        let Some(profile) = self.references.foods.get(food_name) else {
            return match self.policy {
                LookupPolicy::Lenient => {
                    tracing::warn!(
                        user = user_id,
                        "Information not found in food data: {:?}",
                        food_name
                    );
                    Ok(None)
                }
                LookupPolicy::Strict => Err(Error::UnknownFood(food_name.to_string())),
            };
        };

        Ok(Some(tables.push_food(FoodRecord {
            user_id: user_id.to_string(),
            date,
            food_name: food_name.to_string(),
            calories: profile.calories,
            protein: profile.protein,
            carbs: profile.carbs,
            fats: profile.fats,
        })))
    }

    /// Record water intake
    pub fn record_water<'t>(
        &self,
        tables: &'t mut FitnessTables,
        user_id: &str,
        water_intake: f64,
        date: NaiveDate,
    ) -> &'t WaterRecord {
        tables.push_water(WaterRecord {
            user_id: user_id.to_string(),
            date,
            water_intake,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse_date, FoodProfile, ReferenceTable, WorkoutRate};

    fn test_references() -> References {
        References {
            workouts: ReferenceTable::from_rows(vec![
                WorkoutRate {
                    workout_type: "Boxing, punching bag".into(),
                    calories_per_unit: 8.0,
                },
                WorkoutRate {
                    workout_type: "Croquet".into(),
                    calories_per_unit: 2.5,
                },
            ]),
            foods: ReferenceTable::from_rows(vec![FoodProfile {
                food_name: "Blueberries".into(),
                calories: 85.1,
                protein: 1.1,
                carbs: 21.45,
                fats: 0.49,
            }]),
        }
    }

    fn day() -> NaiveDate {
        parse_date("20-11-2023").unwrap()
    }

    #[test]
    fn test_record_steps_burns_point_four_per_step() {
        crate::logging::init_test();
        let refs = test_references();
        let recorder = Recorder::new(&refs);
        let mut tables = FitnessTables::new();

        let record = recorder.record_steps(&mut tables, "User1", 10000, day());
        assert_eq!(record.burned_calories, 4000.0);
        assert_eq!(record.steps, 10000);

        for steps in [0_i64, 1, 5000, 14999] {
            let record = recorder.record_steps(&mut tables, "User1", steps, day());
            assert_eq!(record.burned_calories, steps as f64 * 0.4);
        }
        assert_eq!(tables.steps().len(), 5);
    }

    #[test]
    fn test_record_known_workout() {
        let refs = test_references();
        let recorder = Recorder::new(&refs);
        let mut tables = FitnessTables::new();

        let record = recorder
            .record_workout(&mut tables, "User1", "Boxing, punching bag", 30.0, 75.0, day())
            .unwrap()
            .unwrap();
        assert_eq!(record.burned_calories, 18000.0);
        assert_eq!(record.weight, 75.0);
        assert_eq!(record.duration, 30.0);
        assert_eq!(tables.workouts().len(), 1);

        let record = recorder
            .record_workout(&mut tables, "User2", "Croquet", 45.0, 72.0, day())
            .unwrap()
            .unwrap();
        assert_eq!(record.burned_calories, 2.5 * 72.0 * 45.0);
        assert_eq!(tables.workouts().len(), 2);
    }

    #[test]
    fn test_unknown_workout_is_dropped() {
        crate::logging::init_test();
        let refs = test_references();
        let recorder = Recorder::new(&refs);
        let mut tables = FitnessTables::new();

        // Exact matching: case and whitespace differences are misses
        for name in ["Wrestling", "croquet", "Croquet "] {
            let result = recorder
                .record_workout(&mut tables, "User1", name, 30.0, 75.0, day())
                .unwrap();
            assert!(result.is_none());
        }
        assert!(tables.workouts().is_empty());
    }

    #[test]
    fn test_record_food_copies_profile_exactly() {
        let refs = test_references();
        let recorder = Recorder::new(&refs);
        let mut tables = FitnessTables::new();

        let record = recorder
            .record_food(&mut tables, "User3", "Blueberries", day())
            .unwrap()
            .unwrap();
        let profile = refs.foods.get("Blueberries").unwrap();
        assert_eq!(record.calories.to_bits(), profile.calories.to_bits());
        assert_eq!(record.protein.to_bits(), profile.protein.to_bits());
        assert_eq!(record.carbs.to_bits(), profile.carbs.to_bits());
        assert_eq!(record.fats.to_bits(), profile.fats.to_bits());
    }

    #[test]
    fn test_unknown_food_is_dropped() {
        let refs = test_references();
        let recorder = Recorder::new(&refs);
        let mut tables = FitnessTables::new();

        let result = recorder
            .record_food(&mut tables, "User3", "Lobster", day())
            .unwrap();
        assert!(result.is_none());
        assert!(tables.foods().is_empty());
    }

    #[test]
    fn test_strict_policy_reports_misses() {
        let refs = test_references();
        let recorder = Recorder::new(&refs).with_policy(LookupPolicy::Strict);
        let mut tables = FitnessTables::new();

        match recorder.record_workout(&mut tables, "User1", "Wrestling", 30.0, 75.0, day()) {
            Err(Error::UnknownWorkout(name)) => assert_eq!(name, "Wrestling"),
            other => panic!("Expected UnknownWorkout, got {:?}", other),
        }
        match recorder.record_food(&mut tables, "User1", "Lobster", day()) {
            Err(Error::UnknownFood(name)) => assert_eq!(name, "Lobster"),
            other => panic!("Expected UnknownFood, got {:?}", other),
        }
        assert!(tables.is_empty());
    }

    #[test]
    fn test_water_and_negative_values_accepted() {
        let refs = test_references();
        let recorder = Recorder::new(&refs);
        let mut tables = FitnessTables::new();

        let record = recorder.record_water(&mut tables, "User1", -2.0, day());
        assert_eq!(record.water_intake, -2.0);

        let record = recorder.record_steps(&mut tables, "User1", -100, day());
        assert_eq!(record.burned_calories, -40.0);
        assert_eq!(tables.len(), 2);
    }
}

//! Core domain types for fitlog.
//!
//! This module defines:
//! - Reference rows (workout burn rates, food nutrition profiles)
//! - The four observation records (steps, workouts, food, water)
//! - The `DD-MM-YYYY` date codec shared by every table on disk

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Calories burned per step. Fixed, not configurable.
pub const STEP_CALORIE_FACTOR: f64 = 0.4;

// ============================================================================
// Dates
// ============================================================================

/// Serde codec for dates stored as `DD-MM-YYYY`
pub mod date_format {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%d-%m-%Y";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(raw.trim(), FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Parse a `DD-MM-YYYY` date string
pub fn parse_date(raw: &str) -> crate::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), date_format::FORMAT)
        .map_err(|_| crate::Error::Date(raw.to_string()))
}

/// Format a date as `DD-MM-YYYY`
pub fn format_date(date: NaiveDate) -> String {
    date.format(date_format::FORMAT).to_string()
}

/// Serializer for measured magnitudes drawn as whole numbers
///
/// Integral values are written without a fraction (`30`, not `30.0`);
/// anything else falls back to the regular float form.
pub mod whole_number {
    use serde::Serializer;

    /// Largest magnitude an `f64` holds without losing integer precision
    const EXACT_LIMIT: f64 = 9_007_199_254_740_992.0;

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.fract() == 0.0 && value.abs() <= EXACT_LIMIT {
            serializer.serialize_i64(*value as i64)
        } else {
            serializer.serialize_f64(*value)
        }
    }
}

// ============================================================================
// Reference Rows
// ============================================================================

/// Calorie-burn coefficient for one workout type
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkoutRate {
    #[serde(rename = "Workout Type")]
    pub workout_type: String,
    #[serde(rename = "Calories")]
    pub calories_per_unit: f64,
}

/// Macro-nutrient profile for one food item
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FoodProfile {
    #[serde(rename = "Food")]
    pub food_name: String,
    #[serde(rename = "Calories")]
    pub calories: f64,
    #[serde(rename = "Protein")]
    pub protein: f64,
    #[serde(rename = "Carbs")]
    pub carbs: f64,
    #[serde(rename = "Fats")]
    pub fats: f64,
}

// ============================================================================
// Observation Records
// ============================================================================

/// Common accessors for every observation record
pub trait Record {
    fn user_id(&self) -> &str;
    fn date(&self) -> NaiveDate;
}

/// Daily step count
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StepRecord {
    #[serde(rename = "User_ID")]
    pub user_id: String,
    #[serde(rename = "Date", with = "date_format")]
    pub date: NaiveDate,
    #[serde(rename = "Steps")]
    pub steps: i64,
    #[serde(rename = "Burned Calories")]
    pub burned_calories: f64,
}

/// A workout with its derived calorie burn
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkoutRecord {
    #[serde(rename = "User_ID")]
    pub user_id: String,
    #[serde(rename = "Date", with = "date_format")]
    pub date: NaiveDate,
    #[serde(rename = "Workout_Type")]
    pub workout_type: String,
    #[serde(rename = "Duration", serialize_with = "whole_number::serialize")]
    pub duration: f64,
    #[serde(rename = "Burned Calories")]
    pub burned_calories: f64,
    #[serde(rename = "Weight", serialize_with = "whole_number::serialize")]
    pub weight: f64,
}

/// A food item with macros copied from its profile
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FoodRecord {
    #[serde(rename = "User_ID")]
    pub user_id: String,
    #[serde(rename = "Date", with = "date_format")]
    pub date: NaiveDate,
    #[serde(rename = "Food")]
    pub food_name: String,
    #[serde(rename = "Calories")]
    pub calories: f64,
    #[serde(rename = "Protein")]
    pub protein: f64,
    #[serde(rename = "Carbs")]
    pub carbs: f64,
    #[serde(rename = "Fats")]
    pub fats: f64,
}

/// Daily water intake
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WaterRecord {
    #[serde(rename = "User_ID")]
    pub user_id: String,
    #[serde(rename = "Date", with = "date_format")]
    pub date: NaiveDate,
    #[serde(rename = "Water Intake", serialize_with = "whole_number::serialize")]
    pub water_intake: f64,
}

impl Record for StepRecord {
    fn user_id(&self) -> &str {
        &self.user_id
    }

    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Record for WorkoutRecord {
    fn user_id(&self) -> &str {
        &self.user_id
    }

    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Record for FoodRecord {
    fn user_id(&self) -> &str {
        &self.user_id
    }

    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Record for WaterRecord {
    fn user_id(&self) -> &str {
        &self.user_id
    }

    fn date(&self) -> NaiveDate {
        self.date
    }
}

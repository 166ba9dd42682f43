//! Configuration file support for fitlog.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/fitlog/config.toml`.
//! Every field has a default, so a missing file or a partial file is fine.

use crate::{Error, LookupPolicy, Result};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub chart: ChartConfig,

    #[serde(default)]
    pub recorder: RecorderConfig,

    #[serde(default)]
    pub simulation: SimulationConfig,
}

/// Input tables and output location
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_workout_data")]
    pub workout_data: PathBuf,

    #[serde(default = "default_food_data")]
    pub food_data: PathBuf,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            workout_data: default_workout_data(),
            food_data: default_food_data(),
            output_dir: default_output_dir(),
        }
    }
}

/// Combined figure settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_chart_path")]
    pub path: PathBuf,

    #[serde(default = "default_panel_width")]
    pub panel_width: u32,

    #[serde(default = "default_panel_height")]
    pub panel_height: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            path: default_chart_path(),
            panel_width: default_panel_width(),
            panel_height: default_panel_height(),
        }
    }
}

/// Recorder behaviour
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct RecorderConfig {
    /// Fail on unknown workout types / foods instead of dropping them
    #[serde(default)]
    pub strict_lookups: bool,
}

impl RecorderConfig {
    pub fn policy(&self) -> LookupPolicy {
        if self.strict_lookups {
            LookupPolicy::Strict
        } else {
            LookupPolicy::Lenient
        }
    }
}

/// Half-open integer range `[min, max)`
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Span {
    pub min: i64,
    pub max: i64,
}

impl Span {
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }
}

/// Simulation window, catalogs and magnitude ranges
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_users")]
    pub users: Vec<String>,

    #[serde(default = "default_start_date")]
    pub start_date: NaiveDate,

    #[serde(default = "default_days")]
    pub days: u32,

    /// Fixed RNG seed; entropy is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    #[serde(default = "default_workout_types")]
    pub workout_types: Vec<String>,

    #[serde(default = "default_food_types")]
    pub food_types: Vec<String>,

    #[serde(default = "default_steps")]
    pub steps: Span,

    #[serde(default = "default_duration")]
    pub duration: Span,

    #[serde(default = "default_weight")]
    pub weight: Span,

    #[serde(default = "default_water")]
    pub water: Span,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            users: default_users(),
            start_date: default_start_date(),
            days: default_days(),
            seed: None,
            workout_types: default_workout_types(),
            food_types: default_food_types(),
            steps: default_steps(),
            duration: default_duration(),
            weight: default_weight(),
            water: default_water(),
        }
    }
}

impl SimulationConfig {
    /// Date of the `offset`-th simulated day, `None` past the calendar's end
    pub fn day(&self, offset: u32) -> Option<NaiveDate> {
        self.start_date.checked_add_days(Days::new(offset.into()))
    }

    /// Last simulated day
    pub fn end_date(&self) -> Option<NaiveDate> {
        self.day(self.days.checked_sub(1)?)
    }

    /// Reject settings the simulator cannot draw from
    pub fn validate(&self) -> Result<()> {
        if self.users.is_empty() {
            return Err(Error::Config("simulation.users is empty".into()));
        }
        if self.days == 0 {
            return Err(Error::Config("simulation.days must be at least 1".into()));
        }
        if self.end_date().is_none() {
            return Err(Error::Config(format!(
                "simulation window of {} days starting {} runs past the last representable date",
                self.days, self.start_date
            )));
        }
        if self.workout_types.is_empty() {
            return Err(Error::Config("simulation.workout_types is empty".into()));
        }
        if self.food_types.is_empty() {
            return Err(Error::Config("simulation.food_types is empty".into()));
        }
        for (name, span) in [
            ("steps", self.steps),
            ("duration", self.duration),
            ("weight", self.weight),
            ("water", self.water),
        ] {
            if span.min >= span.max {
                return Err(Error::Config(format!(
                    "simulation.{} range is empty ({}..{})",
                    name, span.min, span.max
                )));
            }
        }
        Ok(())
    }
}

// Default value functions
fn default_workout_data() -> PathBuf {
    PathBuf::from("workout_data.csv")
}

fn default_food_data() -> PathBuf {
    PathBuf::from("food_data.csv")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_chart_path() -> PathBuf {
    PathBuf::from("combined_data_visualizations.svg")
}

fn default_panel_width() -> u32 {
    360
}

fn default_panel_height() -> u32 {
    260
}

fn default_users() -> Vec<String> {
    (1..=5).map(|i| format!("User{}", i)).collect()
}

fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 11, 20).unwrap_or(NaiveDate::MIN)
}

fn default_days() -> u32 {
    7
}

fn default_workout_types() -> Vec<String> {
    vec![
        "Wrestling".into(),
        "Badminton".into(),
        "Boxing, punching bag".into(),
        "Bowling".into(),
        "Croquet".into(),
    ]
}

fn default_food_types() -> Vec<String> {
    vec![
        "Lobster".into(),
        "Broccoli".into(),
        "French-fried".into(),
        "Blueberries".into(),
        "Strawberries".into(),
        "Muffins".into(),
    ]
}

fn default_steps() -> Span {
    Span::new(5000, 15000)
}

fn default_duration() -> Span {
    Span::new(30, 90)
}

fn default_weight() -> Span {
    Span::new(70, 80)
}

fn default_water() -> Span {
    Span::new(4, 8)
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from(".config"));
        base.join("fitlog").join("config.toml")
    }

    /// Validate every section that has constraints
    pub fn validate(&self) -> Result<()> {
        if self.chart.panel_width == 0 || self.chart.panel_height == 0 {
            return Err(Error::Config("chart panel size must be non-zero".into()));
        }
        self.simulation.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.simulation.users.len(), 5);
        assert_eq!(config.simulation.days, 7);
        assert_eq!(config.simulation.steps, Span::new(5000, 15000));
        assert_eq!(
            config.simulation.start_date,
            NaiveDate::from_ymd_opt(2023, 11, 20).unwrap()
        );
        assert_eq!(config.recorder.policy(), LookupPolicy::Lenient);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(config.simulation.users, parsed.simulation.users);
        assert_eq!(config.simulation.water, parsed.simulation.water);
        assert_eq!(config.data.food_data, parsed.data.food_data);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[recorder]
strict_lookups = true

[simulation]
users = ["Alice"]
seed = 7
steps = { min = 100, max = 200 }
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.recorder.policy(), LookupPolicy::Strict);
        assert_eq!(config.simulation.users, vec!["Alice".to_string()]);
        assert_eq!(config.simulation.seed, Some(7));
        assert_eq!(config.simulation.steps, Span::new(100, 200));
        assert_eq!(config.simulation.water, Span::new(4, 8)); // default
        assert_eq!(
            config.chart.path,
            PathBuf::from("combined_data_visualizations.svg")
        );
    }

    #[test]
    fn test_empty_range_rejected() {
        let mut config = Config::default();
        config.simulation.weight = Span::new(80, 80);
        match config.validate() {
            Err(Error::Config(msg)) => assert!(msg.contains("weight")),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_window_past_calendar_end_rejected() {
        let mut config = Config::default();
        config.simulation.start_date = NaiveDate::MAX;
        config.simulation.days = 2;
        match config.validate() {
            Err(Error::Config(msg)) => assert!(msg.contains("last representable date")),
            other => panic!("Expected Config error, got {:?}", other),
        }

        // A single day on the last date still fits
        config.simulation.days = 1;
        assert!(config.validate().is_ok());
        assert_eq!(config.simulation.end_date(), Some(NaiveDate::MAX));
    }

    #[test]
    fn test_empty_catalog_rejected() {
        let mut config = Config::default();
        config.simulation.food_types.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[data]\noutput_dir = \"out\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.data.output_dir, PathBuf::from("out"));
        assert_eq!(config.data.workout_data, PathBuf::from("workout_data.csv"));
    }
}

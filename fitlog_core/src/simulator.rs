//! Randomized driver that fills the tables through the recorder.
//!
//! For every user and every day of the window it draws one workout, one
//! food item and the step/duration/weight/water magnitudes, then records
//! steps, workout, food and water in that order.

use crate::config::{SimulationConfig, Span};
use crate::{Error, FitnessTables, Recorder, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Counts from one simulation run
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SimulationSummary {
    pub users: usize,
    pub days: u32,
    pub steps_recorded: usize,
    pub workouts_recorded: usize,
    pub foods_recorded: usize,
    pub water_recorded: usize,
    pub workouts_dropped: usize,
    pub foods_dropped: usize,
}

/// Drives the recorder with random observations
pub struct Simulator<'a, R: Rng> {
    recorder: Recorder<'a>,
    config: &'a SimulationConfig,
    rng: R,
}

impl<'a> Simulator<'a, StdRng> {
    /// Seeded from `config.seed`, or from entropy when no seed is set
    pub fn new(recorder: Recorder<'a>, config: &'a SimulationConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(recorder, config, rng)
    }
}

impl<'a, R: Rng> Simulator<'a, R> {
    pub fn with_rng(recorder: Recorder<'a>, config: &'a SimulationConfig, rng: R) -> Self {
        Self {
            recorder,
            config,
            rng,
        }
    }

    /// Run the whole window, appending to `tables`
    ///
    /// Configuration is validated before anything is appended. Under a
    /// strict lookup policy the first unknown workout or food aborts the
    /// run with the rows recorded so far left in place.
    pub fn run(&mut self, tables: &mut FitnessTables) -> Result<SimulationSummary> {
        let config = self.config;
        config.validate()?;

        let mut summary = SimulationSummary {
            users: config.users.len(),
            days: config.days,
            ..Default::default()
        };

        for user in &config.users {
            for offset in 0..config.days {
                let date = config.day(offset).ok_or_else(|| {
                    Error::Config(format!("simulation day {} is out of range", offset))
                })?;
                let workout = choose(&config.workout_types, &mut self.rng, "workout_types")?;
                let food = choose(&config.food_types, &mut self.rng, "food_types")?;

                let steps = draw(&mut self.rng, config.steps);
                self.recorder.record_steps(tables, user, steps, date);
                summary.steps_recorded += 1;

                let duration = draw(&mut self.rng, config.duration) as f64;
                let weight = draw(&mut self.rng, config.weight) as f64;
                match self
                    .recorder
                    .record_workout(tables, user, workout, duration, weight, date)?
                {
                    Some(_) => summary.workouts_recorded += 1,
                    None => summary.workouts_dropped += 1,
                }

                match self.recorder.record_food(tables, user, food, date)? {
                    Some(_) => summary.foods_recorded += 1,
                    None => summary.foods_dropped += 1,
                }

                let water = draw(&mut self.rng, config.water) as f64;
                self.recorder.record_water(tables, user, water, date);
                summary.water_recorded += 1;
            }
        }

        tracing::info!(
            "Simulated {} users over {} days ({} workouts and {} foods dropped)",
            summary.users,
            summary.days,
            summary.workouts_dropped,
            summary.foods_dropped
        );
        Ok(summary)
    }
}

fn choose<'c, R: Rng>(catalog: &'c [String], rng: &mut R, name: &str) -> Result<&'c str> {
    catalog
        .choose(rng)
        .map(String::as_str)
        .ok_or_else(|| Error::Config(format!("simulation.{} is empty", name)))
}

fn draw<R: Rng>(rng: &mut R, span: Span) -> i64 {
    rng.gen_range(span.min..span.max)
}

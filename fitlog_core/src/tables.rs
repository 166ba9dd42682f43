//! Owned observation tables and per-user views over them.

use crate::{FoodRecord, Record, StepRecord, WaterRecord, WorkoutRecord};
use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap};

/// The four append-only observation tables
///
/// There is no update or delete API. Rows are appended through the
/// [`Recorder`](crate::Recorder) and read back as slices.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FitnessTables {
    steps: Vec<StepRecord>,
    workouts: Vec<WorkoutRecord>,
    foods: Vec<FoodRecord>,
    water: Vec<WaterRecord>,
}

impl FitnessTables {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_parts(
        steps: Vec<StepRecord>,
        workouts: Vec<WorkoutRecord>,
        foods: Vec<FoodRecord>,
        water: Vec<WaterRecord>,
    ) -> Self {
        Self {
            steps,
            workouts,
            foods,
            water,
        }
    }

    pub fn steps(&self) -> &[StepRecord] {
        &self.steps
    }

    pub fn workouts(&self) -> &[WorkoutRecord] {
        &self.workouts
    }

    pub fn foods(&self) -> &[FoodRecord] {
        &self.foods
    }

    pub fn water(&self) -> &[WaterRecord] {
        &self.water
    }

    /// Total number of rows across all four tables
    pub fn len(&self) -> usize {
        self.steps.len() + self.workouts.len() + self.foods.len() + self.water.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn push_steps(&mut self, record: StepRecord) -> &StepRecord {
        self.steps.push(record);
        &self.steps[self.steps.len() - 1]
    }

    pub(crate) fn push_workout(&mut self, record: WorkoutRecord) -> &WorkoutRecord {
        self.workouts.push(record);
        &self.workouts[self.workouts.len() - 1]
    }

    pub(crate) fn push_food(&mut self, record: FoodRecord) -> &FoodRecord {
        self.foods.push(record);
        &self.foods[self.foods.len() - 1]
    }

    pub(crate) fn push_water(&mut self, record: WaterRecord) -> &WaterRecord {
        self.water.push(record);
        &self.water[self.water.len() - 1]
    }

    /// Split every table by user
    ///
    /// Users appear in the order they are first seen (steps, then
    /// workouts, foods, water). Rows keep their insertion order.
    pub fn partition(&self) -> Vec<UserTables<'_>> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut users: Vec<UserTables<'_>> = Vec::new();

        fn slot<'a>(
            index: &mut HashMap<&'a str, usize>,
            users: &mut Vec<UserTables<'a>>,
            user_id: &'a str,
        ) -> usize {
            *index.entry(user_id).or_insert_with(|| {
                users.push(UserTables::empty(user_id));
                users.len() - 1
            })
        }

        for record in &self.steps {
            let i = slot(&mut index, &mut users, record.user_id());
            users[i].steps.push(record);
        }
        for record in &self.workouts {
            let i = slot(&mut index, &mut users, record.user_id());
            users[i].workouts.push(record);
        }
        for record in &self.foods {
            let i = slot(&mut index, &mut users, record.user_id());
            users[i].foods.push(record);
        }
        for record in &self.water {
            let i = slot(&mut index, &mut users, record.user_id());
            users[i].water.push(record);
        }

        users
    }

    /// View of a single user's rows (empty tables if the user is unknown)
    pub fn for_user<'a>(&'a self, user_id: &'a str) -> UserTables<'a> {
        UserTables {
            user_id,
            steps: self.steps.iter().filter(|r| r.user_id == user_id).collect(),
            workouts: self.workouts.iter().filter(|r| r.user_id == user_id).collect(),
            foods: self.foods.iter().filter(|r| r.user_id == user_id).collect(),
            water: self.water.iter().filter(|r| r.user_id == user_id).collect(),
        }
    }
}

/// Borrowed rows belonging to one user
#[derive(Clone, Debug)]
pub struct UserTables<'a> {
    pub user_id: &'a str,
    pub steps: Vec<&'a StepRecord>,
    pub workouts: Vec<&'a WorkoutRecord>,
    pub foods: Vec<&'a FoodRecord>,
    pub water: Vec<&'a WaterRecord>,
}

impl<'a> UserTables<'a> {
    fn empty(user_id: &'a str) -> Self {
        Self {
            user_id,
            steps: Vec::new(),
            workouts: Vec::new(),
            foods: Vec::new(),
            water: Vec::new(),
        }
    }

    /// Sorted, de-duplicated dates across all four tables
    pub fn dates(&self) -> Vec<NaiveDate> {
        let mut dates = BTreeSet::new();
        dates.extend(self.steps.iter().map(|r| r.date()));
        dates.extend(self.workouts.iter().map(|r| r.date()));
        dates.extend(self.foods.iter().map(|r| r.date()));
        dates.extend(self.water.iter().map(|r| r.date()));
        dates.into_iter().collect()
    }
}

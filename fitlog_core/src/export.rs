//! Per-user CSV export.
//!
//! Each user gets `<output_dir>/<user>_data/` holding one CSV file per
//! table. Files are always fully rewritten: every table is written to a
//! temp file in the same directory, synced, then renamed over the target.

use crate::{
    FitnessTables, FoodRecord, Result, StepRecord, UserTables, WaterRecord, WorkoutRecord,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// A record type with a fixed file name and header row on disk
pub trait TableFile: Serialize + DeserializeOwned {
    const FILE_NAME: &'static str;
    const HEADERS: &'static [&'static str];
}

impl TableFile for StepRecord {
    const FILE_NAME: &'static str = "steps_data.csv";
    const HEADERS: &'static [&'static str] = &["User_ID", "Date", "Steps", "Burned Calories"];
}

impl TableFile for WorkoutRecord {
    const FILE_NAME: &'static str = "workout_data.csv";
    const HEADERS: &'static [&'static str] = &[
        "User_ID",
        "Date",
        "Workout_Type",
        "Duration",
        "Burned Calories",
        "Weight",
    ];
}

impl TableFile for FoodRecord {
    const FILE_NAME: &'static str = "food_intake_data.csv";
    const HEADERS: &'static [&'static str] =
        &["User_ID", "Date", "Food", "Calories", "Protein", "Carbs", "Fats"];
}

impl TableFile for WaterRecord {
    const FILE_NAME: &'static str = "water_intake_data.csv";
    const HEADERS: &'static [&'static str] = &["User_ID", "Date", "Water Intake"];
}

/// Directory holding one user's exported tables
pub fn user_dir(output_dir: &Path, user_id: &str) -> PathBuf {
    output_dir.join(format!("{}_data", user_id))
}

/// Export every user's tables; returns the directories written
pub fn export_all(tables: &FitnessTables, output_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for user in tables.partition() {
        written.push(export_user(&user, output_dir)?);
    }
    tracing::info!("Exported {} users to {:?}", written.len(), output_dir);
    Ok(written)
}

/// Export one user's four tables, overwriting any previous export
pub fn export_user(user: &UserTables<'_>, output_dir: &Path) -> Result<PathBuf> {
    let dir = user_dir(output_dir, user.user_id);
    std::fs::create_dir_all(&dir)?;

    write_table(&dir, &user.steps)?;
    write_table(&dir, &user.workouts)?;
    write_table(&dir, &user.foods)?;
    write_table(&dir, &user.water)?;

    tracing::debug!("Wrote tables for {} to {:?}", user.user_id, dir);
    Ok(dir)
}

/// Write rows to `dir/T::FILE_NAME`, header row included even when empty
fn write_table<T: TableFile>(dir: &Path, rows: &[&T]) -> Result<()> {
    let temp_file = NamedTempFile::new_in(dir)?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(temp_file);
    writer.write_record(T::HEADERS)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    let mut temp_file = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    temp_file.flush()?;
    temp_file.as_file().sync_all()?;

    let path = dir.join(T::FILE_NAME);
    temp_file.persist(&path).map_err(|e| e.error)?;
    Ok(())
}

fn read_table<T: TableFile>(dir: &Path) -> Result<Vec<T>> {
    let mut reader = csv::Reader::from_path(dir.join(T::FILE_NAME))?;
    let mut rows = Vec::new();
    for result in reader.deserialize::<T>() {
        rows.push(result?);
    }
    Ok(rows)
}

/// Read a user directory written by [`export_user`] back into owned tables
pub fn load_user_export(dir: &Path) -> Result<FitnessTables> {
    let tables = FitnessTables::from_parts(
        read_table(dir)?,
        read_table(dir)?,
        read_table(dir)?,
        read_table(dir)?,
    );
    tracing::debug!("Loaded {} rows from {:?}", tables.len(), dir);
    Ok(tables)
}

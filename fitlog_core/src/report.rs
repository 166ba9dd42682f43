//! Plain-text rendering of a user's tables for the console.

use crate::export::TableFile;
use crate::{format_date, FoodRecord, StepRecord, UserTables, WaterRecord, WorkoutRecord};

/// Render all four tables for one user
pub fn render_user(user: &UserTables<'_>) -> String {
    let mut out = String::new();
    out.push_str(&format!("Data for {}:\n", user.user_id));

    out.push_str("Steps Data:\n");
    out.push_str(&render_table(
        StepRecord::HEADERS,
        user.steps
            .iter()
            .map(|r| {
                vec![
                    r.user_id.clone(),
                    format_date(r.date),
                    r.steps.to_string(),
                    format_number(r.burned_calories),
                ]
            })
            .collect(),
    ));

    out.push_str("\nWorkout Data:\n");
    out.push_str(&render_table(
        WorkoutRecord::HEADERS,
        user.workouts
            .iter()
            .map(|r| {
                vec![
                    r.user_id.clone(),
                    format_date(r.date),
                    r.workout_type.clone(),
                    format_number(r.duration),
                    format_number(r.burned_calories),
                    format_number(r.weight),
                ]
            })
            .collect(),
    ));

    out.push_str("\nFood Intake Data:\n");
    out.push_str(&render_table(
        FoodRecord::HEADERS,
        user.foods
            .iter()
            .map(|r| {
                vec![
                    r.user_id.clone(),
                    format_date(r.date),
                    r.food_name.clone(),
                    format_number(r.calories),
                    format_number(r.protein),
                    format_number(r.carbs),
                    format_number(r.fats),
                ]
            })
            .collect(),
    ));

    out.push_str("\nWater Intake Data:\n");
    out.push_str(&render_table(
        WaterRecord::HEADERS,
        user.water
            .iter()
            .map(|r| {
                vec![
                    r.user_id.clone(),
                    format_date(r.date),
                    format_number(r.water_intake),
                ]
            })
            .collect(),
    ));

    out
}

/// Whole numbers print without a fraction, everything else with two decimals
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

fn render_table(headers: &[&str], rows: Vec<Vec<String>>) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, headers.iter().copied(), &widths);
    if rows.is_empty() {
        out.push_str("(no rows)\n");
    }
    for row in &rows {
        push_row(&mut out, row.iter().map(String::as_str), &widths);
    }
    out
}

fn push_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line: Vec<String> = cells
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse_date, FitnessTables, Recorder, ReferenceTable, References};

    #[test]
    fn test_render_user() {
        let refs = References {
            workouts: ReferenceTable::from_rows(vec![]),
            foods: ReferenceTable::from_rows(vec![]),
        };
        let recorder = Recorder::new(&refs);
        let mut tables = FitnessTables::new();
        let day = parse_date("20-11-2023").unwrap();
        recorder.record_steps(&mut tables, "User1", 10000, day);
        recorder.record_water(&mut tables, "User1", 6.0, day);

        let text = render_user(&tables.for_user("User1"));

        assert!(text.starts_with("Data for User1:\nSteps Data:\n"));
        assert!(text.contains("User_ID  Date        Steps  Burned Calories\n"));
        assert!(text.contains("User1    20-11-2023  10000  4000\n"));
        assert!(text.contains("Workout Data:\nUser_ID  Date  Workout_Type"));
        assert!(text.contains("(no rows)"));
        assert!(text.contains("User1    20-11-2023  6\n"));
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(18000.0), "18000");
        assert_eq!(format_number(85.1), "85.10");
        assert_eq!(format_number(-40.0), "-40");
    }
}

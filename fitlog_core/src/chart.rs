//! Combined SVG figure: one row of four panels per user.
//!
//! Panels, left to right: steps over time, workout calories burned,
//! water intake, and food calories on a secondary axis. A shared legend
//! strip runs along the bottom of the figure.

use crate::config::ChartConfig;
use crate::{Error, FitnessTables, Result, UserTables};
use chrono::NaiveDate;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;

const PANELS_PER_USER: usize = 4;
const LEGEND_HEIGHT: u32 = 50;

const STEPS_COLOR: RGBColor = RGBColor(31, 119, 180);
const WORKOUT_COLOR: RGBColor = RGBColor(135, 206, 235);
const WATER_COLOR: RGBColor = RGBColor(0, 128, 0);
const FOOD_COLOR: RGBColor = RGBColor(250, 128, 114);

const LEGEND: [(&str, RGBColor); 4] = [
    ("Steps", STEPS_COLOR),
    ("Burned Calories", WORKOUT_COLOR),
    ("Water Intake", WATER_COLOR),
    ("Calories Intake", FOOD_COLOR),
];

type DrawResult<DB> = std::result::Result<(), DrawingAreaErrorKind<<DB as DrawingBackend>::ErrorType>>;
type DateChart<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Pixel size of the whole figure for `users` rows
///
/// Both sides must fit the backend's `i32` pixel coordinates.
pub fn figure_size(users: usize, config: &ChartConfig) -> Result<(u32, u32)> {
    let rows = u32::try_from(users.max(1)).ok();
    let width = config.panel_width.checked_mul(PANELS_PER_USER as u32);
    let height = rows
        .and_then(|rows| config.panel_height.checked_mul(rows))
        .and_then(|h| h.checked_add(LEGEND_HEIGHT));

    match (width, height) {
        (Some(w), Some(h)) if w <= i32::MAX as u32 && h <= i32::MAX as u32 => Ok((w, h)),
        _ => Err(Error::Chart(format!(
            "figure for {} users with {}x{} panels is too large",
            users, config.panel_width, config.panel_height
        ))),
    }
}

/// Render the combined figure to an SVG file
pub fn render_to_file(tables: &FitnessTables, path: &Path, config: &ChartConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let users = tables.partition();
    let size = figure_size(users.len(), config)?;
    let root = SVGBackend::new(path, size).into_drawing_area();
    draw_figure(&root, &users).map_err(chart_error)?;

    tracing::info!("Saved chart for {} users to {:?}", users.len(), path);
    Ok(())
}

/// Render the combined figure to an SVG string
pub fn render_to_string(tables: &FitnessTables, config: &ChartConfig) -> Result<String> {
    let users = tables.partition();
    let size = figure_size(users.len(), config)?;
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
        draw_figure(&root, &users).map_err(chart_error)?;
    }
    Ok(svg)
}

fn chart_error<E: std::error::Error + Send + Sync>(err: DrawingAreaErrorKind<E>) -> Error {
    Error::Chart(err.to_string())
}

fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    users: &[UserTables<'_>],
) -> DrawResult<DB> {
    root.fill(&WHITE)?;

    let (_, height) = root.dim_in_pixel();
    let (grid, legend) = root.split_vertically(height.saturating_sub(LEGEND_HEIGHT) as i32);

    if !users.is_empty() {
        let panels = grid.split_evenly((users.len(), PANELS_PER_USER));
        for (user, row) in users.iter().zip(panels.chunks(PANELS_PER_USER)) {
            let dates = user.dates();
            draw_steps(&row[0], user, &dates)?;
            draw_workouts(&row[1], user, &dates)?;
            draw_water(&row[2], user, &dates)?;
            draw_food(&row[3], user, &dates)?;
        }
    }

    draw_legend(&legend)?;
    root.present()?;
    Ok(())
}

fn draw_steps<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    user: &UserTables<'_>,
    dates: &[NaiveDate],
) -> DrawResult<DB> {
    let points: Vec<(f64, f64)> = user
        .steps
        .iter()
        .map(|r| (date_x(dates, r.date), r.steps as f64))
        .collect();

    let mut chart = panel(area, &format!("Steps Data for {}", user.user_id))
        .build_cartesian_2d(date_range(dates), value_range(points.iter().map(|p| p.1)))?;
    date_mesh(&mut chart, dates, "Steps")?;

    chart.draw_series(LineSeries::new(points.iter().copied(), &STEPS_COLOR))?;
    chart.draw_series(points.iter().map(|&p| Circle::new(p, 3, STEPS_COLOR.filled())))?;
    Ok(())
}

fn draw_workouts<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    user: &UserTables<'_>,
    dates: &[NaiveDate],
) -> DrawResult<DB> {
    let bars: Vec<(f64, f64)> = user
        .workouts
        .iter()
        .map(|r| (date_x(dates, r.date), r.burned_calories))
        .collect();

    let mut chart = panel(area, &format!("Workout Data for {}", user.user_id))
        .build_cartesian_2d(date_range(dates), value_range(bars.iter().map(|b| b.1)))?;
    date_mesh(&mut chart, dates, "Burned Calories")?;

    chart.draw_series(bars.iter().map(|&(x, y)| bar(x, y, WORKOUT_COLOR.filled())))?;
    Ok(())
}

fn draw_water<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    user: &UserTables<'_>,
    dates: &[NaiveDate],
) -> DrawResult<DB> {
    let points: Vec<(f64, f64)> = user
        .water
        .iter()
        .map(|r| (date_x(dates, r.date), r.water_intake))
        .collect();

    let mut chart = panel(area, &format!("Water Intake Data for {}", user.user_id))
        .build_cartesian_2d(date_range(dates), value_range(points.iter().map(|p| p.1)))?;
    date_mesh(&mut chart, dates, "Water Intake")?;

    chart.draw_series(LineSeries::new(points.iter().copied(), &WATER_COLOR))?;
    chart.draw_series(points.iter().map(|&p| Circle::new(p, 3, WATER_COLOR.filled())))?;
    Ok(())
}

/// Food calories live on the secondary axis; the primary axis only names the panel
fn draw_food<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    user: &UserTables<'_>,
    dates: &[NaiveDate],
) -> DrawResult<DB> {
    let bars: Vec<(f64, f64, &str)> = user
        .foods
        .iter()
        .map(|r| (date_x(dates, r.date), r.calories, r.food_name.as_str()))
        .collect();
    let calories = value_range(bars.iter().map(|b| b.1));
    let label_offset = (calories.end - calories.start) * 0.05;

    let mut chart = panel(area, &format!("Food Intake & Calories Data for {}", user.user_id))
        .right_y_label_area_size(50)
        .build_cartesian_2d(date_range(dates), 0.0..1.0)?
        .set_secondary_coord(date_range(dates), calories);

    let format_x = |x: &f64| date_label(dates, *x);
    chart
        .configure_mesh()
        .disable_y_mesh()
        .x_labels(dates.len().max(1))
        .x_label_formatter(&format_x)
        .y_label_formatter(&|_: &f64| String::new())
        .x_desc("Date")
        .y_desc("Food Items")
        .axis_desc_style(("sans-serif", 12).into_font().color(&FOOD_COLOR))
        .label_style(("sans-serif", 10).into_font())
        .draw()?;
    chart
        .configure_secondary_axes()
        .y_desc("Calories Intake")
        .axis_desc_style(("sans-serif", 12).into_font().color(&FOOD_COLOR))
        .label_style(("sans-serif", 10).into_font().color(&FOOD_COLOR))
        .draw()?;

    chart.draw_secondary_series(
        bars.iter()
            .map(|&(x, y, _)| bar(x, y, FOOD_COLOR.mix(0.5).filled())),
    )?;
    chart.draw_secondary_series(bars.iter().map(|&(x, y, name)| {
        Text::new(
            name.to_string(),
            (x - 0.35, y + label_offset),
            ("sans-serif", 9).into_font(),
        )
    }))?;
    Ok(())
}

fn draw_legend<DB: DrawingBackend>(area: &DrawingArea<DB, Shift>) -> DrawResult<DB> {
    let (width, height) = area.dim_in_pixel();
    let slot = (width / LEGEND.len() as u32) as i32;
    let mid = (height / 2) as i32;

    for (i, (label, color)) in LEGEND.iter().enumerate() {
        let x = slot * i as i32 + slot / 4;
        area.draw(&Rectangle::new(
            [(x, mid - 6), (x + 24, mid + 6)],
            color.filled(),
        ))?;
        area.draw(&Text::new(
            *label,
            (x + 32, mid - 7),
            ("sans-serif", 14).into_font(),
        ))?;
    }
    Ok(())
}

fn panel<'a, 'b, DB: DrawingBackend>(
    area: &'a DrawingArea<DB, Shift>,
    title: &str,
) -> ChartBuilder<'a, 'b, DB> {
    let mut builder = ChartBuilder::on(area);
    builder
        .caption(title, ("sans-serif", 14).into_font())
        .margin(8)
        .x_label_area_size(40)
        .y_label_area_size(50);
    builder
}

fn date_mesh<DB: DrawingBackend>(
    chart: &mut DateChart<'_, DB>,
    dates: &[NaiveDate],
    y_desc: &str,
) -> DrawResult<DB> {
    let format_x = |x: &f64| date_label(dates, *x);
    chart
        .configure_mesh()
        .x_labels(dates.len().max(1))
        .x_label_formatter(&format_x)
        .x_desc("Date")
        .y_desc(y_desc)
        .axis_desc_style(("sans-serif", 12).into_font())
        .label_style(("sans-serif", 10).into_font())
        .draw()
}

fn bar(x: f64, y: f64, style: ShapeStyle) -> Rectangle<(f64, f64)> {
    Rectangle::new([(x - 0.35, 0.0), (x + 0.35, y)], style)
}

/// Dates are plotted at their index so every day gets an evenly spaced slot
fn date_x(dates: &[NaiveDate], date: NaiveDate) -> f64 {
    dates.binary_search(&date).unwrap_or_else(|i| i) as f64
}

fn date_range(dates: &[NaiveDate]) -> Range<f64> {
    -0.5..(dates.len().max(1) as f64 - 0.5)
}

fn date_label(dates: &[NaiveDate], x: f64) -> String {
    let index = x.round();
    if (x - index).abs() > 1e-6 || index < 0.0 {
        return String::new();
    }
    dates
        .get(index as usize)
        .map(|d| d.format("%d-%m").to_string())
        .unwrap_or_default()
}

/// Always includes zero and never collapses to an empty range
fn value_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (lo, hi) = values.fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let span = hi - lo;
    if span <= 0.0 {
        return lo..lo + 1.0;
    }
    lo..hi + span * 0.1
}

use clap::{Parser, Subcommand};
use fitlog_core::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fitlog")]
#[command(about = "Simulate, record and chart daily fitness metrics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override output directory for per-user tables
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a week of observations, export per-user tables and draw the chart (default)
    Run {
        /// Don't print the per-user tables
        #[arg(long)]
        quiet: bool,
    },

    /// Print one user's exported tables
    Show {
        /// User id, e.g. User1
        #[arg(long)]
        user: String,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    fitlog_core::logging::init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(output_dir) = cli.output_dir {
        config.data.output_dir = output_dir;
    }
    config.validate()?;
    tracing::debug!(
        "Reference tables {:?} / {:?}, output {:?}",
        config.data.workout_data,
        config.data.food_data,
        config.data.output_dir
    );

    match cli.command {
        Some(Commands::Run { quiet }) => cmd_run(&config, quiet),
        Some(Commands::Show { user }) => cmd_show(&config, &user),
        None => cmd_run(&config, false),
    }
}

fn cmd_run(config: &Config, quiet: bool) -> Result<()> {
    let references = References::load(&config.data.workout_data, &config.data.food_data)?;
    let recorder = Recorder::new(&references).with_policy(config.recorder.policy());

    let mut tables = FitnessTables::new();
    let summary = Simulator::new(recorder, &config.simulation).run(&mut tables)?;

    if !quiet {
        for user in tables.partition() {
            println!();
            print!("{}", fitlog_core::report::render_user(&user));
        }
    }

    let dirs = export_all(&tables, &config.data.output_dir)?;
    fitlog_core::chart::render_to_file(&tables, &config.chart.path, &config.chart)?;

    println!();
    println!(
        "✓ Recorded {} users over {} days",
        summary.users, summary.days
    );
    if summary.workouts_dropped > 0 || summary.foods_dropped > 0 {
        println!(
            "  Dropped {} workouts and {} food entries with no reference data",
            summary.workouts_dropped, summary.foods_dropped
        );
    }
    println!("✓ Exported {} user folders to {}", dirs.len(), config.data.output_dir.display());
    println!("✓ Chart saved to {}", config.chart.path.display());

    Ok(())
}

fn cmd_show(config: &Config, user: &str) -> Result<()> {
    let dir = user_dir(&config.data.output_dir, user);
    if !dir.exists() {
        println!("No exported data for {} in {}", user, config.data.output_dir.display());
        return Ok(());
    }

    let tables = load_user_export(&dir)?;
    print!("{}", fitlog_core::report::render_user(&tables.for_user(user)));
    Ok(())
}

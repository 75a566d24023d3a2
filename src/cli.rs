//! Command line front end
//!
//! Loads a program (and optionally its logged history) from JSON, runs one
//! query and prints the result as pretty JSON on stdout. Logs go to stderr.
//!
//! ```text
//! lift-planner --program program.json --logs logs.json plan --week 2
//! lift-planner --program program.json capacities --week 3
//! lift-planner --program program.json deload --lift Squat --week 2 --day 1
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::commands::{percentile, plan, progression};
use crate::config::{load_logs, load_program, PlannerSettings};
use crate::models::{TrainingLogs, TrainingState};
use crate::percentiles::{PercentileTable, Sex};

#[derive(Debug, Parser)]
#[command(
    name = "lift-planner",
    version,
    about = "Strength program planner",
    long_about = "Project training maxes from logged sessions and resolve a program's day plans"
)]
pub struct Cli {
    /// Program definition (JSON)
    #[arg(long, short = 'p')]
    pub program: PathBuf,

    /// Logged sessions (JSON). Without it every lift sits at its starting capacity.
    #[arg(long, short = 'l')]
    pub logs: Option<PathBuf>,

    /// Rounding increment override, wins over PLANNER_ROUNDING_INCREMENT
    #[arg(long)]
    pub rounding: Option<f64>,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve a week's plan, or a single day of it
    Plan {
        #[arg(long)]
        week: u32,
        #[arg(long)]
        day: Option<u32>,
    },

    /// Training max of every lift at the start of a week
    Capacities {
        #[arg(long)]
        week: u32,
    },

    /// Week-by-week training max for one lift
    History {
        #[arg(long)]
        lift: String,
        /// Defaults to the program's last week
        #[arg(long)]
        through_week: Option<u32>,
    },

    /// Deload outlook for a linear lift's session
    Deload {
        #[arg(long)]
        lift: String,
        #[arg(long)]
        week: u32,
        #[arg(long)]
        day: u32,
    },

    /// Rank a training max against competition results
    Percentile {
        /// OpenPowerlifting percentile table (JSON)
        #[arg(long)]
        table: PathBuf,
        #[arg(long)]
        lift: String,
        #[arg(long)]
        week: u32,
        #[arg(long)]
        sex: Sex,
        /// In the program's units
        #[arg(long)]
        bodyweight: f64,
        #[arg(long)]
        age: Option<f64>,
    },
}

/// Entry point for the `lift-planner` binary
pub fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = PlannerSettings::from_env();
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { settings.log_filter.as_str() };
    tracing_subscriber::registry()
        .with(EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("lift-planner v{}", env!("CARGO_PKG_VERSION"));

    let output = execute(&cli, &settings)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Build the training state a CLI invocation describes
pub fn load_state(cli: &Cli, settings: &PlannerSettings) -> Result<TrainingState> {
    let definition = load_program(&cli.program)
        .with_context(|| format!("Failed to load program {}", cli.program.display()))?;

    let logs = match &cli.logs {
        Some(path) => load_logs(path).with_context(|| format!("Failed to load logs {}", path.display()))?,
        None => TrainingLogs::default(),
    };

    let mut state = TrainingState::with_logs(definition, logs);
    if let Some(increment) = cli.rounding.or(settings.rounding_increment) {
        state.set_rounding_increment(increment);
    }
    Ok(state)
}

/// Run the selected subcommand and return its JSON output
pub fn execute(cli: &Cli, settings: &PlannerSettings) -> Result<Value> {
    let state = load_state(cli, settings)?;

    let output = match &cli.command {
        Command::Plan { week, day: None } => {
            serde_json::to_value(plan::get_week_plan(&state, *week).map_err(anyhow::Error::msg)?)?
        }
        Command::Plan { week, day: Some(day) } => {
            serde_json::to_value(plan::get_day_plan(&state, *week, *day).map_err(anyhow::Error::msg)?)?
        }
        Command::Capacities { week } => {
            serde_json::to_value(progression::get_capacity_table(&state, *week).map_err(anyhow::Error::msg)?)?
        }
        Command::History { lift, through_week } => {
            let through = through_week
                .or_else(|| state.definition.weeks.iter().copied().max())
                .unwrap_or(1);
            serde_json::to_value(progression::get_capacity_history(&state, lift, through).map_err(anyhow::Error::msg)?)?
        }
        Command::Deload { lift, week, day } => {
            serde_json::to_value(progression::get_deload_status(&state, lift, *week, *day).map_err(anyhow::Error::msg)?)?
        }
        Command::Percentile {
            table,
            lift,
            week,
            sex,
            bodyweight,
            age,
        } => {
            let table = PercentileTable::load(table)
                .with_context(|| format!("Failed to load percentile table {}", table.display()))?;
            let rank = percentile::get_strength_percentile(&state, &table, lift, *week, *sex, *bodyweight, *age)
                .map_err(anyhow::Error::msg)?;
            serde_json::to_value(rank)?
        }
    };

    Ok(output)
}

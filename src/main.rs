use chrono::Local;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod db;
mod storage;

use commands::{ConfigCommand, FoodCommand, HabitCommand, MealCommand, ProfileCommand};
use config::Config;
use storage::open_storage;

#[derive(Parser)]
#[command(name = "habitfit")]
#[command(version)]
#[command(about = "Track daily habits, meals and calories", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage habits and mark them done
    Habit(HabitCommand),

    /// Manage body metrics and the calorie goal
    Profile(ProfileCommand),

    /// Log and review meals
    Meal(MealCommand),

    /// Query the food table
    Food(FoodCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "habitfit=debug,habitfit_core=debug"
    } else {
        "habitfit=warn,habitfit_core=warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    // Save config path for config commands
    let cli_config_path = cli.config.clone();

    // Load configuration
    let config = Config::load(cli.config)?;

    // Read the clock once; every derivation in this invocation uses it
    let today = Local::now().date_naive();

    match cli.command {
        Some(Commands::Habit(cmd)) => {
            let storage = open_storage(&config)?;
            cmd.run(storage.as_ref(), &config, today)?;
        }
        Some(Commands::Profile(cmd)) => {
            let storage = open_storage(&config)?;
            cmd.run(storage.as_ref())?;
        }
        Some(Commands::Meal(cmd)) => {
            let storage = open_storage(&config)?;
            cmd.run(storage.as_ref(), today)?;
        }
        Some(Commands::Food(cmd)) => {
            cmd.run()?;
        }
        Some(Commands::Config(cmd)) => {
            cmd.run(&config, cli_config_path)?;
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}

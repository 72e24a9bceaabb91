use clap::{Args, Subcommand};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use super::OutputFormat;
use crate::config::Config;

const DEFAULT_CONFIG: &str = r#"# habitfit configuration

# Directory for stored habits, profile and meals
# (default: platform data dir, e.g. ~/.local/share/habitfit)
# data_dir: ~/.local/share/habitfit

# Storage backend: file (one JSON file per record) or sqlite
storage: file

# Create the starter habits on first run
seed_default_habits: true
"#;

#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show current configuration values
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Initialize configuration file
    Init,
}

impl ConfigCommand {
    pub fn run(
        &self,
        config: &Config,
        cli_config_path: Option<PathBuf>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ConfigSubcommand::Show { format } => {
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(config)?);
                    }
                    OutputFormat::Text => {
                        println!("Configuration");
                        println!("=============\n");

                        if let Some(path) = &config.config_file {
                            println!("Config file: {}", path.display());
                        } else {
                            let path = cli_config_path.unwrap_or_else(Config::default_config_path);
                            println!("Config file: {} (not found)", path.display());
                        }
                        println!();

                        println!("data_dir: {}", config.data_dir.value.display());
                        println!("  source: {}", config.data_dir.source);
                        println!();

                        println!("storage: {}", config.storage.value);
                        println!("  source: {}", config.storage.source);
                        println!();

                        println!("seed_default_habits: {}", config.seed_default_habits.value);
                        println!("  source: {}", config.seed_default_habits.source);
                    }
                }
                Ok(())
            }

            ConfigSubcommand::Init => {
                let config_path = cli_config_path.unwrap_or_else(Config::default_config_path);
                write_default_config(&config_path)
            }
        }
    }
}

fn write_default_config(config_path: &std::path::Path) -> Result<(), Box<dyn std::error::Error>> {
    // Check if config already exists
    if config_path.exists() {
        println!("Config file already exists: {}", config_path.display());
        println!("Use 'habitfit config show' to view current configuration.");
        return Ok(());
    }

    // Create parent directory
    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut file = fs::File::create(config_path)?;
    file.write_all(DEFAULT_CONFIG.as_bytes())?;

    println!("Created config file: {}", config_path.display());
    println!("\nEdit this file to customize your settings.");
    Ok(())
}

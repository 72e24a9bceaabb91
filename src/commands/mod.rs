mod config_cmd;
mod food;
mod habit;
mod meal;
mod profile;

pub use config_cmd::ConfigCommand;
pub use food::FoodCommand;
pub use habit::HabitCommand;
pub use meal::MealCommand;
pub use profile::ProfileCommand;

use chrono::NaiveDate;
use clap::ValueEnum;

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Parse a YYYY-MM-DD command-line date
fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date format '{}'. Use YYYY-MM-DD.", value))
}

/// Text progress bar, `width` cells wide
fn progress_bar(percentage: f64, width: usize) -> String {
    let filled = ((percentage.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2025-03-10"),
            Ok(NaiveDate::from_ymd_opt(2025, 3, 10).unwrap())
        );
        assert!(parse_date("10/03/2025").is_err());
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0.0, 4), "[----]");
        assert_eq!(progress_bar(50.0, 4), "[##--]");
        assert_eq!(progress_bar(250.0, 4), "[####]");
    }
}

use clap::{Args, Subcommand};
use habitfit_core::food::{lookup, FOOD_TABLE};
use habitfit_core::{lookup_nutrition, FoodMatch};
use serde::Serialize;

use super::OutputFormat;

#[derive(Args)]
pub struct FoodCommand {
    #[command(subcommand)]
    pub command: FoodSubcommand,
}

#[derive(Subcommand)]
pub enum FoodSubcommand {
    /// Classify a free-text label against the food table
    Match {
        /// Label to classify
        label: String,

        /// Number of servings
        #[arg(long, short, default_value_t = 1.0)]
        servings: f64,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show nutrition for a food key
    Lookup {
        /// Food key, as shown by 'food list'
        key: String,

        /// Number of servings
        #[arg(long, short, default_value_t = 1.0)]
        servings: f64,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// List the food table
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

/// One table row as shown by `food list`
#[derive(Serialize)]
struct FoodRow {
    key: &'static str,
    serving_size: f64,
    calories: u32,
    protein: u32,
    carbs: u32,
    fat: u32,
}

impl FoodCommand {
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            FoodSubcommand::Match {
                label,
                servings,
                format,
            } => {
                validate_label(label)?;
                validate_servings(*servings)?;
                let matched = FoodMatch::classify(label, *servings);

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&matched)?);
                    }
                    OutputFormat::Text => {
                        let note = if matched.is_fallback() {
                            " (no match, generic estimate)"
                        } else {
                            ""
                        };
                        println!("'{}' -> {}{}", matched.label, matched.key, note);
                        println!("  {}", matched.facts);
                    }
                }
                Ok(())
            }

            FoodSubcommand::Lookup {
                key,
                servings,
                format,
            } => {
                validate_servings(*servings)?;
                let key = key.trim().to_lowercase();
                let facts = lookup_nutrition(&key, *servings)
                    .ok_or_else(|| format!("Food not found: {}", key))?;

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&facts)?);
                    }
                    OutputFormat::Text => {
                        let grams = lookup(&key).map(|e| e.serving_size).unwrap_or_default();
                        println!("{} x{} ({} g per serving)", key, servings, grams);
                        println!("  {}", facts);
                    }
                }
                Ok(())
            }

            FoodSubcommand::List { format } => {
                let rows: Vec<FoodRow> = FOOD_TABLE
                    .iter()
                    .map(|(key, entry)| {
                        let facts = entry.per_serving();
                        FoodRow {
                            key: *key,
                            serving_size: entry.serving_size,
                            calories: facts.calories,
                            protein: facts.protein,
                            carbs: facts.carbs,
                            fat: facts.fat,
                        }
                    })
                    .collect();

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&rows)?);
                    }
                    OutputFormat::Text => {
                        println!(
                            "{:<22} {:>8} {:>6} {:>8} {:>6} {:>5}",
                            "FOOD", "SERVING", "KCAL", "PROTEIN", "CARBS", "FAT"
                        );
                        println!("{}", "-".repeat(60));
                        for row in &rows {
                            println!(
                                "{:<22} {:>6}g {:>6} {:>7}g {:>5}g {:>4}g",
                                row.key,
                                row.serving_size,
                                row.calories,
                                row.protein,
                                row.carbs,
                                row.fat
                            );
                        }
                        println!("\nTotal: {} food(s), values per serving", rows.len());
                    }
                }
                Ok(())
            }
        }
    }
}

/// Blank labels would silently match the first table entry.
pub(super) fn validate_label(label: &str) -> Result<(), String> {
    if label.trim().is_empty() {
        Err("Food label cannot be empty".to_string())
    } else {
        Ok(())
    }
}

pub(super) fn validate_servings(servings: f64) -> Result<(), String> {
    if servings.is_finite() && servings > 0.0 {
        Ok(())
    } else {
        Err("Servings must be a positive number".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_servings() {
        assert!(validate_servings(0.5).is_ok());
        assert!(validate_servings(0.0).is_err());
        assert!(validate_servings(-1.0).is_err());
        assert!(validate_servings(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_label() {
        assert!(validate_label("dal").is_ok());
        assert!(validate_label("").is_err());
        assert!(validate_label("  \t").is_err());
    }
}

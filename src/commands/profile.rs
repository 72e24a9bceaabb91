use clap::{Args, Subcommand};
use habitfit_core::nutrition::{basal_metabolic_rate, total_daily_energy_expenditure};
use habitfit_core::{KeyValueStorage, NutritionStore, ProfileUpdate, UserProfile};

use super::OutputFormat;

#[derive(Args)]
pub struct ProfileCommand {
    #[command(subcommand)]
    pub command: ProfileSubcommand,
}

#[derive(Subcommand)]
pub enum ProfileSubcommand {
    /// Create the profile (replaces any existing one)
    Setup {
        /// Age in years
        #[arg(long)]
        age: u32,

        /// Weight in kg
        #[arg(long)]
        weight: f64,

        /// Height in cm
        #[arg(long)]
        height: f64,
    },

    /// Change one or more body metrics; the calorie goal is recomputed
    Update {
        /// Age in years
        #[arg(long)]
        age: Option<u32>,

        /// Weight in kg
        #[arg(long)]
        weight: Option<f64>,

        /// Height in cm
        #[arg(long)]
        height: Option<f64>,
    },

    /// Show the profile and calorie goal
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl ProfileCommand {
    pub fn run(&self, storage: &dyn KeyValueStorage) -> Result<(), Box<dyn std::error::Error>> {
        let mut store = NutritionStore::load(storage)?;

        match &self.command {
            ProfileSubcommand::Setup {
                age,
                weight,
                height,
            } => {
                validate_metrics(Some(*age), Some(*weight), Some(*height))?;

                let profile = store.setup_profile(*age, *weight, *height)?;
                println!("Profile saved.");
                println!("Daily calorie goal: {} kcal", profile.daily_calorie_goal);
                Ok(())
            }

            ProfileSubcommand::Update {
                age,
                weight,
                height,
            } => {
                let update = ProfileUpdate {
                    age: *age,
                    weight: *weight,
                    height: *height,
                };
                if update.is_empty() {
                    return Err("Nothing to update. Provide at least one option.".into());
                }
                validate_metrics(*age, *weight, *height)?;

                if !store.update_profile(&update)? {
                    return Err("No profile found. Run 'habitfit profile setup' first.".into());
                }
                if let Some(profile) = store.profile() {
                    println!("Profile updated.");
                    println!("Daily calorie goal: {} kcal", profile.daily_calorie_goal);
                }
                Ok(())
            }

            ProfileSubcommand::Show { format } => {
                let Some(profile) = store.profile() else {
                    println!("No profile found. Run 'habitfit profile setup' to create one.");
                    return Ok(());
                };

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(profile)?);
                    }
                    OutputFormat::Text => {
                        println!("{}", profile);
                        print_breakdown(profile);
                    }
                }
                Ok(())
            }
        }
    }
}

fn print_breakdown(profile: &UserProfile) {
    let bmr = basal_metabolic_rate(profile.age, profile.weight, profile.height);
    let tdee = total_daily_energy_expenditure(profile.age, profile.weight, profile.height);
    println!();
    println!("  BMR:  {:.0} kcal", bmr);
    println!("  TDEE: {:.0} kcal (moderately active)", tdee);
}

/// Body metrics must be positive numbers
fn validate_metrics(
    age: Option<u32>,
    weight: Option<f64>,
    height: Option<f64>,
) -> Result<(), String> {
    if age == Some(0) {
        return Err("Age must be a positive number".to_string());
    }
    if let Some(w) = weight {
        if !(w.is_finite() && w > 0.0) {
            return Err("Weight must be a positive number".to_string());
        }
    }
    if let Some(h) = height {
        if !(h.is_finite() && h > 0.0) {
            return Err("Height must be a positive number".to_string());
        }
    }
    Ok(())
}

use chrono::{Local, NaiveDate};
use clap::{Args, Subcommand};
use habitfit_core::nutrition::{
    calorie_summary, daily_logs, macro_split, todays_meals, todays_nutrition, weekly_data,
};
use habitfit_core::{
    DailyLog, FoodMatch, KeyValueStorage, NewMeal, NutritionFacts, NutritionStore,
};

use super::food::{validate_label, validate_servings};
use super::{parse_date, progress_bar, OutputFormat};

#[derive(Args)]
pub struct MealCommand {
    #[command(subcommand)]
    pub command: MealSubcommand,
}

#[derive(Subcommand)]
pub enum MealSubcommand {
    /// Log a meal with explicit nutrition values
    Add {
        /// Name of the meal
        name: String,

        /// Calories (kcal)
        #[arg(long)]
        calories: u32,

        /// Protein in grams
        #[arg(long, default_value_t = 0)]
        protein: u32,

        /// Carbs in grams
        #[arg(long, default_value_t = 0)]
        carbs: u32,

        /// Fat in grams
        #[arg(long, default_value_t = 0)]
        fat: u32,

        /// Photo reference
        #[arg(long)]
        image_url: Option<String>,
    },

    /// Log a meal from a food label, e.g. a photo classifier's guess
    Scan {
        /// Free-text label
        label: String,

        /// Number of servings
        #[arg(long, short, default_value_t = 1.0)]
        servings: f64,

        /// Photo reference
        #[arg(long)]
        image_url: Option<String>,
    },

    /// Delete a logged meal
    Remove {
        /// Meal ID
        id: String,
    },

    /// Show today's meals and totals against the calorie goal
    Today {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show daily totals for the last seven days
    Week {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// View meal history
    History {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Start date (YYYY-MM-DD), defaults to 7 days before the end date
        #[arg(long)]
        from: Option<String>,

        /// End date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        to: Option<String>,
    },
}

impl MealCommand {
    pub fn run(
        &self,
        storage: &dyn KeyValueStorage,
        today: NaiveDate,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut store = NutritionStore::load(storage)?;

        match &self.command {
            MealSubcommand::Add {
                name,
                calories,
                protein,
                carbs,
                fat,
                image_url,
            } => {
                let name = name.trim();
                if name.is_empty() {
                    return Err("Meal name cannot be empty".into());
                }

                let mut fields =
                    NewMeal::new(name, NutritionFacts::new(*calories, *protein, *carbs, *fat));
                if let Some(url) = image_url {
                    fields = fields.with_image_url(url);
                }

                let meal = store.add_meal(fields)?;
                println!("Logged meal:");
                println!("  {}", meal);
                println!("\nMeal ID: {}", meal.id);
                Ok(())
            }

            MealSubcommand::Scan {
                label,
                servings,
                image_url,
            } => {
                validate_label(label)?;
                validate_servings(*servings)?;

                let matched = FoodMatch::classify(label, *servings);
                if matched.is_fallback() {
                    println!("No close match for '{}', using a generic estimate.", label);
                } else {
                    println!("Matched '{}' as {}", label, matched.key);
                }

                let mut fields = NewMeal::new(matched.key, matched.facts);
                if let Some(url) = image_url {
                    fields = fields.with_image_url(url);
                }

                let meal = store.add_meal(fields)?;
                println!("Logged meal:");
                println!("  {}", meal);
                println!("\nMeal ID: {}", meal.id);
                Ok(())
            }

            MealSubcommand::Remove { id } => {
                if !store.remove_meal(id)? {
                    return Err(format!("Meal not found: {}", id).into());
                }
                println!("Deleted meal: {}", id);
                Ok(())
            }

            MealSubcommand::Today { format } => {
                let meals = todays_meals(store.meals(), today, &Local);
                let totals = todays_nutrition(store.meals(), today, &Local);
                let split = macro_split(&totals);
                let summary = store
                    .profile()
                    .map(|profile| calorie_summary(profile, store.meals(), today, &Local));

                match format {
                    OutputFormat::Json => {
                        let output = serde_json::json!({
                            "date": today,
                            "meals": meals,
                            "totals": totals,
                            "macroSplit": split,
                            "calories": summary,
                        });
                        println!("{}", serde_json::to_string_pretty(&output)?);
                    }
                    OutputFormat::Text => {
                        println!("{}", today);
                        println!("{}", "-".repeat(10));

                        if meals.is_empty() {
                            println!("  No meals logged today");
                        }
                        for meal in &meals {
                            println!("  {}", meal);
                        }

                        println!();
                        match &summary {
                            Some(s) => {
                                println!(
                                    "Calories: {} / {} kcal {}",
                                    s.consumed,
                                    s.goal,
                                    progress_bar(s.progress, 20)
                                );
                                if s.over_goal {
                                    println!("Goal reached!");
                                } else {
                                    println!("Remaining: {} kcal", s.remaining);
                                }
                            }
                            None => {
                                println!(
                                    "Calories: {} kcal (no profile, no goal set)",
                                    totals.calories
                                );
                            }
                        }
                        println!(
                            "Protein: {}g ({:.0}%) | Carbs: {}g ({:.0}%) | Fat: {}g ({:.0}%)",
                            totals.protein,
                            split.protein,
                            totals.carbs,
                            split.carbs,
                            totals.fat,
                            split.fat
                        );
                    }
                }
                Ok(())
            }

            MealSubcommand::Week { format } => {
                let week = weekly_data(store.meals(), today, &Local);
                let goal = store.profile().map(|p| p.daily_calorie_goal);
                print_logs(&week, goal, format, false)
            }

            MealSubcommand::History { format, from, to } => {
                let to_date = match to {
                    Some(d) => parse_date(d)?,
                    None => today,
                };
                let from_date = match from {
                    Some(d) => parse_date(d)?,
                    None => to_date - chrono::Duration::days(7),
                };
                if from_date > to_date {
                    return Err(format!(
                        "Start date {} is after end date {}",
                        from_date, to_date
                    )
                    .into());
                }

                let logs = daily_logs(store.meals(), from_date, to_date, &Local);
                if logs.iter().all(|log| log.meals.is_empty()) {
                    println!("No meal history found for {} to {}", from_date, to_date);
                    return Ok(());
                }

                let goal = store.profile().map(|p| p.daily_calorie_goal);
                print_logs(&logs, goal, format, true)
            }
        }
    }
}

fn print_logs(
    logs: &[DailyLog],
    goal: Option<u32>,
    format: &OutputFormat,
    with_meals: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(logs)?);
        }
        OutputFormat::Text => {
            for log in logs {
                let bar = match goal {
                    Some(goal) if goal > 0 => {
                        progress_bar(f64::from(log.total_calories) / f64::from(goal) * 100.0, 10)
                    }
                    _ => String::new(),
                };
                println!(
                    "{} {}  {:>5} kcal  {}",
                    log.date.format("%a"),
                    log.date,
                    log.total_calories,
                    bar
                );

                if with_meals {
                    for meal in &log.meals {
                        println!("    {}", meal);
                    }
                }
            }

            let meal_count: usize = logs.iter().map(|l| l.meals.len()).sum();
            println!("\nTotal: {} meal(s)", meal_count);
        }
    }
    Ok(())
}

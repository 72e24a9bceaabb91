use chrono::NaiveDate;
use clap::{Args, Subcommand};
use habitfit_core::habits::{
    is_completed_today, streak, today_progress, todays_habits, week_progress,
};
use habitfit_core::models::{format_schedule, parse_schedule};
use habitfit_core::{Habit, HabitStore, HabitUpdate, KeyValueStorage};
use serde::Serialize;
use std::io::{self, Write};

use super::{progress_bar, OutputFormat};
use crate::config::Config;

const DEFAULT_EMOJI: &str = "✅";

#[derive(Args)]
pub struct HabitCommand {
    #[command(subcommand)]
    pub command: HabitSubcommand,
}

#[derive(Subcommand)]
pub enum HabitSubcommand {
    /// List all habits in display order
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Add a new habit
    Add {
        /// Name of the habit
        name: String,

        /// Emoji shown next to the habit
        #[arg(long, short, default_value = DEFAULT_EMOJI)]
        emoji: String,

        /// Scheduled days: all, weekdays, weekends, or a list like mon,wed,fri
        #[arg(long, short, default_value = "all")]
        days: String,
    },

    /// Edit a habit's name, emoji or schedule
    Edit {
        /// Habit ID or name
        identifier: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New emoji
        #[arg(long, short)]
        emoji: Option<String>,

        /// New scheduled days
        #[arg(long, short)]
        days: Option<String>,
    },

    /// Delete a habit
    Remove {
        /// Habit ID or name
        identifier: String,

        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },

    /// Move a habit to a new position (1 = first)
    Move {
        /// Habit ID or name
        identifier: String,

        /// Target position, starting at 1
        position: usize,
    },

    /// Mark a habit done for today, or undo it
    Toggle {
        /// Habit ID or name
        identifier: String,
    },

    /// Show habits scheduled today with their completion state
    Today {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show current streaks
    Streak {
        /// Habit ID or name (all habits if omitted)
        identifier: Option<String>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show completion for the last seven days
    Week {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

/// A habit with its state on the reference day
#[derive(Serialize)]
struct HabitStatus<'a> {
    #[serde(flatten)]
    habit: &'a Habit,
    completed_today: bool,
    streak: u32,
}

impl HabitCommand {
    pub fn run(
        &self,
        storage: &dyn KeyValueStorage,
        config: &Config,
        today: NaiveDate,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut store = if config.seed_default_habits.value {
            HabitStore::load_or_seed(storage)?
        } else {
            HabitStore::load(storage)?
        };

        match &self.command {
            HabitSubcommand::List { format } => {
                if store.is_empty() {
                    println!("No habits found");
                    return Ok(());
                }

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(store.habits())?);
                    }
                    OutputFormat::Text => {
                        println!("{:<4} {:<36}  {:<24}  SCHEDULE", "#", "ID", "HABIT");
                        println!("{}", "-".repeat(90));
                        for habit in store.habits() {
                            let label = format!("{} {}", habit.emoji, habit.name);
                            println!(
                                "{:<4} {:<36}  {:<24}  {}",
                                habit.order + 1,
                                habit.id,
                                label,
                                format_schedule(&habit.scheduled_days)
                            );
                        }
                        println!("\nTotal: {} habit(s)", store.len());
                    }
                }
                Ok(())
            }

            HabitSubcommand::Add { name, emoji, days } => {
                let name = validated_name(name)?;
                let scheduled_days = parse_schedule(days)?;

                let habit = store.add(name, emoji.trim(), Some(scheduled_days))?;
                println!("Added habit:");
                println!("  {}", habit);
                println!("\nHabit ID: {}", habit.id);
                Ok(())
            }

            HabitSubcommand::Edit {
                identifier,
                name,
                emoji,
                days,
            } => {
                if name.is_none() && emoji.is_none() && days.is_none() {
                    return Err("Nothing to update. Provide at least one option.".into());
                }

                let habit = find_habit(&store, identifier)?.clone();
                let update = HabitUpdate {
                    name: match name {
                        Some(n) => validated_name(n)?.to_string(),
                        None => habit.name.clone(),
                    },
                    emoji: emoji
                        .as_deref()
                        .map(|e| e.trim().to_string())
                        .unwrap_or_else(|| habit.emoji.clone()),
                    scheduled_days: match days {
                        Some(d) => parse_schedule(d)?,
                        None => habit.scheduled_days.clone(),
                    },
                };

                store.update(&habit.id, update)?;
                if let Some(updated) = store.get(&habit.id) {
                    println!("Updated habit:");
                    println!("  {}", updated);
                }
                Ok(())
            }

            HabitSubcommand::Remove { identifier, force } => {
                let habit = find_habit(&store, identifier)?.clone();

                // Confirm deletion unless --force is used
                if !force {
                    print!("Delete habit '{}' and its history? [y/N] ", habit.name);
                    io::stdout().flush()?;

                    let mut input = String::new();
                    io::stdin().read_line(&mut input)?;

                    if !input.trim().eq_ignore_ascii_case("y") {
                        println!("Deletion cancelled.");
                        return Ok(());
                    }
                }

                store.remove(&habit.id)?;
                println!("Deleted habit: {}", habit.name);
                Ok(())
            }

            HabitSubcommand::Move {
                identifier,
                position,
            } => {
                if *position == 0 {
                    return Err("Position starts at 1".into());
                }

                let habit = find_habit(&store, identifier)?.clone();
                store.reorder(habit.order, position - 1)?;

                let placed = store.get(&habit.id).map(|h| h.order + 1).unwrap_or(*position);
                println!("Moved '{}' to position {}", habit.name, placed);
                Ok(())
            }

            HabitSubcommand::Toggle { identifier } => {
                let habit = find_habit(&store, identifier)?.clone();

                match store.toggle(&habit.id, today)? {
                    Some(true) => {
                        let days = store.get(&habit.id).map(|h| streak(h, today)).unwrap_or(0);
                        println!(
                            "{} {} done for {} (streak: {} day(s))",
                            habit.emoji, habit.name, today, days
                        );
                    }
                    Some(false) => {
                        println!(
                            "{} {} marked not done for {}",
                            habit.emoji, habit.name, today
                        );
                    }
                    None => return Err(format!("Habit not found: {}", identifier).into()),
                }
                Ok(())
            }

            HabitSubcommand::Today { format } => {
                let scheduled = todays_habits(store.habits(), today);
                let statuses: Vec<HabitStatus> = scheduled
                    .into_iter()
                    .map(|habit| HabitStatus {
                        habit,
                        completed_today: is_completed_today(habit, today),
                        streak: streak(habit, today),
                    })
                    .collect();
                let progress = today_progress(store.habits(), today);

                match format {
                    OutputFormat::Json => {
                        let output = serde_json::json!({
                            "date": today,
                            "habits": statuses,
                            "progress": progress,
                        });
                        println!("{}", serde_json::to_string_pretty(&output)?);
                    }
                    OutputFormat::Text => {
                        println!("{} ({})", today, today.format("%A"));
                        println!("{}", "-".repeat(24));

                        if statuses.is_empty() {
                            println!("No habits scheduled today");
                            return Ok(());
                        }

                        for status in &statuses {
                            let mark = if status.completed_today { "x" } else { " " };
                            let flame = if status.streak > 0 {
                                format!("  🔥 {}", status.streak)
                            } else {
                                String::new()
                            };
                            println!(
                                "  [{}] {} {}{}",
                                mark, status.habit.emoji, status.habit.name, flame
                            );
                        }

                        println!(
                            "\n{} {}/{} ({}%)",
                            progress_bar(f64::from(progress.percentage), 20),
                            progress.completed,
                            progress.total,
                            progress.percentage
                        );
                    }
                }
                Ok(())
            }

            HabitSubcommand::Streak { identifier, format } => {
                let habits: Vec<&Habit> = match identifier {
                    Some(id) => vec![find_habit(&store, id)?],
                    None => store.habits().iter().collect(),
                };

                match format {
                    OutputFormat::Json => {
                        let streaks: Vec<_> = habits
                            .iter()
                            .map(|h| {
                                serde_json::json!({
                                    "id": h.id,
                                    "name": h.name,
                                    "streak": streak(h, today),
                                })
                            })
                            .collect();
                        println!("{}", serde_json::to_string_pretty(&streaks)?);
                    }
                    OutputFormat::Text => {
                        if habits.is_empty() {
                            println!("No habits found");
                            return Ok(());
                        }
                        for habit in habits {
                            println!(
                                "  {} {:<24} {} day(s)",
                                habit.emoji,
                                habit.name,
                                streak(habit, today)
                            );
                        }
                    }
                }
                Ok(())
            }

            HabitSubcommand::Week { format } => {
                let week = week_progress(store.habits(), today);

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&week)?);
                    }
                    OutputFormat::Text => {
                        for day in &week {
                            println!(
                                "  {} {}  {} {}/{} ({}%)",
                                day.date.format("%a"),
                                day.date,
                                progress_bar(f64::from(day.percentage), 10),
                                day.completed,
                                day.total,
                                day.percentage
                            );
                        }
                    }
                }
                Ok(())
            }
        }
    }
}

fn validated_name(name: &str) -> Result<&str, String> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Habit name cannot be empty".to_string());
    }
    Ok(name)
}

fn find_habit<'a, S: KeyValueStorage>(
    store: &'a HabitStore<S>,
    identifier: &str,
) -> Result<&'a Habit, String> {
    store
        .find(identifier)
        .ok_or_else(|| format!("Habit not found: {}", identifier))
}

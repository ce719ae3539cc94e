use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use lift_core::estimation::{
    format_mm_ss, pace_seconds_per_km, percentage_table, split_seconds_per_500m,
    MAX_ESTIMABLE_REPS,
};
use lift_core::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lift")]
#[command(about = "Strength workout suggestions and progression tracking", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Suggest exercises for a workout focus
    Suggest {
        /// Workout focus (push, pull, legs-core, full)
        #[arg(long)]
        focus: String,

        /// Comma-separated equipment pool (defaults to the configured equipment)
        #[arg(long, value_delimiter = ',')]
        equipment: Vec<String>,

        /// Maximum number of suggestions
        #[arg(long)]
        max: Option<usize>,

        /// Explicit day-seed
        #[arg(long, conflicts_with = "date")]
        seed: Option<i64>,

        /// Date to derive the day-seed from (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Log a set and report any personal record it sets
    Log {
        /// Exercise id from the catalog
        #[arg(long)]
        exercise: u32,

        /// Equipment used
        #[arg(long)]
        equipment: String,

        #[arg(long)]
        reps: u32,

        /// Load in kilograms (omit for unweighted work)
        #[arg(long)]
        weight: Option<f64>,

        /// success, fail or neutral
        #[arg(long, default_value = "success")]
        outcome: String,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Suggest the next load from the last successful set
    NextLoad {
        #[arg(long)]
        exercise: u32,

        #[arg(long)]
        equipment: String,

        /// Only consider sets with exactly this many reps
        #[arg(long)]
        reps: Option<u32>,
    },

    /// Estimate a one-rep max and print the percentage table
    E1rm {
        #[arg(long)]
        weight: f64,

        #[arg(long)]
        reps: u32,
    },

    /// Compute pace per km and split per 500 m
    Pace {
        /// Distance in metres
        #[arg(long)]
        distance: f64,

        /// Time in seconds
        #[arg(long)]
        time: f64,
    },

    /// List stored personal records
    Records,

    /// List catalog exercises
    Exercises {
        /// Movement pattern (e.g. squat, horizontal_push)
        #[arg(long)]
        pattern: Option<String>,

        /// Equipment kind
        #[arg(long)]
        equipment: Option<String>,
    },

    /// Export logged sets to CSV
    Export {
        #[arg(long)]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    lift_core::logging::init();

    let cli = Cli::parse();

    let config = Config::load()?;
    let data_dir = cli
        .data_dir
        .unwrap_or_else(|| config.data.data_dir.clone());

    let catalog = get_default_catalog();
    let errors = catalog.validate();
    if !errors.is_empty() {
        eprintln!("Catalog validation errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::CatalogValidation("Invalid catalog".into()));
    }

    match cli.command {
        Commands::Suggest {
            focus,
            equipment,
            max,
            seed,
            date,
        } => cmd_suggest(catalog, &config, &focus, &equipment, max, seed, date),
        Commands::Log {
            exercise,
            equipment,
            reps,
            weight,
            outcome,
            notes,
        } => cmd_log(
            catalog,
            data_dir,
            ExerciseId(exercise),
            &equipment,
            reps,
            weight,
            &outcome,
            notes,
        ),
        Commands::NextLoad {
            exercise,
            equipment,
            reps,
        } => cmd_next_load(catalog, data_dir, ExerciseId(exercise), &equipment, reps),
        Commands::E1rm { weight, reps } => cmd_e1rm(weight, reps),
        Commands::Pace { distance, time } => cmd_pace(distance, time),
        Commands::Records => cmd_records(catalog, data_dir),
        Commands::Exercises { pattern, equipment } => cmd_exercises(catalog, pattern, equipment),
        Commands::Export { out } => cmd_export(data_dir, &out),
    }
}

fn parse_outcome(s: &str) -> Result<SetOutcome> {
    match s.trim().to_lowercase().as_str() {
        "success" | "s" => Ok(SetOutcome::Success),
        "fail" | "f" => Ok(SetOutcome::Fail),
        "neutral" | "n" => Ok(SetOutcome::Neutral),
        _ => Err(Error::Other(format!("Unknown outcome: {}", s))),
    }
}

fn exercise_name(catalog: &Catalog, id: ExerciseId) -> String {
    catalog
        .get(id)
        .map(|e| e.name.clone())
        .unwrap_or_else(|| format!("exercise {}", id))
}

fn format_kg(value: Option<f64>) -> String {
    match value {
        Some(kg) => format!("{:.1} kg", kg),
        None => "none".to_string(),
    }
}

fn cmd_suggest(
    catalog: &Catalog,
    config: &Config,
    focus: &str,
    equipment: &[String],
    max: Option<usize>,
    seed: Option<i64>,
    date: Option<String>,
) -> Result<()> {
    let focus: WorkoutType = focus.parse()?;

    let pool = if equipment.is_empty() {
        config.equipment.available.clone()
    } else {
        equipment
            .iter()
            .map(|e| e.parse::<Equipment>())
            .collect::<Result<Vec<_>>>()?
    };

    let seed = match (seed, date) {
        (Some(seed), _) => seed,
        (None, Some(date)) => {
            let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                .map_err(|e| Error::Other(format!("Invalid date {}: {}", date, e)))?;
            day_seed(date)
        }
        (None, None) => day_seed(chrono::Local::now().date_naive()),
    };

    let max_items = max.unwrap_or(config.selection.max_items);
    let suggestions = suggest_exercises_for_focus(catalog, focus, &pool, max_items, seed);

    if suggestions.is_empty() {
        println!("No exercises match the available equipment.");
        return Ok(());
    }

    println!("\n{:?} workout (seed {})", focus, seed);
    println!();
    for (i, suggestion) in suggestions.iter().enumerate() {
        let role = match suggestion.role {
            SlotRole::Main => "main",
            SlotRole::Accessory => "accessory",
            SlotRole::TopUp => "top-up",
        };
        println!(
            "  {}. [{}] {} ({}) {} {}",
            i + 1,
            suggestion.exercise.id,
            suggestion.exercise.name,
            suggestion.exercise.equipment,
            suggestion.scheme,
            role
        );
    }
    println!();

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_log(
    catalog: &Catalog,
    data_dir: PathBuf,
    exercise_id: ExerciseId,
    equipment: &str,
    reps: u32,
    weight: Option<f64>,
    outcome: &str,
    notes: Option<String>,
) -> Result<()> {
    let equipment: Equipment = equipment.parse()?;
    let outcome = parse_outcome(outcome)?;
    if catalog.get(exercise_id).is_none() {
        return Err(Error::Other(format!("Unknown exercise id: {}", exercise_id)));
    }
    if let Some(w) = weight {
        if !w.is_finite() || w <= 0.0 {
            return Err(Error::Other(format!(
                "Invalid weight {}: must be a positive number of kg",
                w
            )));
        }
    }

    let set = LoggedSet {
        id: uuid::Uuid::new_v4(),
        session_id: uuid::Uuid::new_v4(),
        exercise_id,
        equipment,
        reps,
        weight_kg: weight,
        outcome,
        notes,
        logged_at: chrono::Utc::now(),
    };

    let mut store = FileStore::open(data_dir)?;
    let event = store.log_set(&set)?;
    tracing::info!("Logged set {} for exercise {}", set.id, exercise_id);

    println!(
        "✓ Set logged: {} ({}) {} reps @ {}",
        exercise_name(catalog, exercise_id),
        equipment,
        reps,
        format_kg(weight)
    );

    if let Some(event) = event {
        display_pr(catalog, &event);
    }

    Ok(())
}

fn display_pr(catalog: &Catalog, event: &PrCelebrationEvent) {
    let name = exercise_name(catalog, event.exercise_id);
    println!();
    if event.is_hard_pr {
        println!("🏆 NEW PR! {} ({})", name, event.equipment);
        println!(
            "  {} reps @ {} (previous: {})",
            event.reps.unwrap_or_default(),
            format_kg(event.new_weight_kg),
            format_kg(event.prev_weight_kg)
        );
    } else {
        println!("⭐ New estimated 1RM! {} ({})", name, event.equipment);
    }
    if event.new_e1rm_kg.is_some() {
        println!(
            "  e1RM {} (previous: {})",
            format_kg(event.new_e1rm_kg),
            format_kg(event.prev_e1rm_kg)
        );
    }
}

fn cmd_next_load(
    catalog: &Catalog,
    data_dir: PathBuf,
    exercise_id: ExerciseId,
    equipment: &str,
    reps: Option<u32>,
) -> Result<()> {
    let equipment: Equipment = equipment.parse()?;
    let store = FileStore::open(data_dir)?;

    match suggest_next_load(&store, exercise_id, equipment, reps)? {
        Some(load) => println!(
            "Next load for {} ({}): {:.1} kg",
            exercise_name(catalog, exercise_id),
            equipment,
            load
        ),
        None => println!(
            "No successful history for {} ({})",
            exercise_name(catalog, exercise_id),
            equipment
        ),
    }

    Ok(())
}

fn cmd_e1rm(weight: f64, reps: u32) -> Result<()> {
    let Some(one_rm) = estimate_one_rep_max(weight, reps) else {
        println!(
            "1RM not estimable for {} kg x {} (needs weight > 0 and 1-{} reps)",
            weight, reps, MAX_ESTIMABLE_REPS
        );
        return Ok(());
    };

    println!("Estimated 1RM: {:.1} kg", one_rm);
    println!();
    for (reps, load) in percentage_table(one_rm) {
        println!("  {:>2} reps: {:.1} kg", reps, load);
    }

    Ok(())
}

fn cmd_pace(distance: f64, time: f64) -> Result<()> {
    match (
        pace_seconds_per_km(Some(distance), Some(time)),
        split_seconds_per_500m(Some(distance), Some(time)),
    ) {
        (Some(pace), Some(split)) => {
            println!("Pace: {} /km", format_mm_ss(pace));
            println!("Split: {} /500m", format_mm_ss(split));
        }
        _ => println!("Pace not computable (distance and time must be positive)"),
    }
    Ok(())
}

fn cmd_records(catalog: &Catalog, data_dir: PathBuf) -> Result<()> {
    let store = FileStore::open(data_dir)?;
    let records = store.list_records()?;

    if records.is_empty() {
        println!("No personal records yet.");
        return Ok(());
    }

    for record in records {
        println!(
            "  {} ({}) {}: {:.1} kg on {}",
            exercise_name(catalog, record.exercise_id),
            record.equipment,
            record.record_type,
            record.value_kg,
            record.achieved_at.format("%Y-%m-%d")
        );
    }

    Ok(())
}

fn cmd_exercises(
    catalog: &Catalog,
    pattern: Option<String>,
    equipment: Option<String>,
) -> Result<()> {
    let filter = ExerciseFilter {
        pattern: pattern.map(|p| p.parse::<MovementPattern>()).transpose()?,
        equipment: equipment
            .map(|e| e.parse::<Equipment>())
            .transpose()?
            .into_iter()
            .collect(),
        ..Default::default()
    };

    for exercise in catalog.list_exercises(&filter) {
        println!(
            "  [{:>3}] {} ({}, {:?})",
            exercise.id.0, exercise.name, exercise.equipment, exercise.pattern
        );
    }

    Ok(())
}

fn cmd_export(data_dir: PathBuf, out: &std::path::Path) -> Result<()> {
    let store = FileStore::open(data_dir)?;
    let sets = store.sets()?;

    let count = export_sets(&sets, out)?;

    println!("✓ Exported {} sets to CSV", count);
    println!("  CSV: {}", out.display());

    Ok(())
}

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use cycle_core::config::DataConfig;
use cycle_core::gestation::{days_until_due, gestation_status, weight_change};
use cycle_core::symptoms::{summarize_with_limit, MOST_COMMON_SYMPTOM_LIMIT};
use cycle_core::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "cyclewise")]
#[command(about = "Cycle and pregnancy prediction from your own history", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Evaluate as of this date (YYYY-MM-DD) instead of today
    #[arg(long, global = true, value_parser = parse_date_arg)]
    today: Option<NaiveDate>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict the next period, ovulation and fertile window
    Cycle {
        /// Period history CSV (default: <data-dir>/periods.csv)
        #[arg(long)]
        periods: Option<PathBuf>,
    },

    /// Show period, fertility and ovulation markers for one day
    Day {
        #[arg(value_parser = parse_date_arg)]
        date: NaiveDate,

        /// Period history CSV (default: <data-dir>/periods.csv)
        #[arg(long)]
        periods: Option<PathBuf>,
    },

    /// Show gestational week, trimester and this week's milestone
    Pregnancy {
        /// Pregnancy start, usually the first day of the last period
        #[arg(long, value_parser = parse_date_arg)]
        start: NaiveDate,

        /// Expected due date
        #[arg(long, value_parser = parse_date_arg)]
        due: Option<NaiveDate>,

        /// Weekly update JSON (default: <data-dir>/pregnancy_updates.json)
        #[arg(long)]
        updates: Option<PathBuf>,
    },

    /// List the fetal development milestones
    Milestones,

    /// Summarize logged symptoms
    Symptoms {
        /// Symptom log JSON (default: <data-dir>/symptoms.json)
        #[arg(long)]
        logs: Option<PathBuf>,

        /// How many of the most common symptoms to show
        #[arg(long, default_value_t = MOST_COMMON_SYMPTOM_LIMIT)]
        limit: usize,
    },
}

fn parse_date_arg(s: &str) -> std::result::Result<NaiveDate, String> {
    history::parse_date(s).map_err(|e| e.to_string())
}

fn main() -> ExitCode {
    // Initialize logging
    cycle_core::logging::init_with_level("warn");

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("Command failed: {:?}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let data = match &cli.data_dir {
        Some(dir) => {
            tracing::debug!("Data directory overridden to {:?}", dir);
            DataConfig {
                data_dir: dir.clone(),
            }
        }
        None => config.data.clone(),
    };
    let today = cli
        .today
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    tracing::debug!("Evaluating as of {}", today);

    let out = Output { json: cli.json };

    match cli.command {
        Commands::Cycle { periods } => {
            let path = periods.unwrap_or_else(|| data.periods_path());
            tracing::debug!("Reading period history from {:?}", path);
            cmd_cycle(&path, &config, today, &out)
        }
        Commands::Day { date, periods } => {
            let path = periods.unwrap_or_else(|| data.periods_path());
            tracing::debug!("Reading period history from {:?}", path);
            cmd_day(&path, date, &config, &out)
        }
        Commands::Pregnancy {
            start,
            due,
            updates,
        } => {
            let path = updates.unwrap_or_else(|| data.pregnancy_updates_path());
            tracing::debug!("Reading pregnancy updates from {:?}", path);
            cmd_pregnancy(start, due, &path, today, &out)
        }
        Commands::Milestones => cmd_milestones(&out),
        Commands::Symptoms { logs, limit } => {
            let path = logs.unwrap_or_else(|| data.symptoms_path());
            tracing::debug!("Reading symptom logs from {:?}", path);
            cmd_symptoms(&path, limit, &out)
        }
    }
}

struct Output {
    json: bool,
}

impl Output {
    fn emit_json<T: Serialize>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}

#[derive(Serialize)]
struct CycleReport {
    periods_logged: usize,
    average_cycle_length_days: i64,
    prediction: Option<CyclePrediction>,
    days_until_next_period: Option<i64>,
}

fn cmd_cycle(path: &Path, config: &Config, today: NaiveDate, out: &Output) -> Result<()> {
    let history = load_periods(path)?;
    let params = config.prediction;

    let prediction = params.predict(&history);
    let report = CycleReport {
        periods_logged: history.len(),
        average_cycle_length_days: params.average_cycle_length(&history),
        days_until_next_period: prediction
            .as_ref()
            .map(|p| (p.next_period_start - today).num_days()),
        prediction,
    };

    if out.json {
        return out.emit_json(&report);
    }

    println!("\n╭─────────────────────────────────────────╮");
    println!("│  CYCLE PREDICTION");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  Periods logged: {}", report.periods_logged);
    println!(
        "  Average cycle length: {} days",
        report.average_cycle_length_days
    );

    match (&report.prediction, report.days_until_next_period) {
        (Some(p), Some(days)) => {
            println!("  Next period: {} (in {} days)", p.next_period_start, days);
            println!("  Ovulation: {}", p.ovulation_date);
            println!(
                "  Fertile window: {} to {}",
                p.fertile_window.start, p.fertile_window.end
            );
        }
        _ => {
            println!();
            println!("  No prediction available yet. Log a period to get started.");
        }
    }
    println!();

    Ok(())
}

#[derive(Serialize)]
struct DayReport {
    date: NaiveDate,
    #[serde(flatten)]
    markers: DayMarkers,
}

fn cmd_day(path: &Path, date: NaiveDate, config: &Config, out: &Output) -> Result<()> {
    let history = load_periods(path)?;
    let markers = config.prediction.day_markers(date, &history);

    if out.json {
        return out.emit_json(&DayReport { date, markers });
    }

    println!("\n  {}", date);
    if markers.period {
        match markers.flow {
            Some(flow) => println!("  → Period day ({} flow)", flow),
            None => println!("  → Period day"),
        }
    }
    if markers.ovulation {
        println!("  → Predicted ovulation");
    }
    if markers.fertile {
        println!("  → Fertile window");
    }
    if !markers.period && !markers.fertile && !markers.ovulation {
        println!("  → Nothing logged or predicted");
    }
    println!();

    Ok(())
}

#[derive(Serialize)]
struct PregnancyReport<'a> {
    start: NaiveDate,
    #[serde(flatten)]
    status: GestationStatus,
    days_until_due: Option<i64>,
    milestone: &'a MilestoneEntry,
    updates: Vec<PregnancyUpdate>,
    weight_change: Option<WeightChange>,
}

fn cmd_pregnancy(
    start: NaiveDate,
    due: Option<NaiveDate>,
    updates_path: &Path,
    today: NaiveDate,
    out: &Output,
) -> Result<()> {
    let status = gestation_status(start, today);
    let milestone = milestone_for(status.current_week, default_milestones());
    let updates = load_pregnancy_updates(updates_path)?;
    let report = PregnancyReport {
        start,
        status,
        days_until_due: due.map(|d| days_until_due(d, today)),
        milestone,
        weight_change: weight_change(&updates),
        updates,
    };

    if out.json {
        return out.emit_json(&report);
    }

    println!("\n╭─────────────────────────────────────────╮");
    println!("│  WEEK {} · TRIMESTER {}", status.current_week, status.trimester);
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  Progress: {:.0}%", status.progress_percent);
    if let Some(days) = report.days_until_due {
        if days >= 0 {
            println!("  Due in {} days", days);
        } else {
            println!("  {} days past due date", -days);
        }
    }
    println!();
    print_milestone(milestone);

    if !report.updates.is_empty() {
        println!("  Weekly updates:");
        for update in &report.updates {
            let mut line = format!("    Week {}", update.week);
            if let Some(weight) = update.weight {
                line.push_str(&format!(" · {} lbs", weight));
            }
            if let Some(symptoms) = &update.symptoms {
                line.push_str(&format!(" · {}", symptoms));
            }
            if let Some(notes) = &update.notes {
                line.push_str(&format!(" · {}", notes));
            }
            println!("{}", line);
        }
        if let Some(change) = report.weight_change {
            println!(
                "  Weight change: {:+.1} lbs (week {} to week {})",
                change.change, change.first_week, change.latest_week
            );
        }
        println!();
    }

    Ok(())
}

fn cmd_milestones(out: &Output) -> Result<()> {
    let table = default_milestones();

    if out.json {
        return out.emit_json(&table.entries());
    }

    for entry in table.entries() {
        print_milestone(entry);
    }
    Ok(())
}

fn print_milestone(entry: &MilestoneEntry) {
    println!("  Week {}: size of a {} ({})", entry.week, entry.size, entry.weight);
    for development in &entry.developments {
        println!("    • {}", development);
    }
    for tip in &entry.tips {
        println!("    ℹ {}", tip);
    }
    println!();
}

fn cmd_symptoms(path: &Path, limit: usize, out: &Output) -> Result<()> {
    let logs = load_symptom_logs(path)?;
    let summary = summarize_with_limit(&logs, limit);

    if out.json {
        return out.emit_json(&summary);
    }

    if summary.total_logs == 0 {
        println!("No symptom logs found.");
        return Ok(());
    }

    println!("\n  Logs: {}", summary.total_logs);
    println!("  Average sleep: {:.1} hours", summary.average_sleep_hours);

    println!("\n  Most common symptoms:");
    for entry in &summary.most_common {
        println!("    {} × {}", entry.symptom, entry.count);
    }

    println!("\n  Moods:");
    for entry in &summary.mood_distribution {
        println!("    {} × {}", entry.mood, entry.count);
    }
    println!();

    Ok(())
}

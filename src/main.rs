//! Campus Events CLI - schema setup, sample data and attendance reports

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use campus_events::config::{self, CampusConfig};
use campus_events::report::{
    ActiveStudent, EventAttendance, EventFeedback, EventPopularity, StudentParticipation,
    DEFAULT_TOP_STUDENTS,
};
use campus_events::storage::EventStore;
use campus_events::ui::{self, Icons};
use campus_events::{seed, ReportGenerator};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "campus-events")]
#[command(version)]
#[command(about = "Campus event registration store and attendance reports")]
#[command(long_about = r#"
Campus events keeps colleges, students, events, registrations and attendance
in a SQLite file and reports on them:
  • Event popularity (optionally per event type)
  • Events a student attended
  • Most active students
  • Attendance rate and average feedback per event

Only scheduled events appear in reports; cancelled events are ignored.

Example usage:
  campus-events init --seed
  campus-events report popularity --type Workshop
  campus-events report participation --student "Alice Johnson"
  campus-events report all --format json
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Path to the config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Create (or wipe and recreate) the database schema
    Init {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Load the sample dataset after creating the schema
        #[arg(long)]
        seed: bool,
    },

    /// Load the sample dataset into an initialized database
    Seed {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Run a report
    Report {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        #[command(subcommand)]
        kind: ReportCommand,
    },

    /// Show row counts for every table
    Stats {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Manage the config file
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },
}

#[derive(Subcommand)]
enum ReportCommand {
    /// Registrations per event, most popular first
    Popularity {
        /// Only include events of exactly this type
        #[arg(short = 't', long = "type")]
        event_type: Option<String>,
    },

    /// Events a student registered for and attended
    Participation {
        /// Student name (exact match)
        #[arg(short, long)]
        student: String,
    },

    /// Students with the most attended events
    TopStudents {
        /// Maximum number of students
        #[arg(short, long, default_value_t = DEFAULT_TOP_STUDENTS)]
        limit: usize,
    },

    /// Registrations, attendances and attendance rate per event
    Attendance,

    /// Average feedback score per event
    Feedback,

    /// Every report at once
    All {
        /// Include the participation report for this student
        #[arg(short, long)]
        student: Option<String>,

        /// Maximum number of top students
        #[arg(short, long, default_value_t = DEFAULT_TOP_STUDENTS)]
        limit: usize,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Write a config file
    Init {
        /// Database path to record in the config
        #[arg(short, long)]
        database: Option<String>,

        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        ui::error(&format!("{:#}", err));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let file_config = config::load_config(cli.config.as_deref())?;
    let format = cli.format;

    match cli.command {
        Commands::Init { database, seed } => {
            let database = config::resolve_database(database, file_config.as_ref());
            config::ensure_db_dir(&database)?;
            if format == OutputFormat::Text {
                ui::header("Initializing campus events database");
            }
            tracing::info!("Initializing schema in {}", database.display());

            let store = EventStore::create(&database)?;
            let summary = if seed {
                Some(seed::populate_sample_data(&store)?)
            } else {
                None
            };

            if format == OutputFormat::Json {
                let data = serde_json::json!({
                    "database": database.display().to_string(),
                    "seeded": summary,
                });
                println!("{}", serde_json::to_string_pretty(&data)?);
            } else {
                ui::success(&format!("Schema created in {}", database.display()));
                if let Some(summary) = summary {
                    print_seed_summary(&summary);
                }
            }
        }

        Commands::Seed { database } => {
            let database = config::resolve_database(database, file_config.as_ref());
            let store = open_existing(&database)?;
            let summary = seed::populate_sample_data(&store)?;

            if format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                ui::success("Sample data loaded");
                print_seed_summary(&summary);
            }
        }

        Commands::Report { database, kind } => {
            let database = config::resolve_database(database, file_config.as_ref());
            let store = open_existing(&database)?;
            let reports = ReportGenerator::new(&store);

            match kind {
                ReportCommand::Popularity { event_type } => {
                    let rows = reports.event_popularity(event_type.as_deref())?;
                    print_popularity(format, event_type.as_deref(), &rows)?;
                }
                ReportCommand::Participation { student } => {
                    let rows = reports.student_participation(&student)?;
                    print_participation(format, &student, &rows)?;
                }
                ReportCommand::TopStudents { limit } => {
                    let rows = reports.top_active_students(limit)?;
                    print_top_students(format, limit, &rows)?;
                }
                ReportCommand::Attendance => {
                    let rows = reports.event_attendance()?;
                    print_attendance(format, &rows)?;
                }
                ReportCommand::Feedback => {
                    let rows = reports.event_feedback()?;
                    print_feedback(format, &rows)?;
                }
                ReportCommand::All { student, limit } => {
                    let report = reports.full_report(student.as_deref(), limit)?;
                    if format == OutputFormat::Json {
                        let mut data = serde_json::to_value(&report)?;
                        data["attendance"] = attendance_json(&report.attendance);
                        println!("{}", serde_json::to_string_pretty(&data)?);
                    } else {
                        print_popularity(format, None, &report.popularity)?;
                        if let (Some(name), Some(rows)) = (student.as_deref(), &report.participation) {
                            print_participation(format, name, rows)?;
                        }
                        print_top_students(format, limit, &report.top_students)?;
                        print_attendance(format, &report.attendance)?;
                        print_feedback(format, &report.feedback)?;
                    }
                }
            }
        }

        Commands::Stats { database } => {
            let database = config::resolve_database(database, file_config.as_ref());
            let store = open_existing(&database)?;
            let stats = store.stats()?;

            if format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                ui::status(Icons::STATS, "Campus Events Statistics", &database.display().to_string());
                println!("{}", ui::stats_table(&stats));
            }
        }

        Commands::Config { action } => match action {
            ConfigCommand::Init { database, force } => {
                let path = cli.config.unwrap_or_else(config::default_config_path);
                let new_config = CampusConfig {
                    database: database.or_else(|| Some(config::DEFAULT_DATABASE.to_string())),
                };
                config::write_config(&path, &new_config, force)?;

                if format == OutputFormat::Json {
                    let data = serde_json::json!({
                        "config": path.display().to_string(),
                        "database": new_config.database,
                    });
                    println!("{}", serde_json::to_string_pretty(&data)?);
                } else {
                    ui::success(&format!("Wrote config to {}", path.display()));
                }
            }
        },
    }

    Ok(())
}

/// Open a database that `init` has already set up
fn open_existing(database: &Path) -> anyhow::Result<EventStore> {
    if !database.exists() {
        anyhow::bail!(
            "no database at {} (run `campus-events init` first)",
            database.display()
        );
    }

    let store = EventStore::open(database)?;
    if !store.has_schema()? {
        anyhow::bail!(
            "{} has no campus events schema (run `campus-events init` first)",
            database.display()
        );
    }
    tracing::debug!("Opened {}", database.display());
    Ok(store)
}

fn print_seed_summary(summary: &seed::SeedSummary) {
    ui::summary_row("Colleges:", &summary.colleges.to_string());
    ui::summary_row("Students:", &summary.students.to_string());
    ui::summary_row(
        "Events:",
        &format!("{} ({} scheduled)", summary.events, summary.scheduled_events),
    );
    ui::summary_row("Registrations:", &summary.registrations.to_string());
}

fn print_table(table: String, empty_message: &str) {
    if table.is_empty() {
        ui::empty(empty_message);
    } else {
        println!("{}", table);
    }
}

fn print_popularity(
    format: OutputFormat,
    event_type: Option<&str>,
    rows: &[EventPopularity],
) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(rows)?);
        return Ok(());
    }

    match event_type {
        Some(t) => ui::section(&format!(" Event Popularity ({}) ", t)),
        None => ui::section(" Event Popularity "),
    }
    print_table(ui::popularity_table(rows), "No scheduled events.");
    Ok(())
}

fn print_participation(
    format: OutputFormat,
    student: &str,
    rows: &[StudentParticipation],
) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(rows)?);
        return Ok(());
    }

    ui::section(&format!(" Participation: {} ", student));
    print_table(
        ui::participation_table(rows),
        &format!("{} has not attended any scheduled event.", student),
    );
    Ok(())
}

fn print_top_students(
    format: OutputFormat,
    limit: usize,
    rows: &[ActiveStudent],
) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(rows)?);
        return Ok(());
    }

    ui::section(&format!(" Top {} Active Students ", limit));
    print_table(ui::top_students_table(rows), "No attendance recorded yet.");
    Ok(())
}

fn attendance_json(rows: &[EventAttendance]) -> serde_json::Value {
    rows.iter()
        .map(|r| {
            serde_json::json!({
                "event_name": r.event_name,
                "registration_count": r.registration_count,
                "attendance_count": r.attendance_count,
                "attendance_percentage": r.attendance_percentage(),
            })
        })
        .collect()
}

fn print_attendance(format: OutputFormat, rows: &[EventAttendance]) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&attendance_json(rows))?);
        return Ok(());
    }

    ui::section(" Event Attendance ");
    print_table(ui::attendance_table(rows), "No scheduled events.");
    Ok(())
}

fn print_feedback(format: OutputFormat, rows: &[EventFeedback]) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(rows)?);
        return Ok(());
    }

    ui::section(" Average Feedback ");
    print_table(ui::feedback_table(rows), "No feedback scores yet.");
    Ok(())
}

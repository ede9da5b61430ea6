use std::path::PathBuf;

use anyhow::Context;
use appointment_calendar::config::{DEFAULT_TIMEZONE, DEFAULT_WORK_END, DEFAULT_WORK_START};
use appointment_calendar::{layout_for_view, loader, report, CalendarConfig, ViewType};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "appointment-calendar")]
#[command(about = "Day, week and month layouts for pet-service appointments", long_about = None)]
struct Cli {
    /// First working hour shown on the grid
    #[arg(long, global = true, env = "CALENDAR_WORK_START", default_value = DEFAULT_WORK_START)]
    work_start: String,
    /// Last working hour shown on the grid (gets its own row)
    #[arg(long, global = true, env = "CALENDAR_WORK_END", default_value = DEFAULT_WORK_END)]
    work_end: String,
    /// IANA timezone used to read timestamps as calendar days
    #[arg(long, global = true, env = "CALENDAR_TIMEZONE", default_value = DEFAULT_TIMEZONE)]
    timezone: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the hourly rows of the day and week grids
    Buckets,
    /// Lay out an appointment export for one calendar view
    Layout {
        /// Appointment export (.json or .csv)
        #[arg(long)]
        input: PathBuf,
        #[arg(long, default_value = "day")]
        view: ViewType,
        /// Selected date, defaults to today in the configured timezone
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Markdown)]
        format: OutputFormat,
        /// Write to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Markdown,
    Json,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = CalendarConfig::new(&cli.work_start, &cli.work_end, &cli.timezone)
        .context("invalid calendar configuration")?;

    match cli.command {
        Commands::Buckets => {
            for bucket in config.hours.buckets() {
                println!("{bucket}");
            }
        }
        Commands::Layout {
            input,
            view,
            date,
            format,
            out,
        } => {
            let date =
                date.unwrap_or_else(|| Utc::now().with_timezone(&config.timezone).date_naive());
            let records = loader::load_appointments(&input)?;
            let layout = layout_for_view(view, &records, date, &config);

            let rendered = match format {
                OutputFormat::Markdown => report::render_markdown(&layout),
                OutputFormat::Json => serde_json::to_string_pretty(&layout)
                    .context("failed to serialize calendar layout")?,
            };

            match out {
                Some(path) => {
                    std::fs::write(&path, rendered)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    println!("{view} layout for {date} written to {}.", path.display());
                }
                None => println!("{rendered}"),
            }
        }
    }

    Ok(())
}

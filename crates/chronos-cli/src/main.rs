//! `chronos` CLI — run the calendar reasoning engine over JSON event lists.
//!
//! ## Usage
//!
//! ```sh
//! # Free/busy blocks for a window (events JSON on stdin)
//! chronos freebusy --start 2026-03-02T09:00:00Z --end 2026-03-02T17:00:00Z < events.json
//!
//! # Conflict groups
//! chronos conflicts -i events.json
//!
//! # Top 5 half-hour slots inside work hours, scored in New York time
//! chronos slots -i events.json --start 2026-03-02T09:00:00Z --end 2026-03-02T17:00:00Z \
//!   --duration 30 --work-hours 9-17 --timezone America/New_York --limit 5
//!
//! # Resolve a relative date phrase, as readable text
//! chronos resolve "next week" --timezone Europe/Berlin --human
//!
//! # Normalize a Google Calendar events payload
//! chronos normalize -i google.json --calendar-id primary
//!
//! # Execute a tagged tool call against a calendar file
//! chronos tool -i call.json --events events.json
//! ```

use std::io::{self, Read};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use chronos_engine::normalize::GoogleCalendarEvent;
use chronos_engine::time::{format_date_time, format_slot_range, parse_instant};
use chronos_engine::{
    CalendarEvent, EngineConfig, StaticProvider, ToolCall, ToolRunner, WorkHours,
};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "chronos",
    version,
    about = "Calendar reasoning: free/busy, conflicts, and ranked meeting slots"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    /// Log engine decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Partition a window into free and busy blocks
    Freebusy {
        /// Events JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Window start (ISO 8601)
        #[arg(long)]
        start: String,
        /// Window end (ISO 8601)
        #[arg(long)]
        end: String,
    },
    /// Group overlapping events
    Conflicts {
        /// Events JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Find and rank meeting slots
    Slots {
        /// Events JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Search window start (ISO 8601)
        #[arg(long)]
        start: String,
        /// Search window end (ISO 8601)
        #[arg(long)]
        end: String,
        /// Meeting length in minutes
        #[arg(short, long)]
        duration: u32,
        /// Work hours as START-END, e.g. "9-17"
        #[arg(long)]
        work_hours: Option<String>,
        /// IANA timezone used for hour-of-day rules
        #[arg(long)]
        timezone: Option<String>,
        /// Maximum number of slots to print
        #[arg(long)]
        limit: Option<usize>,
        /// Print one readable line per slot instead of JSON
        #[arg(long)]
        human: bool,
    },
    /// Resolve a relative date phrase ("today", "next week", ...)
    Resolve {
        /// The phrase to resolve
        phrase: String,
        /// Reference instant (ISO 8601, defaults to now)
        #[arg(long)]
        now: Option<String>,
        /// IANA timezone the phrase is meant in
        #[arg(long)]
        timezone: Option<String>,
        /// Print the range as readable text instead of JSON
        #[arg(long)]
        human: bool,
    },
    /// Normalize Google Calendar API events into engine events
    Normalize {
        /// Google events JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Calendar id to tag events with
        #[arg(long)]
        calendar_id: Option<String>,
    },
    /// Execute a tagged tool call
    Tool {
        /// Tool call JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Events JSON file backing the calendar provider
        #[arg(long)]
        events: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match cli.config.as_deref() {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path))?,
        None => EngineConfig::default(),
    };
    debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Freebusy {
            input,
            output,
            start,
            end,
        } => {
            let events = read_events(input.as_deref())?;
            let (start, end) = parse_window(&start, &end)?;
            let blocks = chronos_engine::compute_free_busy(&events, start, end);
            write_json(output.as_deref(), &blocks)?;
        }
        Commands::Conflicts { input, output } => {
            let events = read_events(input.as_deref())?;
            let groups = chronos_engine::find_conflicts(&events);
            write_json(output.as_deref(), &groups)?;
        }
        Commands::Slots {
            input,
            output,
            start,
            end,
            duration,
            work_hours,
            timezone,
            limit,
            human,
        } => {
            let events = read_events(input.as_deref())?;
            let (start, end) = parse_window(&start, &end)?;
            let tz = resolve_timezone(timezone.as_deref(), &config)?;
            let work_hours = match work_hours.as_deref() {
                Some(raw) => Some(parse_work_hours(raw)?),
                None => config.work_hours,
            };
            let mut slots =
                chronos_engine::find_available_slots(&events, duration, start, end, work_hours, tz);
            if let Some(limit) = limit {
                slots.truncate(limit);
            }
            if human {
                let lines: Vec<String> = slots
                    .iter()
                    .map(|slot| {
                        format!(
                            "{} (score {})",
                            format_slot_range(slot.start, slot.end, tz),
                            slot.score
                        )
                    })
                    .collect();
                write_text(output.as_deref(), &lines.join("\n"))?;
            } else {
                write_json(output.as_deref(), &slots)?;
            }
        }
        Commands::Resolve {
            phrase,
            now,
            timezone,
            human,
        } => {
            let tz = resolve_timezone(timezone.as_deref(), &config)?;
            let now = match now.as_deref() {
                Some(raw) => parse_instant(raw).context("Invalid --now")?,
                None => Utc::now(),
            };
            let range = chronos_engine::parse_relative_date(&phrase, now, tz)
                .with_context(|| format!("Could not resolve date phrase: '{}'", phrase))?;
            if human {
                let text = format!(
                    "{} to {}",
                    format_date_time(range.start, tz),
                    format_date_time(range.end, tz)
                );
                write_text(None, &text)?;
            } else {
                write_json(None, &range)?;
            }
        }
        Commands::Normalize {
            input,
            output,
            calendar_id,
        } => {
            let raw = read_input(input.as_deref())?;
            let google: Vec<GoogleCalendarEvent> =
                serde_json::from_str(&raw).context("Invalid Google events JSON")?;
            let events = chronos_engine::normalize_google_events(&google, calendar_id.as_deref())
                .context("Failed to normalize events")?;
            write_json(output.as_deref(), &events)?;
        }
        Commands::Tool {
            input,
            output,
            events,
        } => {
            let raw = read_input(input.as_deref())?;
            let call: ToolCall = serde_json::from_str(&raw).context("Invalid tool call JSON")?;
            let provider = match events.as_deref() {
                Some(path) => StaticProvider::new(read_events(Some(path))?),
                None => StaticProvider::default(),
            };
            let mut runner = ToolRunner::new(&provider, &config);
            let tool = call.name();
            let result = runner
                .run(call)
                .with_context(|| format!("Tool '{}' failed", tool))?;
            write_json(output.as_deref(), &result)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn parse_window(start: &str, end: &str) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    chronos_engine::tools::parse_window(start, end).context("Invalid time window")
}

fn resolve_timezone(label: Option<&str>, config: &EngineConfig) -> Result<Tz> {
    match label {
        Some(label) => chronos_engine::parse_timezone(label),
        None => config.timezone(),
    }
    .context("Invalid timezone")
}

/// Parse work hours written as `START-END`, e.g. `9-17`.
fn parse_work_hours(raw: &str) -> Result<WorkHours> {
    let (start, end) = raw
        .split_once('-')
        .with_context(|| format!("Work hours must look like 9-17, got '{}'", raw))?;
    let start: u32 = start
        .trim()
        .parse()
        .with_context(|| format!("Invalid work hours start: '{}'", start))?;
    let end: u32 = end
        .trim()
        .parse()
        .with_context(|| format!("Invalid work hours end: '{}'", end))?;
    Ok(WorkHours::new(start, end)?)
}

fn read_events(path: Option<&str>) -> Result<Vec<CalendarEvent>> {
    let raw = read_input(path)?;
    serde_json::from_str(&raw).context("Invalid events JSON")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_json<T: Serialize>(path: Option<&str>, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    write_text(path, &json)
}

fn write_text(path: Option<&str>, text: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, text).with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", text);
        }
    }
    Ok(())
}

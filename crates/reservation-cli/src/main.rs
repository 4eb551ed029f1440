//! `rsvp` CLI: derive selectable times and price reservations from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Start times offered by an availability response (stdin → stdout)
//! curl -s .../reservations/availability | rsvp starts
//!
//! # End times reachable from 09:00
//! rsvp ends --start 09:00 -i slots.json
//!
//! # How far a reservation ending at 11:00 can be extended
//! rsvp extend --current-end 11:00 -i slots.json
//!
//! # Verify a window before submitting it
//! rsvp check --start 09:00 --end 11:00 -i slots.json
//!
//! # Quote a two-night stay for two guests
//! rsvp quote --start 2024-01-01 --end 2024-01-03 --rate 100 --quantity 2
//!
//! # Pagination bar for page 5 of 10
//! rsvp pages --current 4 --total 10
//! ```

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};
use clap::{ArgAction, Parser, Subcommand};
use reservation_core::slots::{format_time, parse_time, window_length};
use reservation_core::{
    bounds, compute_total_with_limit, pagination, units_between_times, DateRange, EngineConfig,
    PageItem, Rate, RateUnit, StayQuote, TimeSlot,
};
use std::io::{self, Read};
use tracing::{info, warn, Level};

#[derive(Parser)]
#[command(
    name = "rsvp",
    version,
    about = "Reservation availability and pricing CLI"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON configuration file (defaults apply when omitted)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// List start times of available slots
    Starts {
        /// Slot list JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Print a JSON array instead of one time per line
        #[arg(long)]
        json: bool,
    },
    /// List end times reachable from a start time
    Ends {
        #[arg(short, long)]
        input: Option<String>,
        /// Chosen start time (HH:MM)
        #[arg(long)]
        start: String,
        /// Minimum adjacent slots per reservation (overrides config)
        #[arg(long)]
        min_slots: Option<usize>,
        #[arg(long)]
        json: bool,
    },
    /// List end times an existing reservation can be extended to
    Extend {
        #[arg(short, long)]
        input: Option<String>,
        /// Current end time of the reservation (HH:MM)
        #[arg(long)]
        current_end: String,
        #[arg(long)]
        json: bool,
    },
    /// List every maximal run of available slots
    Windows {
        #[arg(short, long)]
        input: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Check that a start/end window is still reservable
    Check {
        #[arg(short, long)]
        input: Option<String>,
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
    },
    /// Price a stay or a time window
    Quote {
        /// Start date (YYYY-MM-DD) or date-time (YYYY-MM-DDTHH:MM)
        #[arg(long)]
        start: String,
        /// End date (YYYY-MM-DD) or date-time (YYYY-MM-DDTHH:MM)
        #[arg(long)]
        end: String,
        /// Price per unit, e.g. 129.90
        #[arg(long)]
        rate: String,
        /// Guests or seats
        #[arg(long, default_value_t = 1)]
        quantity: u32,
        /// Billing unit: night or hour
        #[arg(long, default_value = "night")]
        unit: String,
        /// Treat this date as today for the past-date check
        #[arg(long)]
        today: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Show the pagination bar for a listing page
    Pages {
        /// Zero-based current page
        #[arg(long)]
        current: usize,
        /// Total number of pages
        #[arg(long)]
        total: usize,
        /// Pages shown on each side of the current one (overrides config)
        #[arg(long)]
        neighbors: Option<usize>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match cli.config.as_deref() {
        Some(path) => EngineConfig::load(path).context("Failed to load config")?,
        None => EngineConfig::default(),
    };

    match cli.command {
        Commands::Starts { input, json } => {
            let slots = read_slots(input.as_deref())?;
            let starts = reservation_core::available_starts(&slots);
            if starts.is_empty() {
                warn!("no available start times");
            }
            print_times(&starts, json)?;
        }
        Commands::Ends {
            input,
            start,
            min_slots,
            json,
        } => {
            let slots = read_slots(input.as_deref())?;
            let start = parse_time(&start)?;
            let min_slots = min_slots.unwrap_or(config.min_slots);
            let ends = reservation_core::available_ends_with_min(&slots, start, min_slots);
            if ends.is_empty() {
                warn!("selection unavailable: no end times from {}", format_time(start));
            }
            print_times(&ends, json)?;
        }
        Commands::Extend {
            input,
            current_end,
            json,
        } => {
            let slots = read_slots(input.as_deref())?;
            let current_end = parse_time(&current_end)?;
            let ends = reservation_core::extension_ends(&slots, current_end);
            if ends.is_empty() {
                warn!("no extension possible past {}", format_time(current_end));
            }
            print_times(&ends, json)?;
        }
        Commands::Windows { input, json } => {
            let slots = read_slots(input.as_deref())?;
            let windows = reservation_core::available_windows(&slots);
            let rendered: Vec<String> = windows
                .iter()
                .map(|(start, end)| format!("{}-{}", format_time(*start), format_time(*end)))
                .collect();
            if json {
                println!("{}", serde_json::to_string(&rendered)?);
            } else {
                for line in rendered {
                    println!("{}", line);
                }
            }
        }
        Commands::Check { input, start, end } => {
            let slots = read_slots(input.as_deref())?;
            let start = parse_time(&start)?;
            let end = parse_time(&end)?;
            let ends = reservation_core::available_ends_with_min(&slots, start, config.min_slots);
            if window_length(start, end).is_none() || !ends.contains(&end) {
                anyhow::bail!(
                    "Selection unavailable: {}-{} is not a contiguous available window",
                    format_time(start),
                    format_time(end)
                );
            }
            println!("available: {}-{}", format_time(start), format_time(end));
        }
        Commands::Quote {
            start,
            end,
            rate,
            quantity,
            unit,
            today,
            json,
        } => {
            let rate: Rate = rate.parse().context("Invalid --rate")?;
            let unit: RateUnit = unit.parse()?;
            let today = match today {
                Some(raw) => parse_date(&raw)?,
                None => config.today(Utc::now())?,
            };

            let quote = build_quote(&start, &end, rate, quantity, unit, today, &config)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&quote)?);
            } else {
                println!("Units:     {} {}", quote.units_elapsed, plural(quote.rate_unit, quote.units_elapsed));
                println!("Rate:      {} per {}", quote.rate_per_unit, quote.rate_unit);
                println!("Quantity:  {}", quote.quantity);
                println!("Total:     {}", quote.total);
            }
        }
        Commands::Pages {
            current,
            total,
            neighbors,
        } => {
            let neighbors = neighbors.unwrap_or(config.page_neighbors);
            let items = reservation_core::page_items(current, total, neighbors);
            let rendered: Vec<String> = items
                .iter()
                .map(|item| match item {
                    PageItem::Page { index, active: true } => format!("[{}]", index + 1),
                    PageItem::Page { index, .. } => (index + 1).to_string(),
                    PageItem::Ellipsis => "...".to_string(),
                })
                .collect();
            let prev = if pagination::has_previous(current) { "<" } else { " " };
            let next = if pagination::has_next(current, total) { ">" } else { " " };
            println!("{} {} {}", prev, rendered.join(" "), next);
        }
    }

    Ok(())
}

/// Quote a stay between two dates, or a window between two date-times.
///
/// Plain dates billed per night go through the calendar-date path; anything
/// with a time of day is billed on elapsed time.
fn build_quote(
    start: &str,
    end: &str,
    rate: Rate,
    quantity: u32,
    unit: RateUnit,
    today: NaiveDate,
    config: &EngineConfig,
) -> Result<StayQuote> {
    let start_at = parse_instant(start)?;
    let end_at = parse_instant(end)?;
    bounds::ensure_not_past(start_at.date(), today)?;

    if unit == RateUnit::Night && start_at.time() == NaiveTime::MIN && end_at.time() == NaiveTime::MIN {
        let range = DateRange::new(start_at.date(), end_at.date())?;
        return Ok(reservation_core::quote(&range, rate, quantity, config)?);
    }

    if unit == RateUnit::Hour && start_at.date() == end_at.date() {
        return Ok(reservation_core::quote_window(
            start_at.date(),
            start_at.time(),
            end_at.time(),
            rate,
            quantity,
            config,
        )?);
    }

    let units_elapsed = units_between_times(start_at, end_at, unit)?;
    let total = compute_total_with_limit(rate, units_elapsed, quantity, config.max_quantity)?;
    info!(units = units_elapsed, %total, "quoted multi-day window");
    Ok(StayQuote {
        units_elapsed,
        rate_unit: unit,
        rate_per_unit: rate,
        quantity,
        total,
    })
}

fn plural(unit: RateUnit, count: i64) -> String {
    if count == 1 {
        unit.to_string()
    } else {
        format!("{}s", unit)
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", raw))
}

fn parse_instant(raw: &str) -> Result<NaiveDateTime> {
    let trimmed = raw.trim();
    if let Ok(at) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M") {
        return Ok(at);
    }
    Ok(parse_date(trimmed)?.and_time(NaiveTime::MIN))
}

fn print_times(times: &[NaiveTime], json: bool) -> Result<()> {
    let rendered: Vec<String> = times.iter().map(|t| format_time(*t)).collect();
    if json {
        println!("{}", serde_json::to_string(&rendered)?);
    } else {
        for line in rendered {
            println!("{}", line);
        }
    }
    Ok(())
}

fn read_slots(path: Option<&str>) -> Result<Vec<TimeSlot>> {
    let json = read_input(path)?;
    serde_json::from_str(&json).context("Failed to parse slot list JSON")
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

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

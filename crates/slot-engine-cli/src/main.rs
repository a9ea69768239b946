//! `slotgrid` CLI — inspect availability and draft bookings from the command
//! line.
//!
//! ## Usage
//!
//! ```sh
//! # Render the day grid for a date (payload from stdin)
//! curl -s "$AVAILABILITY_URL?date=2026-03-16" | slotgrid grid --date 2026-03-16
//!
//! # Render from a saved payload, in the resource's timezone
//! slotgrid grid --date 2026-03-16 -i availability.json --timezone America/New_York
//!
//! # Check whether a window is bookable
//! slotgrid check --date 2026-03-16 --start 10:00 --duration 60 -i availability.json
//!
//! # Draft a booking and print the submission URL
//! slotgrid draft --resource-id lib-204 --date 2026-03-16 --start 10:00 \
//!   --duration 60 --purpose "Study group" -i availability.json
//! ```

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, NaiveTime, Timelike};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use std::io::{self, Read};

use slot_engine::availability::{mark_conflicts, AvailabilityPayload};
use slot_engine::grid::{GridConfig, TimeGrid};
use slot_engine::selection::{can_select_range, slots_for_duration, SelectionRange};
use slot_engine::session::{DrawerSession, Resource};
use slot_engine::window::materialize;

#[derive(Parser)]
#[command(
    name = "slotgrid",
    version,
    about = "Slot availability and booking drafts for campus resources"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the day grid with an open/booked status per slot
    Grid {
        /// Date to render (ISO, e.g. 2026-03-16)
        #[arg(long)]
        date: NaiveDate,
        /// Availability payload file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// IANA timezone of the resource
        #[arg(long, default_value = "UTC")]
        timezone: String,
    },
    /// Check whether a start time + duration is bookable
    Check {
        /// Date to check (ISO, e.g. 2026-03-16)
        #[arg(long)]
        date: NaiveDate,
        /// Window start, 24-hour HH:MM, on the slot grid
        #[arg(long)]
        start: String,
        /// Requested duration in minutes
        #[arg(long, default_value_t = 60)]
        duration: u32,
        /// Availability payload file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// IANA timezone of the resource
        #[arg(long, default_value = "UTC")]
        timezone: String,
    },
    /// Draft a booking end-to-end and print the submission URL
    Draft {
        /// Resource identifier for the submission query
        #[arg(long)]
        resource_id: String,
        /// Booking form URL the query string is appended to
        #[arg(long, default_value = "/bookings/new")]
        booking_url: String,
        /// Date to book (ISO, e.g. 2026-03-16)
        #[arg(long)]
        date: NaiveDate,
        /// Window start, 24-hour HH:MM, on the slot grid
        #[arg(long)]
        start: String,
        /// Requested duration in minutes
        #[arg(long, default_value_t = 60)]
        duration: u32,
        /// Purpose of the booking (required, non-blank)
        #[arg(long)]
        purpose: String,
        /// Availability payload file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// IANA timezone of the resource
        #[arg(long, default_value = "UTC")]
        timezone: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Grid {
            date,
            input,
            timezone,
        } => {
            let tz = parse_timezone(&timezone)?;
            let raw = read_input(input.as_deref())?;

            let mut grid = TimeGrid::standard();
            let mut requires_approval = false;
            match AvailabilityPayload::from_json(&raw) {
                Ok(payload) => {
                    requires_approval = payload.requires_approval;
                    mark_conflicts(&mut grid, date, tz, &payload.bookings);
                }
                Err(err) => {
                    // Fail safe: nothing is bookable when availability
                    // cannot be confirmed.
                    grid.block_all();
                    eprintln!("warning: {}", err);
                }
            }

            for slot in grid.slots() {
                let status = if slot.blocked { "booked" } else { "open" };
                println!("{}  {}", minutes_label(slot.start_minutes), status);
            }
            if requires_approval {
                println!("note: requires approval");
            }
        }
        Commands::Check {
            date,
            start,
            duration,
            input,
            timezone,
        } => {
            let tz = parse_timezone(&timezone)?;
            let raw = read_input(input.as_deref())?;

            let mut grid = TimeGrid::standard();
            match AvailabilityPayload::from_json(&raw) {
                Ok(payload) => mark_conflicts(&mut grid, date, tz, &payload.bookings),
                Err(err) => {
                    grid.block_all();
                    eprintln!("warning: {}", err);
                }
            }

            let config = *grid.config();
            let start_index = start_to_index(&config, &start)?;
            let slot_count = slots_for_duration(duration, config.increment_minutes);
            if !can_select_range(&grid, start_index, slot_count) {
                bail!("unavailable: already booked during part of this time");
            }

            let window = materialize(
                &config,
                date,
                tz,
                SelectionRange {
                    start_index,
                    slot_count,
                },
                duration,
            );
            println!(
                "available: {} ({} minutes)",
                window.time_label, window.duration_minutes
            );
        }
        Commands::Draft {
            resource_id,
            booking_url,
            date,
            start,
            duration,
            purpose,
            input,
            timezone,
        } => {
            let tz = parse_timezone(&timezone)?;
            let raw = read_input(input.as_deref())?;

            let resource = Resource {
                id: resource_id,
                title: String::new(),
                booking_url,
            };
            let mut session = DrawerSession::open(resource, tz);
            let token = session.select_date(date);
            session.apply_availability(token, AvailabilityPayload::from_json(&raw));

            let start_index = start_to_index(session.grid().config(), &start)?;
            session.set_duration(duration)?;
            session.select_slot(start_index)?;
            let window = session.submit(&purpose)?;
            let request = session.complete()?;

            eprintln!(
                "drafted {} on {} ({})",
                window.time_label,
                window.date_label,
                session.approval_note()
            );
            println!("{}", request.url());
        }
    }

    Ok(())
}

/// Format minutes past midnight as a 24-hour grid row label.
fn minutes_label(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {}", name))
}

/// Map a 24-hour `HH:MM` start time onto its grid index.
fn start_to_index(config: &GridConfig, start: &str) -> Result<usize> {
    let time = NaiveTime::parse_from_str(start, "%H:%M")
        .with_context(|| format!("invalid start time: {}", start))?;
    let minutes = time.hour() * 60 + time.minute();
    if minutes < config.day_start_minutes
        || minutes >= config.day_end_minutes
        || (minutes - config.day_start_minutes) % config.increment_minutes != 0
    {
        bail!("start time {} is not on the slot grid", start);
    }
    Ok(((minutes - config.day_start_minutes) / config.increment_minutes) as usize)
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

use anyhow::{Result, bail};
use chrono::{Datelike, Local};

use crate::api::PrayerApi;
use crate::config::AppConfig;
use crate::models::{Location, PrayerName};
use crate::prayer_times::next_prayer;
use crate::utils::format::format_duration_secs;

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const TEAL: &str = "\x1b[38;2;84;196;184m";
const AMBER: &str = "\x1b[38;2;214;160;78m";

fn resolve_location(
    config: &AppConfig,
    city: Option<String>,
    country: Option<String>,
) -> Location {
    Location::new(
        city.unwrap_or_else(|| config.location.city.clone()),
        country.unwrap_or_else(|| config.location.country.clone()),
    )
}

fn short_time(raw: &str) -> &str {
    raw.split_whitespace().next().unwrap_or("--:--")
}

// ─── Times ───────────────────────────────────────────────────────────────────

pub fn handle_times(
    config: &AppConfig,
    city: Option<String>,
    country: Option<String>,
) -> Result<()> {
    let location = resolve_location(config, city, country);
    let api = PrayerApi::new()?;
    let times = api.fetch_daily(&location.city, &location.country)?;

    let now = Local::now().naive_local();

    println!();
    println_colored!(
        TEAL,
        "  Prayer Times — {} ({})",
        location,
        now.date().format("%Y-%m-%d")
    );
    println!();

    for name in PrayerName::ALL {
        let style = if PrayerName::CANONICAL.contains(&name) {
            BOLD
        } else {
            DIM
        };
        println_colored!(
            style,
            "  {:<10} {}",
            name.display_name(),
            short_time(times.get(name))
        );
    }

    if let Some(next) = next_prayer(&times, now) {
        println!();
        println_colored!(
            AMBER,
            "  Next: {} at {} (in {})",
            next.name,
            short_time(&next.time),
            format_duration_secs(next.remaining.num_seconds())
        );
    }
    println!();

    Ok(())
}

// ─── Calendar ────────────────────────────────────────────────────────────────

pub fn handle_calendar(
    config: &AppConfig,
    month: Option<u32>,
    year: Option<i32>,
    city: Option<String>,
    country: Option<String>,
) -> Result<()> {
    let now = Local::now();
    let month = month.unwrap_or_else(|| now.month());
    let year = year.unwrap_or_else(|| now.year());
    if !(1..=12).contains(&month) {
        bail!("Month must be between 1 and 12, got {}", month);
    }

    let location = resolve_location(config, city, country);
    let api = PrayerApi::new()?;
    let days = api.fetch_monthly(&location.city, &location.country, month, year)?;

    println!();
    println_colored!(TEAL, "  Calendar — {} ({}-{:02})", location, year, month);
    println!();
    println_colored!(
        BOLD,
        "  {:<13} {:<7} {:<7} {:<7} {:<7} {:<7} {:<7}",
        "Date",
        "Fajr",
        "Sunrise",
        "Dhuhr",
        "Asr",
        "Maghrib",
        "Isha"
    );

    for day in &days {
        println_colored!(
            DIM,
            "  {:<13} {:<7} {:<7} {:<7} {:<7} {:<7} {:<7}",
            day.date,
            short_time(&day.timings.fajr),
            short_time(&day.timings.sunrise),
            short_time(&day.timings.dhuhr),
            short_time(&day.timings.asr),
            short_time(&day.timings.maghrib),
            short_time(&day.timings.isha)
        );
    }
    println!();

    Ok(())
}

// ─── Set location ────────────────────────────────────────────────────────────

pub fn handle_set_location(config: &mut AppConfig, city: String, country: String) -> Result<()> {
    config.location.city = city;
    config.location.country = country;
    config.save()?;
    println!(
        "Default location set to {}, {}",
        config.location.city, config.location.country
    );
    Ok(())
}

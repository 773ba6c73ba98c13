mod alarm;
mod api;
mod cli;
mod config;
mod models;
mod prayer_times;
mod tui;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;

use cli::args::{Cli, Commands};
use cli::handlers;
use config::AppConfig;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = AppConfig::load().context("Loading config")?;

    match cli.command {
        Some(Commands::Times { city, country }) => {
            handlers::handle_times(&config, city, country)?;
        }
        Some(Commands::Calendar {
            month,
            year,
            city,
            country,
        }) => {
            handlers::handle_calendar(&config, month, year, city, country)?;
        }
        Some(Commands::SetLocation { city, country }) => {
            handlers::handle_set_location(&mut config, city, country)?;
        }

        // No subcommand → launch the dashboard
        None => {
            tui::app::run(config)?;
        }
    }

    Ok(())
}

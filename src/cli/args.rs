use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "waqt",
    version,
    author,
    about = "A terminal dashboard for daily and monthly prayer times"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print today's prayer times and the countdown to the next prayer
    Times {
        /// Override the configured city
        #[arg(long)]
        city: Option<String>,
        /// Override the configured country
        #[arg(long)]
        country: Option<String>,
    },
    /// Print the prayer-time calendar for a month
    Calendar {
        /// Month 1-12 (defaults to the current month)
        #[arg(long)]
        month: Option<u32>,
        /// Year (defaults to the current year)
        #[arg(long)]
        year: Option<i32>,
        /// Override the configured city
        #[arg(long)]
        city: Option<String>,
        /// Override the configured country
        #[arg(long)]
        country: Option<String>,
    },
    /// Save a default location to the config file
    SetLocation {
        /// City name
        city: String,
        /// Country name
        country: String,
    },
}

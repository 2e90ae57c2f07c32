//! Tally CLI - Expense, saving, and subscription tracker
//!
//! Usage:
//!   tally init                       Initialize database
//!   tally spend food_out 12.50       Record an expense
//!   tally save 5,00                  Record a saving
//!   tally chart                      Render the monthly breakdown chart
//!   tally report --all-time          Export records as CSV

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let db = commands::open_db(&cli.db)?;

    match cli.command {
        Commands::Init => commands::cmd_init(&db),
        Commands::Spend { category, amount } => {
            commands::cmd_spend(&db, cli.user, &category, &amount)
        }
        Commands::Save { amount } => commands::cmd_save(&db, cli.user, &amount),
        Commands::Status => commands::cmd_status(&db, cli.user),
        Commands::Chart { out_dir } => commands::cmd_chart(&db, cli.user, &out_dir).await,
        Commands::Report { all_time, out_dir } => {
            commands::cmd_report(&db, cli.user, all_time, &out_dir)
        }
        Commands::Sub { command } => match command {
            SubCommands::Add { name, amount } => {
                commands::cmd_sub_add(&db, cli.user, &name, &amount)
            }
            SubCommands::Disable { name } => commands::cmd_sub_disable(&db, cli.user, &name),
            SubCommands::Enable { name } => commands::cmd_sub_enable(&db, cli.user, &name),
            SubCommands::List { all_time } => commands::cmd_sub_list(&db, cli.user, all_time),
        },
        Commands::Renew => commands::cmd_renew(&db),
    }
}

//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tally - Track expenses, savings, and subscriptions
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Personal expense tracker with chart and report output", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "tally.db", global = true)]
    pub db: PathBuf,

    /// User id records belong to (the bot passes the chat user id here)
    #[arg(short, long, default_value = "1", global = true)]
    pub user: i64,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Record an expense
    Spend {
        /// Category key (food_out, groceries, transport, ...)
        category: String,

        /// Amount in euro; a comma decimal separator is accepted
        amount: String,
    },

    /// Record money saved
    Save {
        /// Amount in euro; a comma decimal separator is accepted
        amount: String,
    },

    /// Show month and year totals
    Status,

    /// Render the monthly category-breakdown chart
    Chart {
        /// Directory to write the chart artifact to
        #[arg(long, default_value = "graphs")]
        out_dir: PathBuf,
    },

    /// Export raw records as CSV report files
    Report {
        /// Include all records instead of the current month
        #[arg(long)]
        all_time: bool,

        /// Directory to write the report files to
        #[arg(long, default_value = "reports")]
        out_dir: PathBuf,
    },

    /// Manage subscriptions
    Sub {
        #[command(subcommand)]
        command: SubCommands,
    },

    /// Run the monthly subscription renewal job once
    Renew,
}

#[derive(Subcommand)]
pub enum SubCommands {
    /// Add a subscription (first charge is today)
    Add {
        /// Subscription name
        name: String,

        /// Monthly amount in euro
        amount: String,
    },

    /// Stop a subscription from renewing
    Disable {
        /// Subscription name
        name: String,
    },

    /// Re-enable a subscription
    Enable {
        /// Subscription name
        name: String,
    },

    /// List subscriptions
    List {
        /// Include all records instead of the current month
        #[arg(long)]
        all_time: bool,
    },
}

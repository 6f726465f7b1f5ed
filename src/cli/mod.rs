pub mod demo;
pub mod init;
pub mod rules;
pub mod run;
pub mod status;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "kontomatch",
    about = "Rule-based bank transaction categorization for property and PV-plant bookkeeping."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up kontomatch: choose a data directory and initialize the database.
    Init {
        /// Path for kontomatch data (default: ~/Documents/kontomatch)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Categorize pending transactions.
    Run {
        /// Limit the run to one tenant
        #[arg(long)]
        tenant: Option<String>,
        /// Limit the run to one bank account
        #[arg(long)]
        account: Option<String>,
        /// Evaluate without writing anything back
        #[arg(long)]
        dry_run: bool,
        /// Print the response contract as JSON
        #[arg(long)]
        json: bool,
        /// Override the minimum confidence threshold
        #[arg(long)]
        min_confidence: Option<f64>,
    },
    /// Inspect the active classification rules.
    Rules {
        #[command(subcommand)]
        command: RulesCommands,
    },
    /// Show current database and summary statistics.
    Status,
    /// Load sample transactions (both sources, all owner types) to explore kontomatch.
    Demo,
}

#[derive(Subcommand)]
pub enum RulesCommands {
    /// List the active rule set (rules.json override or built-in).
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

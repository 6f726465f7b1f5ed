mod classifier;
mod cli;
mod db;
mod dispatch;
mod engine;
mod error;
mod fmt;
mod models;
mod rules;
mod settings;
mod source;

use clap::Parser;

use cli::{Cli, Commands, RulesCommands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { data_dir } => cli::init::run(data_dir),
        Commands::Run {
            tenant,
            account,
            dry_run,
            json,
            min_confidence,
        } => cli::run::run(tenant, account, dry_run, json, min_confidence),
        Commands::Rules { command } => match command {
            RulesCommands::List { json } => cli::rules::list(json),
        },
        Commands::Status => cli::status::run(),
        Commands::Demo => cli::demo::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

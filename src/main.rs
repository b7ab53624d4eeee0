//! Intelix CLI - reputation lookups and sandbox analysis with SophosLabs Intelix

use clap::Parser;

mod cli;
mod output;

use cli::{Cli, Commands, GlobalOptions};
use intelix::AnalysisMode;
use intelix::error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Init => cli::init::run(&opts).await,
        Commands::Status => cli::status::run(&opts),
        Commands::Lookup(cmd) => cli::lookup::run(cmd, &opts).await,
        Commands::Static(cmd) => cli::analysis::run(AnalysisMode::Static, cmd, &opts).await,
        Commands::Dynamic(cmd) => cli::analysis::run(AnalysisMode::Dynamic, cmd, &opts).await,
        Commands::Completions { shell } => {
            cli::completions::run(shell);
            Ok(())
        }
    }
}

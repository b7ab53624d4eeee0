//! Status command implementation

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::cli::context::{MergedConfig, merge_config};
use intelix::config::Config;
use intelix::error::Result;

/// Show the effective configuration without contacting the service
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}\n", "Intelix Configuration Status".bold());

    let config_path = Config::resolve_path(opts.config_ref())?;
    let MergedConfig { config, from_file } = merge_config(opts)?;

    if !from_file && !opts.has_credentials() {
        println!("{} Configuration not found", "✗".red());
        println!();
        println!(
            "Run {} to create a configuration file.",
            "intelix init".cyan()
        );
        println!();
        return Ok(());
    }

    let path = config_path.display().to_string();
    if from_file {
        println!("Config file: {}", path.cyan());
    } else {
        println!("Config file: {} {}", path.dimmed(), "(not found)".dimmed());
    }
    println!();

    match config.credentials() {
        Ok(credentials) => {
            let source = if opts.has_credentials() {
                "command line or environment"
            } else {
                "config file"
            };
            println!(
                "{} Credentials: {} (from {})",
                "✓".green(),
                credentials.describe(),
                source
            );
        }
        Err(err) => {
            println!("{} {}", "✗".red(), err);
            println!("  → Run 'intelix init' to configure");
        }
    }

    println!("{} Region: {}", "✓".green(), config.region.code());

    match &config.api_host {
        Some(host) => println!("{} Custom API host: {}", "○".dimmed(), host.cyan()),
        None => println!(
            "{} Endpoint: {}",
            "○".dimmed(),
            config.region.base_url().cyan()
        ),
    }

    println!();
    Ok(())
}

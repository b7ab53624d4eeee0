//! Init command implementation

use colored::Colorize;
use dialoguer::{Input, Password, Select, theme::ColorfulTheme};

use crate::cli::args::GlobalOptions;
use intelix::config::Config;
use intelix::error::Result;
use intelix::{IntelixClient, Region};

/// Run the init command
///
/// Prompts for client credentials and a region, exchanges the credentials
/// for a token to prove they work, then writes the config file.
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}", "Welcome to Intelix!".bold().green());
    println!("Let's set up your SophosLabs Intelix credentials.\n");

    let theme = ColorfulTheme::default();

    let client_id: String = Input::with_theme(&theme)
        .with_prompt("Client ID")
        .interact_text()?;

    let client_secret: String = Password::with_theme(&theme)
        .with_prompt("Client secret")
        .interact()?;

    let region_names: Vec<&str> = Region::ALL.iter().map(Region::code).collect();
    let selection = Select::with_theme(&theme)
        .with_prompt("Region")
        .items(&region_names)
        .default(0)
        .interact()?;
    let region = Region::ALL[selection];

    let config = Config {
        client_id: Some(client_id.trim().to_string()),
        client_secret: Some(client_secret),
        token: None,
        region,
        api_host: opts.api_host.clone(),
    };
    config.credentials()?;

    println!("\n{}", "Authenticating...".cyan());
    IntelixClient::connect(config.client_options()).await?;
    println!("{}", "✓ Authentication successful!".green());

    config.save_at(opts.config_ref())?;

    let config_path = Config::resolve_path(opts.config_ref())?;
    println!(
        "\n{} Configuration saved to: {}",
        "✓".green(),
        config_path.display()
    );
    println!("  Region: {}", region.code().bold());

    println!("\n{}", "You're all set! Try running:".bold());
    println!("  {} - Show configuration status", "intelix status".cyan());
    println!(
        "  {} - Look up a file hash",
        "intelix lookup sha256 <HASH>".cyan()
    );

    Ok(())
}

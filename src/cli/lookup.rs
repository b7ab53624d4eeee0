//! Lookup command implementation

use log::debug;

use crate::cli::{CommandContext, GlobalOptions, LookupCommands};
use crate::output;
use intelix::error::Result;

/// Run a reputation lookup and print the response
pub async fn run(cmd: LookupCommands, opts: &GlobalOptions) -> Result<()> {
    let mut ctx = CommandContext::new(opts).await?;
    debug!(
        "Using region {} at {}",
        ctx.config.region,
        ctx.client.session().base_url()
    );

    let body = match &cmd {
        LookupCommands::Sha256 { hash } => ctx.client.lookup_sha256(hash, true).await?,
        LookupCommands::Url { url } => ctx.client.lookup_url(url, true).await?,
        LookupCommands::File { path } => ctx.client.lookup_file(path, true).await?,
    };
    debug!("Cached reports: {}", ctx.client.reports().len());

    output::print_lookup(&body, ctx.format)
}

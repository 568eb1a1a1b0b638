//! docqa CLI entry point.

use anyhow::Result;
use clap::Parser;

use docqa::cli::{Cli, Commands};
use docqa::infrastructure::config::ConfigLoader;
use docqa::infrastructure::logging::LoggerImpl;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    if let Err(err) = run(cli).await {
        docqa::cli::handle_error(err, json);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = match cli.config {
        Some(ref path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };

    let _logger = LoggerImpl::init(&config.logging)?;

    match cli.command {
        Commands::Ask(args) => docqa::cli::commands::ask::execute(args, config, cli.json).await,
        Commands::Chunks(args) => docqa::cli::commands::chunks::execute(args, config, cli.json).await,
        Commands::Retrieve(args) => {
            docqa::cli::commands::retrieve::execute(args, config, cli.json).await
        }
    }
}

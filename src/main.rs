mod cli;
mod commands;
mod config;
mod deleter;
mod retention;
mod s3_client;
mod storage;
#[cfg(test)]
mod test_utils;
mod tracing_init;
mod utils;

use anyhow::Result;
use clap::Parser;
use dotenvy::dotenv;

use cli::{Cli, Commands};
use commands::RunOptions;
use config::StorageConfig;
use s3_client::create_client;
use storage::S3Store;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    tracing_init::init_tracing(cli.verbose);

    let config = StorageConfig::load_from_cli(&cli)?;
    let client = create_client(&config, cli.verbose).await?;
    let store = S3Store::new(client, config.bucket.clone(), config.prefix.clone());
    let options = RunOptions {
        dry_run: cli.dry_run,
        verbose: cli.verbose,
    };

    match cli.command {
        Commands::Purge => {
            commands::purge::purge_bucket(&store, options).await?;
        }
        Commands::Prune { keep } => {
            let keep = config::env_keep(keep)?;
            commands::prune::prune_bucket(&store, keep, options).await?;
        }
        Commands::List { keep } => {
            let keep = config::env_keep(keep)?;
            commands::list::list_objects(&store, keep, cli.verbose).await?;
        }
    }

    Ok(())
}

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "r2-purge")]
#[command(about = "Delete all objects, or all but the newest ones, from an R2 bucket")]
#[command(version = "1.0")]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print what would be deleted without deleting anything
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Storage bucket name (overrides env STORAGE_BUCKET)
    #[arg(long, global = true)]
    pub bucket: Option<String>,

    /// Cloudflare account id, used to build the R2 endpoint (overrides env STORAGE_ACCOUNT_ID)
    #[arg(long, global = true)]
    pub account_id: Option<String>,

    /// Storage access key (overrides env STORAGE_ACCESS_KEY)
    #[arg(long, global = true)]
    pub access_key: Option<String>,

    /// Storage secret key (overrides env STORAGE_SECRET_KEY)
    #[arg(long, global = true)]
    pub secret_key: Option<String>,

    /// Storage endpoint URL (overrides env STORAGE_URL and the account id endpoint)
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Storage region (overrides env STORAGE_REGION)
    #[arg(long, global = true)]
    pub region: Option<String>,

    /// Only consider keys under this prefix (overrides env STORAGE_PREFIX)
    #[arg(long, global = true)]
    pub prefix: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Delete every object in the bucket
    Purge,

    /// Keep the newest objects and delete the rest
    Prune {
        /// Number of most recently modified objects to keep (overrides env STORAGE_KEEP)
        #[arg(long)]
        keep: Option<usize>,
    },

    /// List objects newest first and show which ones prune would delete
    List {
        /// Number of most recently modified objects prune would keep (overrides env STORAGE_KEEP)
        #[arg(long)]
        keep: Option<usize>,
    },
}

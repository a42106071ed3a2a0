//! pktgen-prep - protocol codegen preparation tool

use anyhow::Result;
use clap::Parser;
use pktgen_common::logging::{init_logging, LogConfig, LogLevel};
use pktgen_prep::pipeline::{
    self, PipelineConfig, DEFAULT_CODEGEN_REPO, DEFAULT_LISTING_URL, DEFAULT_PROTOS_REPO,
    DEFAULT_SOURCE_REPO,
};
use pktgen_prep::{cmdid, fetch, stage};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "pktgen-prep")]
#[command(author, version, about = "Protocol codegen preparation tool")]
struct Cli {
    /// Pipeline stage to run
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Parser, Debug)]
enum Command {
    /// Run the full preparation pipeline
    Run {
        /// URL of the identifier-listing source
        #[arg(long, default_value = DEFAULT_LISTING_URL)]
        listing_url: String,

        /// Protocol schema repository
        #[arg(long, default_value = DEFAULT_PROTOS_REPO)]
        protos_repo: String,

        /// Source protocol definition repository
        #[arg(long, default_value = DEFAULT_SOURCE_REPO)]
        source_repo: String,

        /// Generator tool source repository
        #[arg(long, default_value = DEFAULT_CODEGEN_REPO)]
        codegen_repo: String,

        /// Directory for repository snapshots
        #[arg(short, long, default_value = ".")]
        workdir: PathBuf,

        /// Staged data directory
        #[arg(short, long, default_value = "data")]
        data_dir: PathBuf,

        /// Prebuilt generator binary (otherwise built from its cloned source)
        #[arg(long)]
        generator: Option<PathBuf>,
    },

    /// Extract just the command-id table
    Extract {
        /// Local listing file to read instead of fetching
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// URL of the identifier-listing source
        #[arg(long, default_value = DEFAULT_LISTING_URL)]
        listing_url: String,

        /// Output file
        #[arg(short, long, default_value = "packetIds.json")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Environment configuration first, the verbose flag only raises the level
    let mut log_config = LogConfig::from_env().unwrap_or_default();
    if cli.verbose {
        log_config.level = LogLevel::Debug;
    }
    init_logging(&log_config)?;

    match cli.command {
        Command::Run {
            listing_url,
            protos_repo,
            source_repo,
            codegen_repo,
            workdir,
            data_dir,
            generator,
        } => {
            info!("Preparing staged data directory");
            let config = PipelineConfig {
                listing_url,
                protos_repo,
                source_repo,
                codegen_repo,
                workdir,
                data_dir,
                generator,
            };
            pipeline::run(&config).await?;
        },
        Command::Extract {
            input,
            listing_url,
            output,
        } => {
            let listing = match input {
                Some(path) => std::fs::read_to_string(path)?,
                None => {
                    let client = reqwest::Client::new();
                    fetch::fetch_listing(&client, &listing_url).await?
                },
            };

            let table = cmdid::extract_table(listing.lines())?;
            info!(entries = table.len(), "Extracted command-id table");
            stage::write_table(&table, &output)?;
        },
    }

    info!("Preparation complete");
    Ok(())
}

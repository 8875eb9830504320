//! marketplace-notify - push orchestrator events to the marketplace.
//!
//! # Commands
//!
//! - `marketplace-notify health` - Check that the webhooks are reachable
//! - `marketplace-notify brand <FILE>` - Announce a new brand
//! - `marketplace-notify book --brand-id <ID> <FILE>` - Add a generated book
//! - `marketplace-notify seo --brand-id <ID> <FILE>` - Publish an SEO post
//! - `marketplace-notify demo` - Run the full brand, book and post sequence

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use marketplace_webhooks::{ClientConfig, ClientConfigBuilder, MarketplaceClient};
use std::path::PathBuf;
use tracing::debug;

mod commands;
mod error;
mod logging;

use error::CliResult;
use logging::LogFormat;

/// Notify the marketplace about brands, books and SEO posts
#[derive(Parser)]
#[command(name = "marketplace-notify")]
#[command(version)]
#[command(about = "Send orchestrator events to the marketplace webhooks")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Marketplace base URL (default: MARKETPLACE_URL or http://localhost:3001)
    #[arg(long, global = true)]
    url: Option<String>,

    /// Notification timeout in seconds
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,

    /// Enable verbose output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the marketplace webhooks are available
    Health,

    /// Notify that a brand was created
    Brand {
        /// JSON file with the brand
        file: PathBuf,
    },

    /// Notify that a book was generated
    Book(BookArgs),

    /// Notify that an SEO post was generated
    Seo {
        /// Brand the post belongs to
        #[arg(long)]
        brand_id: String,

        /// JSON file with the post
        file: PathBuf,
    },

    /// Create a sample brand with one book and one blog post
    Demo,
}

#[derive(Args)]
struct BookArgs {
    /// Brand the book belongs to
    #[arg(long)]
    brand_id: String,

    /// Cover image (JPG/PNG)
    #[arg(long)]
    cover: Option<PathBuf>,

    /// Book PDF
    #[arg(long)]
    pdf: Option<PathBuf>,

    /// JSON file with the book
    file: PathBuf,
}

impl Cli {
    /// Defaults < config file < environment < flags
    fn client_config(&self) -> CliResult<ClientConfig> {
        let mut builder =
            ClientConfigBuilder::from_config(ClientConfig::load(self.config.as_deref())?);
        if let Some(url) = &self.url {
            builder = builder.base_url(url.as_str());
        }
        if let Some(secs) = self.timeout {
            builder = builder.timeout_secs(secs);
        }
        Ok(builder.build())
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.log_format, cli.verbose, cli.quiet);

    if let Err(e) = run(cli).await {
        eprintln!("\n  {} {}\n", "Error:".red().bold(), e);
        if let Some(hint) = e.hint() {
            eprintln!("{}", hint);
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    let config = cli.client_config()?;
    debug!(
        base_url = %config.base_url,
        timeout_secs = config.timeout.as_secs(),
        health_timeout_secs = config.health_timeout.as_secs(),
        "Resolved client configuration"
    );
    let client = MarketplaceClient::new(config)?;

    match cli.command {
        Commands::Health => commands::health::run(&client).await,
        Commands::Brand { file } => commands::notify::brand(&client, &file).await,
        Commands::Book(args) => {
            commands::notify::book(
                &client,
                &args.brand_id,
                &args.file,
                args.cover.as_deref(),
                args.pdf.as_deref(),
            )
            .await
        }
        Commands::Seo { brand_id, file } => commands::notify::seo(&client, &brand_id, &file).await,
        Commands::Demo => commands::demo::run(&client).await,
    }
}

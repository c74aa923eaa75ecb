//! paintchip - paint color metadata CLI
//!
//! Downloads catalog colors, builds the bulk lookup table, and answers
//! metadata queries from the command line.

use std::fs;
use std::fs::File;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use paintchip_lib::DEFAULT_BASE_URL;
use paintchip_lib::metric::Metric;
use simplelog::ColorChoice;
use simplelog::CombinedLogger;
use simplelog::Config;
use simplelog::LevelFilter;
use simplelog::SharedLogger;
use simplelog::TermLogger;
use simplelog::TerminalMode;
use simplelog::WriteLogger;

mod commands;
mod paths;

#[derive(Parser)]
#[command(name = "paintchip")]
#[command(author, version, about = "Paint color metadata from the color catalog")]
#[command(long_about = "
Looks up paint colors by code and derives RGB, HSL, HSV, LAB and LCH
coordinates for each. Lookups use the bulk lookup table first, then the
local cache, then the catalog.

Examples:
  paintchip download 1 9999             # Download every code into the archive
  paintchip build-lookup                # Precompute the bulk lookup table
  paintchip lookup SW7008 SW7005        # Print metadata as JSON
  paintchip points lch-chroma lrv       # CSV of every table color on two axes
  paintchip cache list                  # Show cached codes
  paintchip cache forget SW7008         # Drop a cached entry
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalArgs,
}

/// Options shared by every command.
#[derive(Args)]
struct GlobalArgs {
    /// Catalog base URL
    #[arg(long, global = true, env = "PAINTCHIP_CATALOG_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Path of the lookup cache database (default: platform data dir)
    #[arg(long, global = true)]
    cache_db: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value = "30")]
    timeout: u64,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Download a range of color codes into the archive
    #[command(visible_alias = "dl")]
    Download(DownloadArgs),

    /// Build the bulk lookup table from the downloaded archive
    #[command(name = "build-lookup")]
    BuildLookup(BuildLookupArgs),

    /// Print metadata for color codes as JSON
    Lookup(LookupArgs),

    /// Print colors as CSV points on two metric axes
    Points(PointsArgs),

    /// Inspect or edit the lookup cache
    #[command(subcommand)]
    Cache(CacheCommands),
}

#[derive(Args)]
struct DownloadArgs {
    /// First numeric code (inclusive)
    min: u32,

    /// Last numeric code (inclusive)
    max: u32,

    /// Downloaded colors file (default: platform data dir)
    #[arg(long)]
    colors: Option<PathBuf>,

    /// Invalid codes file (default: platform data dir)
    #[arg(long)]
    invalid: Option<PathBuf>,
}

#[derive(Args)]
struct BuildLookupArgs {
    /// Downloaded colors file (default: platform data dir)
    #[arg(long)]
    colors: Option<PathBuf>,

    /// Output lookup table (default: platform data dir)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(Args)]
struct LookupArgs {
    /// Color codes, e.g. SW7008
    #[arg(required = true)]
    codes: Vec<String>,

    /// Lookup table file or http(s) URL (default: platform data dir, if built)
    #[arg(long)]
    table: Option<String>,
}

#[derive(Args)]
struct PointsArgs {
    /// Metric for the x axis, e.g. lch-chroma
    x: Metric,

    /// Metric for the y axis, e.g. lrv
    y: Metric,

    /// Color codes (default: every color in the lookup table)
    codes: Vec<String>,

    /// Lookup table file or http(s) URL (default: platform data dir, if built)
    #[arg(long)]
    table: Option<String>,
}

#[derive(Subcommand)]
enum CacheCommands {
    /// List cached codes
    List,

    /// Drop the cached entry for a code
    Forget {
        /// Color code
        code: String,
    },
}

fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];

    paths::rotate_logs();
    if let Some(log_file) = paths::log_file() {
        if let Some(dir) = log_file.parent() {
            fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        let file = File::create(&log_file)
            .with_context(|| format!("Failed to create log file {}", log_file.display()))?;
        loggers.push(WriteLogger::new(LevelFilter::Debug, Config::default(), file));
    }

    CombinedLogger::init(loggers).context("Failed to initialize logger")
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.global.verbose)?;

    match cli.command {
        Commands::Download(args) => commands::download::run(args, &cli.global).await,
        Commands::BuildLookup(args) => commands::lookup::run_build(args).await,
        Commands::Lookup(args) => commands::lookup::run_lookup(args, &cli.global).await,
        Commands::Points(args) => commands::lookup::run_points(args, &cli.global).await,
        Commands::Cache(command) => commands::cache::run(command, &cli.global).await,
    }
}

//! dayahead CLI - ENTSO-E day-ahead electricity price downloader.

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use dayahead_lib::url::BASE_URL;
use dayahead_lib::{Resolution, WindowBound};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod display;

use display::Format;

#[derive(Parser)]
#[command(name = "dayahead")]
#[command(about = "ENTSO-E day-ahead electricity price downloader", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (only errors are logged, no summaries)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch day-ahead prices for a bidding zone
    Prices {
        /// Area alias (e.g., de-lu, se3) or EIC code
        area: String,

        /// Window start (RFC 3339, or YYYY-MM-DD[THH:MM] taken as UTC). Defaults to now.
        #[arg(short, long)]
        start: Option<WindowBound>,

        /// Window end, same formats as start. Defaults to start + 1 day.
        #[arg(short, long)]
        end: Option<WindowBound>,

        /// Price resolution (15m, 30m, 60m)
        #[arg(short, long, default_value = "60m")]
        resolution: Resolution,

        /// Drop prices outside the requested window
        #[arg(long)]
        clip: bool,

        /// Render timestamps in the area's local time zone
        #[arg(long, conflicts_with = "tz")]
        area_tz: bool,

        #[command(flatten)]
        output: OutputArgs,

        /// ENTSO-E API security token
        #[arg(long, env = "ENTSOE_API_KEY", hide_env_values = true)]
        api_key: String,

        /// API endpoint
        #[arg(long, env = "ENTSOE_BASE_URL", default_value = BASE_URL)]
        base_url: String,

        /// HTTP request timeout in seconds
        #[arg(long, default_value = "60")]
        timeout: u64,
    },

    /// Decode a saved market document
    Decode {
        /// Path to the XML document
        file: PathBuf,

        /// Price resolution (15m, 30m, 60m)
        #[arg(short, long, default_value = "60m")]
        resolution: Resolution,

        /// Reset gap tracking at every Period instead of once per document
        #[arg(long)]
        per_period: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List known bidding zones
    Areas {
        /// Search pattern (alias, name or EIC code)
        #[arg(short, long)]
        search: Option<String>,
    },
}

/// Output options shared by commands that print a price curve.
#[derive(Args)]
struct OutputArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    format: Format,

    /// Output file path. Defaults to stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Display time zone (IANA name, e.g., Europe/Berlin)
    #[arg(long, default_value = "UTC")]
    tz: String,

    /// Sort prices chronologically
    #[arg(long)]
    sort: bool,
}

/// Installs the stderr log subscriber. `RUST_LOG` overrides the verbosity flags.
fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose > 1)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine, the environment may already be set.
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Prices {
            area,
            start,
            end,
            resolution,
            clip,
            area_tz,
            output,
            api_key,
            base_url,
            timeout,
        } => {
            let request = commands::prices::PriceRequest {
                area,
                start,
                end,
                resolution,
                clip,
                area_tz,
                api_key,
                base_url,
                timeout,
            };
            commands::prices::prices(request, &output.into(), cli.quiet).await
        }
        Commands::Decode {
            file,
            resolution,
            per_period,
            output,
        } => commands::decode::decode_file(&file, resolution, per_period, &output.into(), cli.quiet),
        Commands::Areas { search } => commands::areas::list_areas(search.as_deref()),
    }
}

impl From<OutputArgs> for display::OutputOptions {
    fn from(args: OutputArgs) -> Self {
        Self {
            format: args.format,
            path: args.output,
            time_zone: args.tz,
            sort: args.sort,
        }
    }
}

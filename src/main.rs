//! Command-line front-end for wallpaper-dl

use std::error::Error as _;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use wallpaper_dl::{Config, WallpaperDownloader};

#[derive(Debug, Parser)]
#[command(
    version,
    about = "Download the Bing daily wallpaper with a customizable output location",
    after_help = "Examples:
  wallpaper-dl                                 Save to the default location
  wallpaper-dl ~/Pictures/wallpapers/          Save to a directory with the default filename
  wallpaper-dl ~/Pictures/wallpapers/wall.jpg  Save to a specific file, JPEG-encoded
  wallpaper-dl -m en-US                        Use the US market
  wallpaper-dl -o 1                            Get yesterday's wallpaper"
)]
struct Args {
    /// Output path (file or directory). Directories get the default filename.
    output: Option<PathBuf>,

    /// Market/locale selecting the localized image variant
    #[arg(short, long, default_value = wallpaper_dl::DEFAULT_MARKET)]
    market: String,

    /// Days back from today (0 = today, 1 = yesterday)
    #[arg(short, long, default_value_t = 0)]
    offset: u32,

    /// Number of archive entries to request (only the first is used)
    #[arg(short, long, default_value_t = 1)]
    count: u32,

    /// Verbose output, including a full error trace on failure
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args).await {
        Ok(dest) => {
            println!("Saved to: {}", dest.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {err}");
            if args.verbose {
                let mut source = err.source();
                while let Some(cause) = source {
                    eprintln!("  caused by: {cause}");
                    source = cause.source();
                }
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args) -> wallpaper_dl::Result<PathBuf> {
    let config = Config {
        market: args.market.clone(),
        offset: args.offset,
        count: args.count,
        ..Config::default()
    };

    let downloader = WallpaperDownloader::new(config)?;
    downloader.download_to(args.output.as_deref()).await
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "wallpaper_dl=debug"
    } else {
        "wallpaper_dl=info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

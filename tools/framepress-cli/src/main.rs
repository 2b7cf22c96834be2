//! framepress CLI — fetch videos and compose practice sheets.
//!
//! Usage:
//!   framepress fetch <URL>               Download a video via yt-dlp
//!   framepress probe <PATH>              Show video stream metadata
//!   framepress compose <PATH>            Sample frames and write a PDF
//!   framepress compose-images <FILES>    Compose a PDF from image files
//!   framepress sweep                     Delete expired downloads

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "framepress",
    about = "Turn video passages into printable practice sheets",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download a video via yt-dlp
    Fetch {
        /// Video URL
        url: String,

        /// Override the downloads directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show video stream metadata as JSON
    Probe {
        /// Path to the video file
        path: PathBuf,
    },

    /// Sample frames from a video and compose them into a PDF
    Compose {
        /// Path to the video file
        path: PathBuf,

        /// Output PDF path
        #[arg(short, long, default_value = "sheet.pdf")]
        output: PathBuf,

        /// Sampling start, in milliseconds
        #[arg(long, default_value = "0")]
        start_ms: u64,

        /// Sampling end, in milliseconds (defaults to the video duration)
        #[arg(long)]
        end_ms: Option<u64>,

        /// Sampling interval, in milliseconds
        #[arg(long, default_value = "1000")]
        interval_ms: u64,

        /// Crop rectangle as x1,y1,x2,y2 (defaults to the full frame)
        #[arg(long)]
        crop: Option<String>,

        /// Frames stacked on each page
        #[arg(long, default_value = "1")]
        frames_per_page: usize,

        /// Frame width as a percentage of the usable page width
        #[arg(long, default_value = "95")]
        width_percent: u32,

        /// Vertical gap between frames, in points
        #[arg(long, default_value = "10")]
        gap: u32,

        /// Title drawn at the top of every page
        #[arg(short, long)]
        title: Option<String>,
    },

    /// Compose a PDF directly from image files
    ComposeImages {
        /// Image files, in page order
        files: Vec<PathBuf>,

        /// Output PDF path
        #[arg(short, long, default_value = "sheet.pdf")]
        output: PathBuf,

        /// Frames stacked on each page
        #[arg(long, default_value = "1")]
        frames_per_page: usize,

        /// Frame width as a percentage of the usable page width
        #[arg(long, default_value = "95")]
        width_percent: u32,

        /// Vertical gap between frames, in points
        #[arg(long, default_value = "10")]
        gap: u32,

        /// Title drawn at the top of every page
        #[arg(short, long)]
        title: Option<String>,
    },

    /// Delete expired files from the downloads directory
    Sweep {
        /// Override the retention window, in seconds
        #[arg(long)]
        retention_secs: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    framepress_common::logging::init_logging(&framepress_common::config::LoggingConfig {
        level: log_level.to_string(),
        json: false,
        file: None,
    });

    match cli.command {
        Commands::Fetch { url, output } => commands::fetch::run(url, output).await,
        Commands::Probe { path } => commands::probe::run(path),
        Commands::Compose {
            path,
            output,
            start_ms,
            end_ms,
            interval_ms,
            crop,
            frames_per_page,
            width_percent,
            gap,
            title,
        } => commands::compose::run(
            path,
            output,
            start_ms,
            end_ms,
            interval_ms,
            crop,
            frames_per_page,
            width_percent,
            gap,
            title,
        ),
        Commands::ComposeImages {
            files,
            output,
            frames_per_page,
            width_percent,
            gap,
            title,
        } => commands::images::run(files, output, frames_per_page, width_percent, gap, title),
        Commands::Sweep { retention_secs } => commands::sweep::run(retention_secs),
    }
}

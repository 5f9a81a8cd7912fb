//! Command line interface definition

use clap::{Parser, Subcommand};
use clipper_types::{ClipId, ColorChoice};
use std::path::PathBuf;

/// clipper - turn long recordings into short clips
#[derive(Parser)]
#[command(name = "clipper")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Upload videos to the clip pipeline and follow its progress")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Global arguments available for all commands
#[derive(Parser)]
pub struct GlobalArgs {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Write debug logs to the clipper log directory
    #[arg(long, global = true)]
    pub debug: bool,

    /// Color output control
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorChoice>,

    /// Use alternate config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Backend base URL (overrides config and CLIPPER_API_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Upload a video and start processing
    #[command(alias = "up")]
    Upload {
        /// Video file (.mp4, .mov, .mkv, .webm)
        file: PathBuf,

        /// Keep polling until processing finishes
        #[arg(short, long)]
        watch: bool,
    },

    /// Show the current pipeline status
    #[command(alias = "st")]
    Status,

    /// Follow the pipeline until it leaves processing
    Watch,

    /// List produced clips
    #[command(alias = "ls")]
    Clips,

    /// Show download and preview links for a clip
    Links {
        /// Clip id as listed by `clipper clips`
        id: ClipId,
    },

    /// Read or replace a clip's edit settings
    #[command(subcommand)]
    ClipConfig(ClipConfigCommands),

    /// Re-render a clip with its saved settings
    Render {
        /// Clip id
        id: ClipId,
    },

    /// Inspect or create the local configuration file
    #[command(subcommand)]
    Settings(SettingsCommands),
}

/// Clip edit settings commands
#[derive(Subcommand)]
pub enum ClipConfigCommands {
    /// Print the clip's facecam and subtitle settings
    Get {
        /// Clip id
        id: ClipId,
    },

    /// Replace the clip's settings with a JSON file
    Save {
        /// Clip id
        id: ClipId,

        /// JSON file holding `facecam` and `subtitles`
        file: PathBuf,
    },
}

/// Local configuration commands
#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Print the effective configuration
    Show,

    /// Write the effective configuration to the config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

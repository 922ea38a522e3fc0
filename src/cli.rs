use clap::{Parser, Subcommand};
use dashgate_core::OutputFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dashgate")]
#[command(author, version, about = "Adaptive-streaming transcoding job gateway")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    Start {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print the job request that would be submitted for an input key
    Plan {
        /// Storage key of the uploaded file
        #[arg(required = true)]
        input: String,

        /// Quality labels to produce, comma separated
        #[arg(long, value_delimiter = ',')]
        resolutions: Option<Vec<String>>,

        /// Output format (dash or hls; defaults to the configured format)
        #[arg(long)]
        format: Option<OutputFormat>,

        /// Input has no audio track
        #[arg(long)]
        no_audio: bool,

        /// Only extract the audio track
        #[arg(long, conflicts_with_all = ["resolutions", "no_audio"])]
        audio_only: bool,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default search if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

//! CLI Module
//!
//! Command-line interface for pcmkit.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// pcmkit - PCM audio buffer toolkit
#[derive(Parser, Debug)]
#[command(name = "pcmkit")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show a file's decoded audio properties
    Info {
        /// Audio file to inspect
        path: PathBuf,
    },

    /// Down-mix to mono by averaging channels
    Mono {
        /// Input audio file
        input: PathBuf,

        /// Output file
        output: PathBuf,

        /// Output format (mp3, wav, ogg, flac); inferred from the output
        /// extension when omitted
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Extract a single channel
    Channel {
        /// Input audio file
        input: PathBuf,

        /// Output file
        output: PathBuf,

        /// Channel index (0 = left, 1 = right)
        #[arg(short, long, default_value_t = 0)]
        index: usize,

        /// Output format; inferred from the output extension when omitted
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Concatenate two or more files with matching formats
    Concat {
        /// Input audio files, joined in order
        #[arg(num_args = 2.., required = true)]
        inputs: Vec<PathBuf>,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,

        /// Output format; inferred from the output extension when omitted
        #[arg(short, long)]
        format: Option<String>,
    },
}

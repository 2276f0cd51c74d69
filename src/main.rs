//! pcmkit CLI - PCM audio buffer toolkit
//!
//! Command-line interface over the pcmkit load/transform/save pipeline.

use clap::Parser;
use env_logger::Env;
use log::info;

use pcmkit::cli::{commands, Cli, Commands};
use pcmkit::Result;

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    info!("pcmkit v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Info { path } => commands::info(&path),
        Commands::Mono {
            input,
            output,
            format,
        } => commands::mono(&input, &output, format.as_deref()),
        Commands::Channel {
            input,
            output,
            index,
            format,
        } => commands::channel(&input, &output, index, format.as_deref()),
        Commands::Concat {
            inputs,
            output,
            format,
        } => commands::concat(&inputs, &output, format.as_deref()),
    }
}

//! CLI Command Implementations
//!
//! Implements the actual logic for each CLI command.

use std::path::Path;

use log::info;

use crate::error::Result;
use crate::io::{load_audio, save_audio, SaveFormat};

/// Resolve an optional format name ahead of any work
fn resolve_format(name: Option<&str>) -> Result<Option<SaveFormat>> {
    name.map(SaveFormat::from_name).transpose()
}

/// Print a file's decoded audio properties.
pub fn info(path: &Path) -> Result<()> {
    let buffer = load_audio(path)?;
    let meta = buffer.metadata();

    println!("File: {}", path.display());
    println!("  Channels:      {}", meta.channels());
    println!("  Sample rate:   {} Hz", meta.sample_rate);
    println!("  Bit depth:     {}-bit", meta.bits_per_sample());
    println!("  Frames:        {}", meta.frame_count);
    println!("  Duration:      {:.3}s (reported)", meta.duration_seconds);
    println!(
        "  Duration:      {:.3}s (from frame count)",
        meta.derived_duration_seconds()
    );

    Ok(())
}

/// Down-mix a file to mono and save it.
pub fn mono(input: &Path, output: &Path, format: Option<&str>) -> Result<()> {
    let format = resolve_format(format)?;

    info!("Down-mixing {} to mono", input.display());
    let buffer = load_audio(input)?;
    let mixed = buffer.to_mono();
    save_audio(&mixed, output, format)?;

    println!("Wrote mono audio to {}", output.display());
    Ok(())
}

/// Extract one channel of a file and save it.
pub fn channel(input: &Path, output: &Path, index: usize, format: Option<&str>) -> Result<()> {
    let format = resolve_format(format)?;

    info!("Extracting channel {} from {}", index, input.display());
    let buffer = load_audio(input)?;
    let extracted = buffer.channel(index)?;
    save_audio(&extracted, output, format)?;

    println!("Wrote channel {} to {}", index, output.display());
    Ok(())
}

/// Concatenate files in order and save the result.
pub fn concat(inputs: &[std::path::PathBuf], output: &Path, format: Option<&str>) -> Result<()> {
    let format = resolve_format(format)?;

    info!("Concatenating {} files", inputs.len());

    // clap enforces at least two inputs
    let (first, rest) = match inputs.split_first() {
        Some(parts) => parts,
        None => return Ok(()),
    };
    let mut combined = load_audio(first)?;

    for path in rest {
        let next = load_audio(path)?;
        combined = combined.concat(&next)?;
    }

    save_audio(&combined, output, format)?;

    println!(
        "Wrote {} frames ({} inputs) to {}",
        combined.frame_count(),
        inputs.len(),
        output.display()
    );
    Ok(())
}

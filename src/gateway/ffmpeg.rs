//! Codec gateway: ffmpeg/ffprobe subprocess boundary
//!
//! Container and codec work is delegated to external tools. Every call is
//! blocking and opaque: no progress, no cancellation, no retries. Failures
//! surface the tool's stderr text to the caller.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use log::debug;
use serde::Deserialize;

use crate::error::{AudioError, Result};
use crate::io::SaveFormat;

/// Probed stream properties, as reported by ffprobe
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeInfo {
    pub sample_rate: u32,
    pub channels: u16,
    /// Reported duration in seconds
    pub duration: f64,
    /// Bits per sample; 16 when the container does not declare one
    pub bit_depth: u16,
}

// ffprobe's JSON document. Numeric fields arrive as strings.
#[derive(Debug, Deserialize)]
struct FfprobeDocument {
    #[serde(default)]
    streams: Vec<FfprobeStream>,
    format: Option<FfprobeFormat>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    codec_type: Option<String>,
    sample_rate: Option<String>,
    channels: Option<u16>,
    bits_per_sample: Option<u16>,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    duration: Option<String>,
}

fn probe_error(reason: impl Into<String>) -> AudioError {
    AudioError::ProbeError {
        reason: reason.into(),
    }
}

/// Probe a media file's audio stream properties
///
/// # Errors
/// * `ProbeError` - ffprobe failed to run or exited non-zero, its output
///   was unparseable, or the file has no audio stream
pub fn probe(path: &Path) -> Result<ProbeInfo> {
    debug!("Probing {}", path.display());

    let output = Command::new("ffprobe")
        .args([
            "-v",
            "quiet",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
        ])
        .arg(path)
        .output()
        .map_err(|e| probe_error(format!("failed to run ffprobe: {}", e)))?;

    if !output.status.success() {
        return Err(probe_error(format!(
            "ffprobe exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    parse_probe_output(&output.stdout)
}

/// Extract the audio stream's properties from ffprobe's JSON output
fn parse_probe_output(json: &[u8]) -> Result<ProbeInfo> {
    let doc: FfprobeDocument = serde_json::from_slice(json)
        .map_err(|e| probe_error(format!("unparseable ffprobe output: {}", e)))?;

    let stream = doc
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("audio"))
        .ok_or_else(|| probe_error("no audio stream found"))?;

    let sample_rate = stream
        .sample_rate
        .as_deref()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| probe_error("missing or invalid sample_rate"))?;

    let channels = stream
        .channels
        .ok_or_else(|| probe_error("missing channel count"))?;

    let duration = doc
        .format
        .and_then(|f| f.duration)
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| probe_error("missing or invalid duration"))?;

    // Lossy codecs report no per-sample width; decode as 16-bit then
    let bit_depth = match stream.bits_per_sample {
        Some(bits) if bits > 0 => bits,
        _ => 16,
    };

    Ok(ProbeInfo {
        sample_rate,
        channels,
        duration,
        bit_depth,
    })
}

/// Decode a media file into a raw WAV byte stream at its probed format
///
/// # Errors
/// * `DecodeError` - ffmpeg failed to run or exited non-zero
pub fn decode(path: &Path, info: &ProbeInfo) -> Result<Vec<u8>> {
    debug!(
        "Decoding {} ({} Hz, {} ch, {}-bit)",
        path.display(),
        info.sample_rate,
        info.channels,
        info.bit_depth
    );

    let output = Command::new("ffmpeg")
        .args(["-v", "error", "-i"])
        .arg(path)
        .args([
            "-f",
            "wav",
            "-ar",
            &info.sample_rate.to_string(),
            "-ac",
            &info.channels.to_string(),
            "-bits_per_raw_sample",
            &info.bit_depth.to_string(),
            "-",
        ])
        .stdin(Stdio::null())
        .output()
        .map_err(|e| AudioError::DecodeError {
            reason: format!("failed to run ffmpeg: {}", e),
        })?;

    if !output.status.success() {
        return Err(AudioError::DecodeError {
            reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(output.stdout)
}

/// Encode a WAV byte stream into the target container at `out_path`
///
/// # Errors
/// * `EncodeError` - ffmpeg failed to run or exited non-zero
pub fn encode(wav_bytes: &[u8], format: SaveFormat, out_path: &Path) -> Result<()> {
    debug!(
        "Encoding {} bytes as {} to {}",
        wav_bytes.len(),
        format.as_str(),
        out_path.display()
    );

    let mut child = Command::new("ffmpeg")
        .args(["-v", "error", "-y", "-f", "wav", "-i", "-", "-f"])
        .arg(format.as_str())
        .arg(out_path)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| AudioError::EncodeError {
            reason: format!("failed to run ffmpeg: {}", e),
        })?;

    if let Some(mut stdin) = child.stdin.take() {
        // Dropping stdin closes the pipe so ffmpeg sees end of input.
        // A broken pipe means ffmpeg exited early; its stderr is the
        // better diagnostic, so fall through and collect it.
        if let Err(e) = stdin.write_all(wav_bytes) {
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                return Err(e.into());
            }
        }
    }

    let output = child.wait_with_output()?;
    if !output.status.success() {
        return Err(AudioError::EncodeError {
            reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

//! Raw WAV stream handling
//!
//! The codec gateway hands the core linear-PCM WAV byte streams; this
//! module reads the five fields the core cares about (sample width,
//! channels, sample rate, frame count) plus the raw interleaved payload,
//! and writes streams back for the gateway to re-encode.
//!
//! Parsing walks the RIFF chunks directly because the normalization
//! contract operates on the untouched payload bytes. ffmpeg writes bogus
//! chunk sizes when streaming to a pipe, so the data chunk's declared size
//! is clamped to what is actually present. Writing goes through hound.

use std::io::Cursor;

use hound::{SampleFormat, WavSpec, WavWriter};

use crate::error::{AudioError, Result};
use crate::pcm::{sample, AudioBuffer};

/// WAVE_FORMAT_PCM
const FORMAT_TAG_PCM: u16 = 0x0001;
/// WAVE_FORMAT_EXTENSIBLE (ffmpeg emits this for some channel masks)
const FORMAT_TAG_EXTENSIBLE: u16 = 0xFFFE;

/// A parsed linear-PCM WAV stream
#[derive(Debug, Clone)]
pub struct WavStream {
    /// Samples per second
    pub sample_rate: u32,
    /// Channel count as declared in the header
    pub channels: u16,
    /// Bytes per sample
    pub sample_width: u16,
    /// Whole frames present in the payload
    pub frame_count: usize,
    /// Raw interleaved sample bytes
    pub payload: Vec<u8>,
}

fn malformed(reason: impl Into<String>) -> AudioError {
    AudioError::MalformedWav {
        reason: reason.into(),
    }
}

/// Parse a WAV byte stream into its format fields and raw payload
///
/// # Errors
/// * `MalformedWav` - missing RIFF/WAVE magic, missing fmt or data chunk,
///   non-PCM format tag, or a zero-channel/zero-width header
pub fn parse(bytes: &[u8]) -> Result<WavStream> {
    if bytes.len() < 12 || &bytes[0..4] != b"RIFF" || &bytes[8..12] != b"WAVE" {
        return Err(malformed("not a RIFF/WAVE stream"));
    }

    let mut format: Option<(u16, u16, u32, u16)> = None; // tag, channels, rate, bits
    let mut payload: Option<&[u8]> = None;

    let mut pos = 12;
    while pos + 8 <= bytes.len() {
        let id = &bytes[pos..pos + 4];
        let declared = u32::from_le_bytes([
            bytes[pos + 4],
            bytes[pos + 5],
            bytes[pos + 6],
            bytes[pos + 7],
        ]) as usize;
        let body_start = pos + 8;
        // Streamed output cannot seek back to patch sizes, so clamp to
        // the bytes actually present
        let body_end = body_start.saturating_add(declared).min(bytes.len());

        match id {
            b"fmt " => {
                if body_end - body_start < 16 {
                    return Err(malformed("fmt chunk too short"));
                }
                let f = &bytes[body_start..body_end];
                let tag = u16::from_le_bytes([f[0], f[1]]);
                let channels = u16::from_le_bytes([f[2], f[3]]);
                let rate = u32::from_le_bytes([f[4], f[5], f[6], f[7]]);
                let bits = u16::from_le_bytes([f[14], f[15]]);
                format = Some((tag, channels, rate, bits));
            }
            b"data" => {
                payload = Some(&bytes[body_start..body_end]);
            }
            _ => {}
        }

        // Chunks are word-aligned; odd sizes carry a pad byte
        pos = body_start
            .saturating_add(declared)
            .saturating_add(declared & 1);
    }

    let (tag, channels, sample_rate, bits) = format.ok_or_else(|| malformed("missing fmt chunk"))?;
    let payload = payload
        .ok_or_else(|| malformed("missing data chunk"))?
        .to_vec();

    if tag != FORMAT_TAG_PCM && tag != FORMAT_TAG_EXTENSIBLE {
        return Err(malformed(format!("unsupported format tag 0x{:04X}", tag)));
    }
    if channels == 0 {
        return Err(malformed("zero channels declared"));
    }
    if bits == 0 || bits % 8 != 0 {
        return Err(malformed(format!("unusable bit depth {}", bits)));
    }

    let sample_width = bits / 8;
    let frame_bytes = sample_width as usize * channels as usize;
    let frame_count = payload.len() / frame_bytes;

    Ok(WavStream {
        sample_rate,
        channels,
        sample_width,
        frame_count,
        payload,
    })
}

/// Write a buffer as an in-memory WAV stream
///
/// The payload is always 16-bit PCM per the encode contract, whatever the
/// buffer's source width; the header declares 16 bits to match.
pub fn write(buffer: &AudioBuffer) -> Result<Vec<u8>> {
    let spec = WavSpec {
        channels: buffer.metadata().channels(),
        sample_rate: buffer.metadata().sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    let mut writer = WavWriter::new(&mut cursor, spec).map_err(wav_io_error)?;

    for sample in sample::denormalize(buffer.data()) {
        writer.write_sample(sample).map_err(wav_io_error)?;
    }

    writer.finalize().map_err(wav_io_error)?;
    Ok(cursor.into_inner())
}

fn wav_io_error(e: hound::Error) -> AudioError {
    AudioError::Io(std::io::Error::new(
        std::io::ErrorKind::Other,
        e.to_string(),
    ))
}

// ============================================================================
// Tests
// ============================================================================

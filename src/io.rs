//! Load/save orchestration
//!
//! Ties the codec gateway to the PCM core: probe, decode to WAV, normalize
//! into a buffer on the way in; serialize to 16-bit WAV and re-encode on
//! the way out. Save targets are validated against the fixed format set
//! before ffmpeg is ever invoked.

use std::path::Path;

use log::info;

use crate::error::{AudioError, Result};
use crate::gateway;
use crate::pcm::{sample, AudioBuffer, AudioMetadata, ChannelLayout, SampleWidth};

// ============================================================================
// Save formats
// ============================================================================

/// The fixed set of supported save targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SaveFormat {
    Mp3,
    Wav,
    Ogg,
    Flac,
}

impl SaveFormat {
    /// The ffmpeg muxer name / file extension
    pub fn as_str(&self) -> &'static str {
        match self {
            SaveFormat::Mp3 => "mp3",
            SaveFormat::Wav => "wav",
            SaveFormat::Ogg => "ogg",
            SaveFormat::Flac => "flac",
        }
    }

    /// Parse a format name, case-insensitively
    ///
    /// # Errors
    /// * `UnsupportedFormat` - name outside the supported set
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "mp3" => Ok(SaveFormat::Mp3),
            "wav" => Ok(SaveFormat::Wav),
            "ogg" => Ok(SaveFormat::Ogg),
            "flac" => Ok(SaveFormat::Flac),
            other => Err(AudioError::UnsupportedFormat {
                format: format!("{} (supported: mp3, wav, ogg, flac)", other),
            }),
        }
    }

    /// Infer the format from a path's extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| AudioError::UnsupportedFormat {
                format: format!("{} (no file extension to infer from)", path.display()),
            })?;
        Self::from_name(ext)
    }
}

impl std::fmt::Display for SaveFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Load / save
// ============================================================================

/// Load a media file into an AudioBuffer via the codec gateway
///
/// The reported duration comes from the probe; the frame count comes from
/// the decoded data itself.
///
/// # Errors
/// * `ResourceNotFound` - path does not exist (checked before any gateway
///   call)
/// * `ProbeError` / `DecodeError` - gateway failure
/// * `MalformedWav` - gateway produced a stream we cannot read
/// * `UnsupportedFormat` - sample width outside {1, 2, 4} or more than two
///   channels
pub fn load_audio(path: &Path) -> Result<AudioBuffer> {
    if !path.exists() {
        return Err(AudioError::ResourceNotFound {
            path: path.display().to_string(),
        });
    }

    let probed = gateway::ffmpeg::probe(path)?;
    let wav_bytes = gateway::ffmpeg::decode(path, &probed)?;
    let stream = gateway::wav::parse(&wav_bytes)?;

    let sample_width = SampleWidth::from_bytes(stream.sample_width)?;
    let layout = ChannelLayout::from_count(stream.channels as usize).ok_or_else(|| {
        AudioError::UnsupportedFormat {
            format: format!(
                "{}-channel audio (only mono/stereo supported)",
                stream.channels
            ),
        }
    })?;

    let data = sample::decode(&stream.payload, sample_width, layout)?;

    let metadata = AudioMetadata {
        sample_rate: stream.sample_rate,
        layout,
        sample_width,
        duration_seconds: probed.duration,
        frame_count: data.frame_count(),
    };

    info!(
        "Loaded {}: {} frames, {} ch, {} Hz, {}-bit",
        path.display(),
        metadata.frame_count,
        metadata.channels(),
        metadata.sample_rate,
        metadata.bits_per_sample()
    );

    Ok(AudioBuffer::new(data, metadata))
}

/// Save a buffer to a file via the codec gateway
///
/// The format is inferred from the output path's extension when not given
/// explicitly, and validated before ffmpeg runs. The intermediate stream
/// is always 16-bit WAV.
///
/// # Errors
/// * `UnsupportedFormat` - target outside {mp3, wav, ogg, flac}
/// * `EncodeError` - gateway failure
pub fn save_audio(buffer: &AudioBuffer, path: &Path, format: Option<SaveFormat>) -> Result<()> {
    let format = match format {
        Some(f) => f,
        None => SaveFormat::from_path(path)?,
    };

    let wav_bytes = gateway::wav::write(buffer)?;
    gateway::ffmpeg::encode(&wav_bytes, format, path)?;

    info!(
        "Saved {} frames as {} to {}",
        buffer.frame_count(),
        format,
        path.display()
    );

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

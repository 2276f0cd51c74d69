//! Audio metadata
//!
//! Immutable descriptor of a buffer's physical format, plus the
//! compatibility guard used before concatenation.
//!
//! `duration_seconds` is the value reported by the originating probe and is
//! advisory: concatenation sums the reported durations rather than
//! recomputing from frame count. `derived_duration_seconds` gives the
//! authoritative value when one is needed.

use crate::error::{AudioError, Result};
use crate::pcm::sample::{ChannelLayout, SampleWidth};

/// Physical format of an audio buffer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioMetadata {
    /// Samples per second
    pub sample_rate: u32,
    /// Channel configuration (mono or stereo)
    pub layout: ChannelLayout,
    /// Byte width of the source integer encoding
    pub sample_width: SampleWidth,
    /// Nominal duration as reported by the originating decode
    pub duration_seconds: f64,
    /// Number of sample frames; always recomputed from the data
    pub frame_count: usize,
}

impl AudioMetadata {
    /// Number of channels (1 or 2)
    #[inline]
    pub fn channels(&self) -> u16 {
        self.layout.num_channels() as u16
    }

    /// Bits per sample of the source encoding
    #[inline]
    pub fn bits_per_sample(&self) -> u16 {
        self.sample_width.bits()
    }

    /// Duration recomputed from frame count and sample rate
    ///
    /// Unlike `duration_seconds` this stays consistent across
    /// concatenation.
    #[inline]
    pub fn derived_duration_seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frame_count as f64 / self.sample_rate as f64
    }
}

// ============================================================================
// Compatibility validation
// ============================================================================

/// Return the first field that differs between two metadata values
///
/// Checks channels, then sample rate, then sample width. Durations and
/// frame counts are deliberately not compared.
pub fn first_mismatch(a: &AudioMetadata, b: &AudioMetadata) -> Option<&'static str> {
    if a.layout != b.layout {
        return Some("channels");
    }
    if a.sample_rate != b.sample_rate {
        return Some("sample_rate");
    }
    if a.sample_width != b.sample_width {
        return Some("sample_width");
    }
    None
}

/// Guard for binary operations: fail with `IncompatibleAudio` naming the
/// first mismatched field
pub fn ensure_compatible(a: &AudioMetadata, b: &AudioMetadata) -> Result<()> {
    let Some(field) = first_mismatch(a, b) else {
        return Ok(());
    };

    let (left, right) = match field {
        "channels" => (a.channels().to_string(), b.channels().to_string()),
        "sample_rate" => (a.sample_rate.to_string(), b.sample_rate.to_string()),
        _ => (
            format!("{} bytes", a.sample_width.bytes()),
            format!("{} bytes", b.sample_width.bytes()),
        ),
    };

    Err(AudioError::IncompatibleAudio { field, left, right })
}

// ============================================================================
// Tests
// ============================================================================

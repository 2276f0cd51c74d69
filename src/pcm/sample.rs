//! Sample normalization
//!
//! Converts raw fixed-width signed-integer PCM bytes to and from the
//! normalized f32 representation used everywhere else in the crate.
//!
//! The normalization denominator is the maximum *positive* magnitude of the
//! source integer type (127, 32767, 2147483647), not 2^(bits-1), so the
//! negative extreme lands slightly below -1.0 before clamping. Decoded
//! samples are always clamped to [-1.0, 1.0].

use crate::error::{AudioError, Result};
use crate::pcm::buffer::SampleData;

// ============================================================================
// Sample width
// ============================================================================

/// Byte width of one integer sample in the source encoding
///
/// Only 8-, 16- and 32-bit signed integers are supported; anything else is
/// rejected at construction with `UnsupportedFormat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleWidth {
    /// 8-bit signed (1 byte per sample)
    I8,
    /// 16-bit signed (2 bytes per sample)
    I16,
    /// 32-bit signed (4 bytes per sample)
    I32,
}

impl SampleWidth {
    /// Create a SampleWidth from a byte count
    pub fn from_bytes(bytes: u16) -> Result<Self> {
        match bytes {
            1 => Ok(SampleWidth::I8),
            2 => Ok(SampleWidth::I16),
            4 => Ok(SampleWidth::I32),
            other => Err(AudioError::UnsupportedFormat {
                format: format!("{}-byte sample width (only 1, 2, 4 supported)", other),
            }),
        }
    }

    /// Bytes per sample
    #[inline]
    pub fn bytes(&self) -> usize {
        match self {
            SampleWidth::I8 => 1,
            SampleWidth::I16 => 2,
            SampleWidth::I32 => 4,
        }
    }

    /// Bits per sample
    #[inline]
    pub fn bits(&self) -> u16 {
        (self.bytes() * 8) as u16
    }

    /// Maximum positive representable magnitude, used as the normalization
    /// denominator
    #[inline]
    pub fn max_amplitude(&self) -> f32 {
        match self {
            SampleWidth::I8 => i8::MAX as f32,
            SampleWidth::I16 => i16::MAX as f32,
            SampleWidth::I32 => i32::MAX as f32,
        }
    }
}

// ============================================================================
// Channel layout
// ============================================================================

/// Audio channel configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelLayout {
    /// Single channel (mono)
    Mono,
    /// Two channels (stereo: left, right)
    Stereo,
}

impl ChannelLayout {
    /// Returns the number of channels for this layout
    #[inline]
    pub fn num_channels(&self) -> usize {
        match self {
            ChannelLayout::Mono => 1,
            ChannelLayout::Stereo => 2,
        }
    }

    /// Create a ChannelLayout from a channel count
    pub fn from_count(count: usize) -> Option<Self> {
        match count {
            1 => Some(ChannelLayout::Mono),
            2 => Some(ChannelLayout::Stereo),
            _ => None,
        }
    }
}

// ============================================================================
// Decode (integer bytes -> normalized samples)
// ============================================================================

/// Decode raw little-endian signed-integer PCM bytes into normalized samples
///
/// Stereo input is grouped into integer frame pairs before any float
/// conversion, so channel alignment depends only on integer frame
/// boundaries.
///
/// # Errors
/// * `MalformedWav` - payload length is not a whole number of frames
pub fn decode(raw: &[u8], width: SampleWidth, layout: ChannelLayout) -> Result<SampleData> {
    let frame_bytes = width.bytes() * layout.num_channels();
    if raw.len() % frame_bytes != 0 {
        return Err(AudioError::MalformedWav {
            reason: format!(
                "payload of {} bytes is not a whole number of {}-byte frames",
                raw.len(),
                frame_bytes
            ),
        });
    }

    let data = match layout {
        ChannelLayout::Mono => SampleData::Mono(
            raw.chunks_exact(width.bytes())
                .map(|bytes| normalize(read_sample(bytes, width), width))
                .collect(),
        ),
        ChannelLayout::Stereo => SampleData::Stereo(
            raw.chunks_exact(frame_bytes)
                .map(|frame| {
                    let left = read_sample(&frame[..width.bytes()], width);
                    let right = read_sample(&frame[width.bytes()..], width);
                    [normalize(left, width), normalize(right, width)]
                })
                .collect(),
        ),
    };

    Ok(data)
}

/// Read one little-endian signed sample from its byte representation
#[inline]
fn read_sample(bytes: &[u8], width: SampleWidth) -> i64 {
    match width {
        SampleWidth::I8 => bytes[0] as i8 as i64,
        SampleWidth::I16 => i16::from_le_bytes([bytes[0], bytes[1]]) as i64,
        SampleWidth::I32 => i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as i64,
    }
}

#[inline]
fn normalize(value: i64, width: SampleWidth) -> f32 {
    (value as f32 / width.max_amplitude()).clamp(-1.0, 1.0)
}

// ============================================================================
// Encode (normalized samples -> 16-bit integers)
// ============================================================================

/// Denormalize samples to interleaved 16-bit integers
///
/// The encode path always targets 16-bit PCM regardless of the buffer's
/// source width; samples are scaled by 32767 and truncated toward zero.
pub fn denormalize(data: &SampleData) -> Vec<i16> {
    const SCALE: f32 = i16::MAX as f32;

    match data {
        SampleData::Mono(samples) => samples.iter().map(|s| (s * SCALE) as i16).collect(),
        SampleData::Stereo(frames) => frames
            .iter()
            .flat_map(|frame| [(frame[0] * SCALE) as i16, (frame[1] * SCALE) as i16])
            .collect(),
    }
}

/// Encode samples as raw little-endian 16-bit PCM bytes
pub fn encode(data: &SampleData) -> Vec<u8> {
    denormalize(data)
        .into_iter()
        .flat_map(|s| s.to_le_bytes())
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

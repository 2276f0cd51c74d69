//! Audio buffer and its transformations
//!
//! An `AudioBuffer` pairs normalized sample data with its metadata. Buffers
//! are never mutated after construction: every transformation either
//! aliases the existing data (the mono no-op paths) or builds a new buffer.
//! The sample data sits behind an `Arc` so aliasing is a pointer copy, not
//! a sample copy.

use std::sync::Arc;

use crate::error::{AudioError, Result};
use crate::pcm::metadata::{ensure_compatible, AudioMetadata};
use crate::pcm::sample::ChannelLayout;

// ============================================================================
// Sample data
// ============================================================================

/// Normalized sample matrix
///
/// Mono is a flat sequence; stereo is frame-major pairs (left, right).
/// Every value lies in [-1.0, 1.0].
#[derive(Debug, Clone, PartialEq)]
pub enum SampleData {
    Mono(Vec<f32>),
    Stereo(Vec<[f32; 2]>),
}

impl SampleData {
    /// Number of sample frames (one frame = one sample per channel)
    #[inline]
    pub fn frame_count(&self) -> usize {
        match self {
            SampleData::Mono(samples) => samples.len(),
            SampleData::Stereo(frames) => frames.len(),
        }
    }

    /// Channel layout implied by the variant
    #[inline]
    pub fn layout(&self) -> ChannelLayout {
        match self {
            SampleData::Mono(_) => ChannelLayout::Mono,
            SampleData::Stereo(_) => ChannelLayout::Stereo,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frame_count() == 0
    }
}

// ============================================================================
// Audio buffer
// ============================================================================

/// Immutable decoded audio: normalized samples plus format metadata
///
/// # Example
/// ```
/// use pcmkit::pcm::{AudioBuffer, AudioMetadata, ChannelLayout, SampleData, SampleWidth};
///
/// let metadata = AudioMetadata {
///     sample_rate: 44100,
///     layout: ChannelLayout::Stereo,
///     sample_width: SampleWidth::I16,
///     duration_seconds: 2.0 / 44100.0,
///     frame_count: 2,
/// };
/// let buffer = AudioBuffer::new(SampleData::Stereo(vec![[0.5, -0.5], [0.25, 0.25]]), metadata);
/// let mono = buffer.to_mono();
/// assert_eq!(mono.metadata().channels(), 1);
/// assert_eq!(mono.frame_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct AudioBuffer {
    data: Arc<SampleData>,
    metadata: AudioMetadata,
}

impl AudioBuffer {
    /// Create a buffer from sample data and metadata
    ///
    /// The metadata's layout and frame count are recomputed from the data
    /// rather than trusted.
    pub fn new(data: SampleData, metadata: AudioMetadata) -> Self {
        let metadata = AudioMetadata {
            layout: data.layout(),
            frame_count: data.frame_count(),
            ..metadata
        };
        Self {
            data: Arc::new(data),
            metadata,
        }
    }

    /// The normalized sample matrix
    #[inline]
    pub fn data(&self) -> &SampleData {
        &self.data
    }

    /// The buffer's format metadata
    #[inline]
    pub fn metadata(&self) -> &AudioMetadata {
        &self.metadata
    }

    /// Number of sample frames
    #[inline]
    pub fn frame_count(&self) -> usize {
        self.data.frame_count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// True when both buffers share the same underlying sample storage
    ///
    /// Only the no-op paths of `to_mono` and `channel` produce aliases.
    pub fn shares_data_with(&self, other: &AudioBuffer) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    /// Alias the same sample storage under a copy of the metadata
    fn alias(&self) -> AudioBuffer {
        AudioBuffer {
            data: Arc::clone(&self.data),
            metadata: self.metadata,
        }
    }

    /// Down-mix to mono by averaging the two channels per frame
    ///
    /// A buffer that is already mono is returned as an alias, no copy.
    /// Sample rate, sample width and reported duration carry over verbatim.
    pub fn to_mono(&self) -> AudioBuffer {
        match self.data.as_ref() {
            SampleData::Mono(_) => self.alias(),
            SampleData::Stereo(frames) => {
                let mono: Vec<f32> = frames
                    .iter()
                    .map(|frame| (frame[0] + frame[1]) / 2.0)
                    .collect();

                AudioBuffer::new(
                    SampleData::Mono(mono),
                    AudioMetadata {
                        layout: ChannelLayout::Mono,
                        ..self.metadata
                    },
                )
            }
        }
    }

    /// Extract a single channel as a new mono buffer
    ///
    /// The index is validated against the channels actually present:
    /// 0 for mono, 0 or 1 for stereo. A valid index on a mono buffer
    /// returns an alias.
    ///
    /// # Errors
    /// * `InvalidChannel` - index beyond the available channels
    pub fn channel(&self, index: usize) -> Result<AudioBuffer> {
        if index >= self.metadata.layout.num_channels() {
            return Err(AudioError::InvalidChannel {
                index,
                channels: self.metadata.channels(),
            });
        }

        match self.data.as_ref() {
            SampleData::Mono(_) => Ok(self.alias()),
            SampleData::Stereo(frames) => {
                let column: Vec<f32> = frames.iter().map(|frame| frame[index]).collect();

                Ok(AudioBuffer::new(
                    SampleData::Mono(column),
                    AudioMetadata {
                        layout: ChannelLayout::Mono,
                        ..self.metadata
                    },
                ))
            }
        }
    }

    /// Append another buffer's frames after this one's
    ///
    /// Channels, sample rate and sample width must match. The result's
    /// reported duration is the sum of the two reported durations; the
    /// frame count is recomputed from the concatenated data.
    ///
    /// # Errors
    /// * `IncompatibleAudio` - metadata mismatch, naming the first
    ///   mismatched field
    pub fn concat(&self, other: &AudioBuffer) -> Result<AudioBuffer> {
        ensure_compatible(&self.metadata, &other.metadata)?;

        let data = match (self.data.as_ref(), other.data.as_ref()) {
            (SampleData::Mono(a), SampleData::Mono(b)) => {
                let mut joined = Vec::with_capacity(a.len() + b.len());
                joined.extend_from_slice(a);
                joined.extend_from_slice(b);
                SampleData::Mono(joined)
            }
            (SampleData::Stereo(a), SampleData::Stereo(b)) => {
                let mut joined = Vec::with_capacity(a.len() + b.len());
                joined.extend_from_slice(a);
                joined.extend_from_slice(b);
                SampleData::Stereo(joined)
            }
            // Mismatched layouts are rejected by ensure_compatible above
            _ => unreachable!("channel layouts validated before concatenation"),
        };

        let metadata = AudioMetadata {
            duration_seconds: self.metadata.duration_seconds + other.metadata.duration_seconds,
            ..self.metadata
        };

        Ok(AudioBuffer::new(data, metadata))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pcm::sample::SampleWidth;
    use approx::assert_relative_eq;

    fn stereo_buffer(frames: Vec<[f32; 2]>) -> AudioBuffer {
        let frame_count = frames.len();
        AudioBuffer::new(
            SampleData::Stereo(frames),
            AudioMetadata {
                sample_rate: 44100,
                layout: ChannelLayout::Stereo,
                sample_width: SampleWidth::I16,
                duration_seconds: frame_count as f64 / 44100.0,
                frame_count,
            },
        )
    }

    fn mono_buffer(samples: Vec<f32>) -> AudioBuffer {
        let frame_count = samples.len();
        AudioBuffer::new(
            SampleData::Mono(samples),
            AudioMetadata {
                sample_rate: 44100,
                layout: ChannelLayout::Mono,
                sample_width: SampleWidth::I16,
                duration_seconds: frame_count as f64 / 44100.0,
                frame_count,
            },
        )
    }

    // ------------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------------

    #[test]
    fn test_new_recomputes_frame_count() {
        let buffer = AudioBuffer::new(
            SampleData::Mono(vec![0.0; 50]),
            AudioMetadata {
                sample_rate: 44100,
                layout: ChannelLayout::Stereo, // wrong on purpose
                sample_width: SampleWidth::I16,
                duration_seconds: 1.0,
                frame_count: 999, // wrong on purpose
            },
        );

        assert_eq!(buffer.frame_count(), 50);
        assert_eq!(buffer.metadata().frame_count, 50);
        assert_eq!(buffer.metadata().channels(), 1);
    }

    // ------------------------------------------------------------------------
    // to_mono
    // ------------------------------------------------------------------------

    #[test]
    fn test_to_mono_averages_channels() {
        let buffer = stereo_buffer(vec![[1.0, 0.0], [0.5, -0.5], [-1.0, -1.0]]);
        let mono = buffer.to_mono();

        let samples = match mono.data() {
            SampleData::Mono(s) => s,
            _ => panic!("expected mono data"),
        };
        assert_relative_eq!(samples[0], 0.5);
        assert_relative_eq!(samples[1], 0.0);
        assert_relative_eq!(samples[2], -1.0);

        assert_eq!(mono.metadata().channels(), 1);
        assert_eq!(mono.metadata().sample_rate, 44100);
        assert_eq!(mono.metadata().sample_width, SampleWidth::I16);
        assert_eq!(mono.frame_count(), 3);
    }

    #[test]
    fn test_to_mono_on_mono_aliases() {
        let buffer = mono_buffer(vec![0.1, 0.2, 0.3]);
        let mono = buffer.to_mono();

        assert!(mono.shares_data_with(&buffer));
        assert_eq!(mono.metadata(), buffer.metadata());
    }

    #[test]
    fn test_to_mono_keeps_reported_duration() {
        let mut buffer = stereo_buffer(vec![[0.0, 0.0]; 10]);
        buffer.metadata.duration_seconds = 42.0;

        let mono = buffer.to_mono();
        assert_eq!(mono.metadata().duration_seconds, 42.0);
    }

    #[test]
    fn test_to_mono_identical_channels_equals_channel_zero() {
        let frames: Vec<[f32; 2]> = (0..100)
            .map(|i| {
                let s = (i as f32 / 100.0) - 0.5;
                [s, s]
            })
            .collect();
        let buffer = stereo_buffer(frames);

        let mono = buffer.to_mono();
        let left = buffer.channel(0).unwrap();

        assert_eq!(mono.data(), left.data());
    }

    // ------------------------------------------------------------------------
    // channel
    // ------------------------------------------------------------------------

    #[test]
    fn test_channel_extraction() {
        let buffer = stereo_buffer(vec![[0.1, 0.2], [0.3, 0.4]]);

        let left = buffer.channel(0).unwrap();
        let right = buffer.channel(1).unwrap();

        assert_eq!(left.data(), &SampleData::Mono(vec![0.1, 0.3]));
        assert_eq!(right.data(), &SampleData::Mono(vec![0.2, 0.4]));
        assert_eq!(left.metadata().channels(), 1);
        assert_eq!(left.frame_count(), 2);
    }

    #[test]
    fn test_channel_on_mono_aliases() {
        let buffer = mono_buffer(vec![0.1, 0.2]);
        let same = buffer.channel(0).unwrap();
        assert!(same.shares_data_with(&buffer));
    }

    #[test]
    fn test_channel_one_on_mono_is_invalid() {
        let buffer = mono_buffer(vec![0.1, 0.2]);
        let err = buffer.channel(1).unwrap_err();
        match err {
            AudioError::InvalidChannel { index, channels } => {
                assert_eq!(index, 1);
                assert_eq!(channels, 1);
            }
            other => panic!("expected InvalidChannel, got: {:?}", other),
        }
    }

    #[test]
    fn test_channel_out_of_range_on_stereo() {
        let buffer = stereo_buffer(vec![[0.1, 0.2]]);
        let err = buffer.channel(2).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CHANNEL");
    }

    // ------------------------------------------------------------------------
    // concat
    // ------------------------------------------------------------------------

    #[test]
    fn test_concat_with_self_doubles() {
        let buffer = mono_buffer(vec![0.1, 0.2, 0.3]);
        let doubled = buffer.concat(&buffer).unwrap();

        assert_eq!(doubled.frame_count(), 6);
        assert_relative_eq!(
            doubled.metadata().duration_seconds,
            buffer.metadata().duration_seconds * 2.0
        );

        // First half must equal the original exactly
        match doubled.data() {
            SampleData::Mono(s) => {
                assert_eq!(&s[..3], &[0.1, 0.2, 0.3]);
                assert_eq!(&s[3..], &[0.1, 0.2, 0.3]);
            }
            _ => panic!("expected mono data"),
        }
    }

    #[test]
    fn test_concat_stereo_preserves_frames() {
        let a = stereo_buffer(vec![[0.1, 0.2], [0.3, 0.4]]);
        let b = stereo_buffer(vec![[0.5, 0.6]]);

        let joined = a.concat(&b).unwrap();
        assert_eq!(joined.frame_count(), 3);
        assert_eq!(
            joined.data(),
            &SampleData::Stereo(vec![[0.1, 0.2], [0.3, 0.4], [0.5, 0.6]])
        );
    }

    #[test]
    fn test_concat_sums_reported_durations() {
        let mut a = mono_buffer(vec![0.0; 10]);
        let mut b = mono_buffer(vec![0.0; 10]);
        a.metadata.duration_seconds = 1.5;
        b.metadata.duration_seconds = 2.5;

        let joined = a.concat(&b).unwrap();
        // Summed from the reported values, not recomputed from frames
        assert_relative_eq!(joined.metadata().duration_seconds, 4.0);
        assert_eq!(joined.frame_count(), 20);
    }

    #[test]
    fn test_concat_sample_rate_mismatch() {
        let a = mono_buffer(vec![0.1, 0.2]);
        let mut b = mono_buffer(vec![0.3]);
        b.metadata.sample_rate = 48000;

        let err = a.concat(&b).unwrap_err();
        match err {
            AudioError::IncompatibleAudio { field, .. } => assert_eq!(field, "sample_rate"),
            other => panic!("expected IncompatibleAudio, got: {:?}", other),
        }

        // Inputs stay untouched and usable
        assert_eq!(a.frame_count(), 2);
        assert_eq!(b.frame_count(), 1);
        assert!(a.concat(&a).is_ok());
    }

    #[test]
    fn test_concat_channel_mismatch() {
        let a = mono_buffer(vec![0.1]);
        let b = stereo_buffer(vec![[0.1, 0.2]]);

        let err = a.concat(&b).unwrap_err();
        match err {
            AudioError::IncompatibleAudio { field, .. } => assert_eq!(field, "channels"),
            other => panic!("expected IncompatibleAudio, got: {:?}", other),
        }
    }

    // ------------------------------------------------------------------------
    // Invariants
    // ------------------------------------------------------------------------

    #[test]
    fn test_transformations_preserve_sample_range() {
        let buffer = stereo_buffer(vec![[1.0, 1.0], [-1.0, -1.0], [0.5, -0.5]]);

        for derived in [buffer.to_mono(), buffer.channel(0).unwrap()] {
            let in_range = match derived.data() {
                SampleData::Mono(s) => s.iter().all(|v| (-1.0..=1.0).contains(v)),
                SampleData::Stereo(f) => f
                    .iter()
                    .flatten()
                    .all(|v| (-1.0..=1.0).contains(v)),
            };
            assert!(in_range);
            assert_eq!(derived.metadata().frame_count, derived.frame_count());
        }
    }
}

//! pcmkit - In-memory PCM audio buffers
//!
//! pcmkit decodes media files into normalized floating-point sample
//! buffers, applies lossless channel transformations, and encodes the
//! result back out:
//!
//! - Down-mixing stereo to mono
//! - Single-channel extraction
//! - Concatenation of format-compatible buffers
//!
//! # Architecture
//!
//! The PCM core (`pcm`) owns the normalization contract: fixed-width
//! signed-integer samples map to f32 amplitudes in [-1, 1] by dividing by
//! the integer type's maximum positive magnitude, clamped after the
//! division. Container and codec work is delegated to the codec gateway
//! (`gateway`), an ffmpeg/ffprobe subprocess boundary that exchanges raw
//! WAV byte streams with the core. `io` ties the two together.

pub mod cli;
pub mod error;
pub mod gateway;
pub mod io;
pub mod pcm;

pub use error::{AudioError, Result};
pub use io::{load_audio, save_audio, SaveFormat};
pub use pcm::{AudioBuffer, AudioMetadata, ChannelLayout, SampleData, SampleWidth};

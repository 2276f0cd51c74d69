//! PCM core
//!
//! The normalization contract between fixed-width integer PCM and
//! normalized f32 samples, plus the buffer transformations built on it.

pub mod buffer;
pub mod metadata;
pub mod sample;

pub use buffer::{AudioBuffer, SampleData};
pub use metadata::{ensure_compatible, first_mismatch, AudioMetadata};
pub use sample::{ChannelLayout, SampleWidth};

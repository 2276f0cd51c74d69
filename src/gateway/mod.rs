//! Codec gateway boundary
//!
//! Everything that touches containers and codecs lives here: the ffmpeg
//! subprocess calls and the raw WAV stream handling that feeds the PCM
//! core.

pub mod ffmpeg;
pub mod wav;

pub use ffmpeg::{decode, encode, probe, ProbeInfo};
pub use wav::WavStream;

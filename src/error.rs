//! Error handling for pcmkit
//!
//! Every failure is local and synchronous: operations either fully succeed
//! or return one of these variants to the immediate caller. Nothing is
//! retried internally and no operation leaves a buffer half-modified.

use thiserror::Error;

/// Result type alias for pcmkit operations
pub type Result<T> = std::result::Result<T, AudioError>;

/// Main error type for pcmkit operations
#[derive(Error, Debug)]
pub enum AudioError {
    /// Input path does not exist. Raised before any gateway call.
    #[error("File not found: {path}")]
    ResourceNotFound { path: String },

    /// ffprobe failed or reported no audio stream.
    #[error("Probe failed: {reason}")]
    ProbeError { reason: String },

    /// ffmpeg decode exited non-zero.
    #[error("Decode failed: {reason}")]
    DecodeError { reason: String },

    /// ffmpeg encode exited non-zero.
    #[error("Encode failed: {reason}")]
    EncodeError { reason: String },

    /// Sample width outside {1, 2, 4} bytes, or a save target outside
    /// the supported format set.
    #[error("Unsupported format: {format}")]
    UnsupportedFormat { format: String },

    /// Channel index beyond the channels actually present in a buffer.
    #[error("Invalid channel {index}: buffer has {channels} channel(s)")]
    InvalidChannel { index: usize, channels: u16 },

    /// Metadata mismatch on concatenation, naming the first field that
    /// differs.
    #[error("Incompatible audio: {field} mismatch ({left} vs {right})")]
    IncompatibleAudio {
        field: &'static str,
        left: String,
        right: String,
    },

    /// The decoded byte stream is not a linear-PCM WAV we can read.
    #[error("Malformed WAV stream: {reason}")]
    MalformedWav { reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AudioError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            AudioError::ResourceNotFound { .. } => "RESOURCE_NOT_FOUND",
            AudioError::ProbeError { .. } => "PROBE_ERROR",
            AudioError::DecodeError { .. } => "DECODE_ERROR",
            AudioError::EncodeError { .. } => "ENCODE_ERROR",
            AudioError::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            AudioError::InvalidChannel { .. } => "INVALID_CHANNEL",
            AudioError::IncompatibleAudio { .. } => "INCOMPATIBLE_AUDIO",
            AudioError::MalformedWav { .. } => "MALFORMED_WAV",
            AudioError::Io(_) => "IO_ERROR",
        }
    }

    /// True when the failure came from the external codec gateway rather
    /// than from this crate's own validation.
    pub fn is_gateway_failure(&self) -> bool {
        matches!(
            self,
            AudioError::ProbeError { .. }
                | AudioError::DecodeError { .. }
                | AudioError::EncodeError { .. }
        )
    }
}

//! Error types for scriber.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScriberError {
    /// No fragment survived normalization: silent audio, or the recognizer
    /// returned nothing usable.
    #[error("no usable speech found in input")]
    EmptyTranscript,

    /// The recognition service returned no fragment collection at all.
    #[error("recognition produced no intelligible segments")]
    MissingUpstreamOutput,

    #[error("recognition request failed: {message}")]
    Recognition { message: String },

    #[error("configuration error: {message}")]
    Config { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, ScriberError>;
